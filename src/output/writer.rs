use crate::output::CrawlResult;
use crate::Result;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes a crawl result as JSON to a file
///
/// The file is created if missing; an existing file is appended to, one JSON
/// document per line.
///
/// # Arguments
///
/// * `result` - The crawl result to write
/// * `path` - Destination file
///
/// # Returns
///
/// * `Ok(())` - Successfully written
/// * `Err(RippleError)` - Failed to open, serialize, or write
pub fn write_json_result(result: &CrawlResult, path: &Path) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = BufWriter::new(file);
    write_json_result_to(result, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes a crawl result as JSON to any writer, followed by a newline
///
/// The writer is left open.
pub fn write_json_result_to<W: Write>(result: &CrawlResult, writer: &mut W) -> Result<()> {
    serde_json::to_writer(&mut *writer, result)?;
    writeln!(writer)?;
    Ok(())
}
