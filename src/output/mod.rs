//! Output module for crawl results
//!
//! This module handles:
//! - Ranking the aggregated word counts
//! - The final `CrawlResult` handed to the caller
//! - Writing results as JSON

mod ranking;
mod result;
mod writer;

pub use ranking::top_words;
pub use result::CrawlResult;
pub use writer::{write_json_result, write_json_result_to};
