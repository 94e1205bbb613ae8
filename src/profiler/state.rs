use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;

/// Total time spent in each profiled method
///
/// Keys are `Type#method`. Safe to record into from many tasks at once.
#[derive(Debug, Default)]
pub struct ProfilingState {
    durations: Mutex<BTreeMap<String, Duration>>,
}

impl ProfilingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `elapsed` to the total of `type_name#method`
    pub fn record(&self, type_name: &str, method: &str, elapsed: Duration) {
        let key = format!("{}#{}", type_name, method);
        let mut durations = self
            .durations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *durations.entry(key).or_insert(Duration::ZERO) += elapsed;
    }

    /// Returns the total recorded for a `Type#method` key
    pub fn get(&self, key: &str) -> Option<Duration> {
        self.durations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .copied()
    }

    /// Writes one line per method, sorted by key
    pub fn write<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        let durations = self
            .durations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for (key, elapsed) in durations.iter() {
            writeln!(writer, "{} took {}", key, format_duration(*elapsed))?;
        }
        Ok(())
    }
}

/// Formats a duration as `<minutes>m <seconds>s <millis>ms`
fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}m {}s {}ms", secs / 60, secs % 60, elapsed.subsec_millis())
}
