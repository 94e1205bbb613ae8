//! Profiling module for Web-Ripple
//!
//! This module records how long the crawler's operations take. Components are
//! instrumented by explicit decoration: a `Profiler` wraps a page parser or a
//! crawler in a decorator with the same trait, timing every delegated call.
//! Wrapped and unwrapped components behave identically.
//!
//! # Components
//!
//! - `Profiler`: Hands out decorators and writes the collected data
//! - `ProfilingState`: Total time spent per `Type#method`
//! - `ProfiledParser` / `ProfiledCrawler`: The decorators

mod state;
mod wrappers;

pub use state::ProfilingState;
pub use wrappers::{ProfiledCrawler, ProfiledParser};

use crate::crawler::{PageParser, WebCrawler};
use crate::RippleError;
use chrono::{DateTime, Utc};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

/// Collects call durations from every component it wrapped
#[derive(Debug, Clone)]
pub struct Profiler {
    state: Arc<ProfilingState>,
    started_at: DateTime<Utc>,
}

impl Profiler {
    /// Creates a profiler; its start time heads the written report
    pub fn new() -> Self {
        Self {
            state: Arc::new(ProfilingState::new()),
            started_at: Utc::now(),
        }
    }

    /// Wraps a page parser so that every `parse` call is timed
    pub fn wrap_parser<P: PageParser>(&self, parser: P) -> ProfiledParser<P> {
        ProfiledParser::new(parser, Arc::clone(&self.state))
    }

    /// Wraps a crawler so that every `crawl` and `max_parallelism` call is timed
    pub fn wrap_crawler<C: WebCrawler>(&self, crawler: C) -> ProfiledCrawler<C> {
        ProfiledCrawler::new(crawler, Arc::clone(&self.state))
    }

    /// Returns the data recorded so far
    pub fn state(&self) -> &ProfilingState {
        &self.state
    }

    /// Writes the profiling data to a file
    ///
    /// The file is created if missing; an existing file is appended to.
    pub fn write_data(&self, path: &Path) -> Result<(), RippleError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = BufWriter::new(file);
        self.write_data_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Writes the profiling data to any writer
    ///
    /// # Format
    ///
    /// ```text
    /// Run at Fri, 16 Oct 2026 09:00:00 GMT
    /// HttpPageParser#parse took 0m 1s 234ms
    /// ParallelCrawler#crawl took 0m 2s 5ms
    ///
    /// ```
    pub fn write_data_to<W: Write>(&self, writer: &mut W) -> Result<(), RippleError> {
        writeln!(
            writer,
            "Run at {}",
            self.started_at.format("%a, %-d %b %Y %H:%M:%S GMT")
        )?;
        self.state.write(writer)?;
        writeln!(writer)?;
        Ok(())
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}
