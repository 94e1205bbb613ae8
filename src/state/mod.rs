//! State module for tracking crawl progress
//!
//! This module provides the state shared by every crawl task of one crawl.
//!
//! # Components
//!
//! - `SharedCrawlState`: The visited-URL set and the running word-count map,
//!   accessed only through the atomic claim and merge operations

mod crawl_state;

// Re-export main types
pub use crawl_state::{SharedCrawlState, WordCounts};
