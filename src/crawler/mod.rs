//! Crawler module for parallel crawling
//!
//! This module contains the core crawling logic, including:
//! - The crawl request and its validation
//! - The recursive crawl task and its worker budget
//! - Overall crawl coordination
//! - The page parsing capability and its HTTP implementation

mod coordinator;
mod fetcher;
mod parser;
mod request;
mod scheduler;
mod task;

pub use coordinator::{ParallelCrawler, WebCrawler};
pub use fetcher::{build_http_client, HttpPageParser};
pub use parser::{parse_html, PageParseResult, PageParser};
pub use request::CrawlRequest;
pub use scheduler::{available_parallelism, effective_parallelism, WorkerBudget};

use crate::output::CrawlResult;
use std::sync::Arc;

/// Runs a complete crawl with the given page parser
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Dispatch one crawl task per seed URL
/// 2. Fetch and parse pages, following links up to the maximum depth
/// 3. Stop starting new pages once the deadline has passed
/// 4. Rank the aggregated word counts
///
/// # Arguments
///
/// * `request` - The validated crawl request
/// * `parser` - The page parsing capability
///
/// # Returns
///
/// The crawl result; a crawl never fails once the request is valid
pub async fn crawl(request: &CrawlRequest, parser: Arc<dyn PageParser>) -> CrawlResult {
    ParallelCrawler::new(parser).crawl(request).await
}
