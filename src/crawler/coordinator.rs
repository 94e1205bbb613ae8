//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the entry point that coordinates one crawl:
//! - Fixing the deadline and creating the shared state
//! - Dispatching one crawl task per seed URL
//! - Waiting for the whole forest of tasks to finish
//! - Ranking the word counts into the final result

use crate::crawler::parser::PageParser;
use crate::crawler::request::CrawlRequest;
use crate::crawler::scheduler::{available_parallelism, WorkerBudget};
use crate::crawler::task::{self, TaskContext};
use crate::output::{top_words, CrawlResult};
use crate::state::SharedCrawlState;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

/// A crawler that turns a crawl request into a crawl result
#[async_trait]
pub trait WebCrawler: Send + Sync {
    /// Runs one complete crawl
    ///
    /// Never fails once the request is built: unreachable pages are skipped
    /// and an exceeded deadline simply ends the crawl early.
    async fn crawl(&self, request: &CrawlRequest) -> CrawlResult;

    /// Returns the largest parallelism this crawler can make use of
    fn max_parallelism(&self) -> usize;
}

/// Crawls pages in parallel on the tokio runtime
///
/// Each URL is handled by its own task, which joins one child task per
/// outbound link. Page parses are bounded by the request's parallelism; the
/// fan-out of tasks is not.
#[derive(Clone)]
pub struct ParallelCrawler {
    parser: Arc<dyn PageParser>,
}

impl ParallelCrawler {
    /// Creates a crawler that fetches pages with `parser`
    pub fn new(parser: Arc<dyn PageParser>) -> Self {
        Self { parser }
    }
}

#[async_trait]
impl WebCrawler for ParallelCrawler {
    async fn crawl(&self, request: &CrawlRequest) -> CrawlResult {
        let start_time = Instant::now();
        let deadline = start_time.checked_add(request.timeout());

        let ctx = Arc::new(TaskContext {
            parser: Arc::clone(&self.parser),
            state: SharedCrawlState::new(),
            ignored_urls: request.ignored_urls().clone(),
            budget: WorkerBudget::new(request.parallelism()),
            deadline,
        });

        tracing::info!(
            "Starting crawl: {} seeds, max depth {}, timeout {:?}, parallelism {}",
            request.seeds().len(),
            request.max_depth(),
            request.timeout(),
            request.parallelism()
        );

        let mut tasks = JoinSet::new();
        for seed in request.seeds() {
            tasks.spawn(task::run(Arc::clone(&ctx), seed.clone(), request.max_depth()));
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Crawl task failed: {}", e);
            }
        }

        // Every task has finished; the state is final from here on
        let urls_visited = ctx.state.visited_count();
        let counts = ctx.state.snapshot_word_counts();

        let result = if counts.is_empty() {
            CrawlResult::new(Vec::new(), urls_visited)
        } else {
            CrawlResult::new(top_words(&counts, request.popular_word_count()), urls_visited)
        };

        tracing::info!(
            "Crawl completed: {} URLs visited, {} distinct words in {:?}",
            urls_visited,
            counts.len(),
            start_time.elapsed()
        );

        result
    }

    fn max_parallelism(&self) -> usize {
        available_parallelism()
    }
}
