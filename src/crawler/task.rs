//! The recursive crawl task
//!
//! One task processes one URL and joins one child task per outbound link.

use crate::crawler::parser::PageParser;
use crate::crawler::scheduler::WorkerBudget;
use crate::state::SharedCrawlState;
use crate::url::{is_ignored, IgnoreList};
use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

/// Everything a crawl task shares with every other task of the same crawl
pub(crate) struct TaskContext {
    pub parser: Arc<dyn PageParser>,
    pub state: SharedCrawlState,
    pub ignored_urls: IgnoreList,
    pub budget: WorkerBudget,
    /// None when the timeout is too large to be represented as an instant
    pub deadline: Option<Instant>,
}

impl TaskContext {
    fn deadline_passed(&self) -> bool {
        self.deadline.map_or(false, |deadline| Instant::now() >= deadline)
    }
}

/// Crawls `url` with `depth` hops remaining, then its links with one hop fewer
///
/// # Steps
///
/// 1. Stop if no depth remains
/// 2. Wait for a worker slot
/// 3. Stop if the deadline has passed
/// 4. Stop if the URL is ignored
/// 5. Stop if another task already claimed the URL
/// 6. Parse the page; a failure ends this branch only
/// 7. Release the worker slot and merge the page's word counts
/// 8. Spawn one child per link and wait for all of them
///
/// The deadline is checked once the task holds a worker slot, so no parse
/// starts after it. A parse already in progress runs to completion. The slot
/// is never held across the join.
pub(crate) fn run(ctx: Arc<TaskContext>, url: String, depth: u32) -> BoxFuture<'static, ()> {
    Box::pin(async move {
        if depth == 0 {
            return;
        }

        let parsed = {
            let _permit = match ctx.budget.acquire().await {
                Some(permit) => permit,
                None => {
                    tracing::warn!("Worker budget closed, not crawling {}", url);
                    return;
                }
            };

            if ctx.deadline_passed() {
                tracing::trace!("Deadline passed, not crawling {}", url);
                return;
            }

            if is_ignored(&url, &ctx.ignored_urls) {
                tracing::trace!("Ignoring {}", url);
                return;
            }

            if !ctx.state.claim(&url) {
                tracing::trace!("Already visited {}", url);
                return;
            }

            tracing::debug!("Processing URL: {} (depth {})", url, depth);
            ctx.parser.parse(&url).await
        };

        let page = match parsed {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", url, e);
                return;
            }
        };

        ctx.state.merge_word_counts(&page.word_counts);

        // Children at depth 0 would return immediately
        if depth == 1 || page.links.is_empty() {
            return;
        }

        let mut children = JoinSet::new();
        for link in page.links {
            children.spawn(run(Arc::clone(&ctx), link, depth - 1));
        }

        while let Some(joined) = children.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Crawl task below {} failed: {}", url, e);
            }
        }
    })
}
