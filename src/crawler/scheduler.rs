//! Worker budget for the crawl
//!
//! This module handles:
//! - Capping the configured parallelism at the host's execution units
//! - Global concurrency limiting of page parses via a semaphore
//!
//! Crawl tasks themselves are cheap and may fan out without limit; they queue
//! on the budget before doing any fetch work.

use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Returns the number of execution units available on this host
pub fn available_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Caps a desired worker count at the host parallelism
///
/// # Arguments
///
/// * `desired` - The configured worker count, or None for "as many as the host has"
///
/// # Returns
///
/// A worker count between 1 and `available_parallelism()`
pub fn effective_parallelism(desired: Option<usize>) -> usize {
    let available = available_parallelism();
    desired.unwrap_or(available).clamp(1, available)
}

/// Bounds the number of page parses in flight at once
///
/// The budget is fixed for the duration of one crawl.
#[derive(Debug, Clone)]
pub struct WorkerBudget {
    /// Global semaphore for limiting concurrent parses
    semaphore: Arc<Semaphore>,

    /// Total number of permits
    size: usize,
}

impl WorkerBudget {
    /// Creates a budget with `size` permits (at least one)
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(size)),
            size,
        }
    }

    /// Waits for a free worker slot
    ///
    /// The slot is released when the returned permit is dropped. Returns None
    /// only if the budget was closed.
    pub async fn acquire(&self) -> Option<OwnedSemaphorePermit> {
        self.semaphore.clone().acquire_owned().await.ok()
    }

    /// Returns the total number of worker slots
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of currently free worker slots
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}
