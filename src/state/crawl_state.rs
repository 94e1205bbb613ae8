use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

/// Word to occurrence count
pub type WordCounts = HashMap<String, u64>;

/// Tracks the state shared by all tasks of one crawl
///
/// The visited set only grows and the word counts only increase. Each
/// structure has its own lock, held for the duration of a single set or map
/// operation and never across a page fetch.
#[derive(Debug, Default)]
pub struct SharedCrawlState {
    /// URLs claimed by some task during this crawl
    visited: Mutex<HashSet<String>>,

    /// Running sum of the word counts of every processed page
    word_counts: Mutex<WordCounts>,
}

impl SharedCrawlState {
    /// Creates an empty state for a new crawl
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically records a URL as visited
    ///
    /// Exactly one of any number of concurrent claims for the same URL
    /// succeeds.
    ///
    /// # Returns
    ///
    /// * `true` - The URL was not visited before and now belongs to the caller
    /// * `false` - Another claim already recorded this URL
    pub fn claim(&self, url: &str) -> bool {
        let mut visited = lock(&self.visited);
        if visited.contains(url) {
            return false;
        }
        visited.insert(url.to_string())
    }

    /// Adds a page's word counts into the running totals
    ///
    /// Merging is an addition per word, so the final totals do not depend on
    /// the order in which tasks merge.
    pub fn merge_word_counts(&self, counts: &WordCounts) {
        if counts.is_empty() {
            return;
        }

        let mut totals = lock(&self.word_counts);
        for (word, count) in counts {
            *totals.entry(word.clone()).or_insert(0) += count;
        }
    }

    /// Returns the number of distinct URLs claimed so far
    pub fn visited_count(&self) -> usize {
        lock(&self.visited).len()
    }

    /// Returns a copy of the current word totals
    pub fn snapshot_word_counts(&self) -> WordCounts {
        lock(&self.word_counts).clone()
    }
}

/// Locks a mutex, recovering the data if another task panicked while holding it
///
/// Both structures are add-only and every update is a single insert or
/// addition, so a panic can never leave them half-written.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
