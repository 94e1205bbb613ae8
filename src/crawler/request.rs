//! Crawl request construction
//!
//! A `CrawlRequest` carries the seeds, limits and URL filter of one crawl.
//! Building one from a config file applies the full config validation.

use crate::config::validation::validate_crawler_config;
use crate::config::CrawlerConfig;
use crate::crawler::scheduler::effective_parallelism;
use crate::url::IgnoreList;
use crate::{ConfigError, ConfigResult};
use std::time::Duration;

/// Everything one crawl needs, validated up front
///
/// Immutable once built. Invalid settings are rejected here, before any crawl
/// task is dispatched. Seeds are not checked: a seed the page parser cannot
/// handle fails on its own, like any other unreachable page.
#[derive(Debug, Clone)]
pub struct CrawlRequest {
    seeds: Vec<String>,
    max_depth: u32,
    timeout: Duration,
    ignored_urls: IgnoreList,
    popular_word_count: usize,
    parallelism: usize,
}

impl CrawlRequest {
    /// Creates a validated crawl request
    ///
    /// # Arguments
    ///
    /// * `seeds` - Start URLs, possibly none
    /// * `max_depth` - Maximum number of hops, counting the seed itself
    /// * `timeout` - Wall-clock budget; the deadline is fixed when the crawl starts
    /// * `ignored_urls` - URLs fully matching any pattern are skipped
    /// * `popular_word_count` - Number of words to report
    /// * `parallelism` - Desired worker count, capped at the host parallelism
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlRequest)` - The request is valid
    /// * `Err(ConfigError)` - The parallelism is zero
    pub fn new(
        seeds: Vec<String>,
        max_depth: u32,
        timeout: Duration,
        ignored_urls: IgnoreList,
        popular_word_count: usize,
        parallelism: Option<usize>,
    ) -> ConfigResult<Self> {
        if parallelism == Some(0) {
            return Err(ConfigError::Validation(
                "parallelism must be >= 1, got 0".to_string(),
            ));
        }

        Ok(Self {
            seeds,
            max_depth,
            timeout,
            ignored_urls,
            popular_word_count,
            parallelism: effective_parallelism(parallelism),
        })
    }

    /// Builds a request from the `[crawler]` configuration section
    ///
    /// Start pages must be present and be absolute HTTP(S) URLs.
    pub fn from_config(config: &CrawlerConfig) -> ConfigResult<Self> {
        validate_crawler_config(config)?;

        Self::new(
            config.start_pages.clone(),
            config.max_depth,
            config.timeout(),
            IgnoreList::compile(&config.ignored_urls)?,
            config.popular_word_count,
            config.parallelism,
        )
    }

    pub fn seeds(&self) -> &[String] {
        &self.seeds
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn ignored_urls(&self) -> &IgnoreList {
        &self.ignored_urls
    }

    pub fn popular_word_count(&self) -> usize {
        self.popular_word_count
    }

    /// Worker count after capping at the host parallelism
    pub fn parallelism(&self) -> usize {
        self.parallelism
    }
}
