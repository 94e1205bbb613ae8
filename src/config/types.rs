use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Web-Ripple
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Seed URLs the crawl starts from
    pub start_pages: Vec<String>,

    /// Wall-clock budget for the whole crawl (seconds)
    pub timeout_seconds: u64,

    /// Maximum number of hops from a seed, the seed itself being the first
    pub max_depth: u32,

    /// Number of words to report, most popular first
    pub popular_word_count: usize,

    /// Desired number of parallel workers; defaults to the host parallelism
    #[serde(default)]
    pub parallelism: Option<usize>,

    /// Regular expressions; a URL fully matching any of them is never visited
    #[serde(default)]
    pub ignored_urls: Vec<String>,

    /// Regular expressions; a word fully matching any of them is not counted
    #[serde(default)]
    pub ignored_words: Vec<String>,
}

impl CrawlerConfig {
    /// Returns the crawl timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(default = "default_crawler_version")]
    pub crawler_version: String,

    /// Per-request HTTP timeout (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_crawler_name() -> String {
    "web-ripple".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_request_timeout() -> u64 {
    30
}

/// Output configuration
///
/// A missing or empty path means standard output.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Where the JSON crawl result is written (appended if the file exists)
    #[serde(default)]
    pub result_path: Option<String>,

    /// Where profiling data is written (appended if the file exists)
    #[serde(default)]
    pub profile_path: Option<String>,
}
