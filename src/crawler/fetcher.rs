//! HTTP page parser implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests to fetch page content
//! - Error classification

use crate::config::UserAgentConfig;
use crate::crawler::parser::{parse_html, PageParseResult, PageParser};
use crate::url::IgnoreList;
use crate::RippleError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use web_ripple::config::UserAgentConfig;
/// use web_ripple::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version
    let user_agent = format!("{}/{}", config.crawler_name, config.crawler_version);

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(config.request_timeout_seconds))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Page parser that fetches pages over HTTP and extracts words and links
///
/// The per-request timeout of the client is the only bound on a single fetch;
/// the crawl deadline is never checked while a request is in flight.
#[derive(Debug, Clone)]
pub struct HttpPageParser {
    client: Client,
    ignored_words: IgnoreList,
}

impl HttpPageParser {
    /// Creates a parser with a client built from `config`
    pub fn new(config: &UserAgentConfig, ignored_words: IgnoreList) -> Result<Self, RippleError> {
        Ok(Self::with_client(build_http_client(config)?, ignored_words))
    }

    /// Creates a parser around an existing client
    pub fn with_client(client: Client, ignored_words: IgnoreList) -> Self {
        Self {
            client,
            ignored_words,
        }
    }
}

#[async_trait]
impl PageParser for HttpPageParser {
    /// Fetches a URL and parses it as HTML
    ///
    /// # Failure Mapping
    ///
    /// | Condition | Error |
    /// |-----------|-------|
    /// | Timeout | `RippleError::Timeout` |
    /// | Connection / transport error | `RippleError::Http` |
    /// | Non-2xx status after redirects | `RippleError::HttpStatus` |
    /// | Content-Type present but not HTML | `RippleError::ContentMismatch` |
    async fn parse(&self, url: &str) -> Result<PageParseResult, RippleError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RippleError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // A missing Content-Type is treated as HTML
        if let Some(content_type) = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !content_type.contains("text/html") {
                return Err(RippleError::ContentMismatch {
                    url: url.to_string(),
                    content_type: content_type.to_string(),
                });
            }
        }

        // Relative links resolve against the final URL after redirects
        let final_url = response.url().clone();
        let body = response.text().await.map_err(|e| classify_error(url, e))?;

        tracing::trace!("Fetched {} ({} bytes)", final_url, body.len());

        Ok(parse_html(&body, &final_url, &self.ignored_words))
    }
}

/// Maps a transport error to the crawler's error type
fn classify_error(url: &str, error: reqwest::Error) -> RippleError {
    if error.is_timeout() {
        RippleError::Timeout {
            url: url.to_string(),
        }
    } else {
        RippleError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn html_response(body: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html")
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&UserAgentConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_parse_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/1"))
            .respond_with(html_response(
                r#"<html><body>go go lang <a href="/2">next</a></body></html>"#,
            ))
            .mount(&server)
            .await;

        let parser = HttpPageParser::new(&UserAgentConfig::default(), IgnoreList::empty()).unwrap();
        let page = parser.parse(&format!("{}/1", server.uri())).await.unwrap();

        assert_eq!(page.word_counts["go"], 2);
        assert_eq!(page.word_counts["lang"], 1);
        assert_eq!(page.word_counts["next"], 1);
        assert_eq!(page.links, vec![format!("{}/2", server.uri())]);
    }

    #[tokio::test]
    async fn test_not_found_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let parser = HttpPageParser::new(&UserAgentConfig::default(), IgnoreList::empty()).unwrap();
        let result = parser.parse(&format!("{}/missing", server.uri())).await;

        assert!(matches!(
            result,
            Err(RippleError::HttpStatus { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_non_html_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
            .mount(&server)
            .await;

        let parser = HttpPageParser::new(&UserAgentConfig::default(), IgnoreList::empty()).unwrap();
        let result = parser.parse(&format!("{}/data.json", server.uri())).await;

        assert!(matches!(result, Err(RippleError::ContentMismatch { .. })));
    }

    #[tokio::test]
    async fn test_connection_refused_is_error() {
        let parser = HttpPageParser::new(&UserAgentConfig::default(), IgnoreList::empty()).unwrap();
        // Port 9 (discard) is not expected to accept HTTP connections
        let result = parser.parse("http://127.0.0.1:9/").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_malformed_url_is_error() {
        let parser = HttpPageParser::new(&UserAgentConfig::default(), IgnoreList::empty()).unwrap();
        let result = parser.parse("not a url").await;
        assert!(matches!(result, Err(RippleError::Http { .. })));
    }
}
