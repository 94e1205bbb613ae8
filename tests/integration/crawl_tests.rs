//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end, plus an in-memory page parser for
//! properties that need large or precisely shaped link graphs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use web_ripple::config::{parse_config, UserAgentConfig};
use web_ripple::crawler::{
    CrawlRequest, HttpPageParser, PageParseResult, PageParser, ParallelCrawler, WebCrawler,
};
use web_ripple::url::IgnoreList;
use web_ripple::RippleError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html")
}

fn request(seeds: Vec<String>, max_depth: u32, ignored: &[String]) -> CrawlRequest {
    CrawlRequest::new(
        seeds,
        max_depth,
        Duration::from_secs(30),
        IgnoreList::compile(ignored).expect("Failed to compile patterns"),
        10,
        Some(4),
    )
    .expect("Failed to build request")
}

fn http_crawler() -> ParallelCrawler {
    let parser = HttpPageParser::new(&UserAgentConfig::default(), IgnoreList::empty())
        .expect("Failed to build parser");
    ParallelCrawler::new(Arc::new(parser))
}

/// Mounts "/1" (words go go lang, link to "/2") and "/2" (word go)
async fn mount_two_pages(server: &MockServer, second_page_hits: u64) {
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/1"))
        .respond_with(html(format!(
            r#"<html><body><p>go go lang</p><a href="{}/2"></a></body></html>"#,
            base_url
        )))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/2"))
        .respond_with(html("<html><body><p>go</p></body></html>".to_string()))
        .expect(second_page_hits)
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_full_crawl_follows_link() {
    let mock_server = MockServer::start().await;
    mount_two_pages(&mock_server, 1).await;

    let seed = format!("{}/1", mock_server.uri());
    let result = http_crawler().crawl(&request(vec![seed], 2, &[])).await;

    assert_eq!(result.urls_visited, 2);
    assert_eq!(
        result.word_counts,
        vec![("go".to_string(), 3), ("lang".to_string(), 1)]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_ignored_url_never_fetched() {
    let mock_server = MockServer::start().await;
    // Wiremock verifies on drop that "/2" was never requested
    mount_two_pages(&mock_server, 0).await;

    let second = format!("{}/2", mock_server.uri());
    let ignored = vec![regex::escape(&second)];
    let seed = format!("{}/1", mock_server.uri());
    let result = http_crawler().crawl(&request(vec![seed], 2, &ignored)).await;

    assert_eq!(result.urls_visited, 1);
    assert_eq!(
        result.word_counts,
        vec![("go".to_string(), 2), ("lang".to_string(), 1)]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_unreachable_page_does_not_abort_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(format!(
            r#"<html><body>root
                <a href="{0}/broken">broken</a>
                <a href="{0}/fine">fine</a>
            </body></html>"#,
            base_url
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/fine"))
        .respond_with(html("<html><body>sibling</body></html>".to_string()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = http_crawler()
        .crawl(&request(vec![format!("{}/", base_url)], 3, &[]))
        .await;

    // The broken page was claimed, so it counts as visited
    assert_eq!(result.urls_visited, 3);
    assert_eq!(result.count_of("sibling"), Some(1));
    assert_eq!(result.count_of("root"), Some(1));
    assert_eq!(result.count_of("broken"), Some(1));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_page_fetched_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Every hub links to the same leaf
    for hub in 0..8 {
        Mock::given(method("GET"))
            .and(path(format!("/hub{}", hub)))
            .respond_with(html(format!(
                r#"<html><body>hub <a href="{}/leaf"></a></body></html>"#,
                base_url
            )))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/leaf"))
        .respond_with(html("<html><body>leaf</body></html>".to_string()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let seeds = (0..8).map(|hub| format!("{}/hub{}", base_url, hub)).collect();
    let result = http_crawler().crawl(&request(seeds, 2, &[])).await;

    assert_eq!(result.urls_visited, 9);
    assert_eq!(result.count_of("hub"), Some(8));
    assert_eq!(result.count_of("leaf"), Some(1));
}

#[tokio::test]
async fn test_request_from_config_file_contents() {
    let config = parse_config(
        r#"
[crawler]
start-pages = ["http://x/1"]
timeout-seconds = 0
max-depth = 2
popular-word-count = 5
parallelism = 2
"#,
    )
    .expect("Failed to parse config");

    let request = CrawlRequest::from_config(&config.crawler).expect("Invalid request");
    let parser = Arc::new(GraphParser::chain(3));
    let result = web_ripple::crawler::crawl(&request, parser.clone()).await;

    // Zero timeout: the deadline has passed before the first task runs
    assert_eq!(result.urls_visited, 0);
    assert!(result.word_counts.is_empty());
    assert_eq!(parser.calls(), 0);
}

/// In-memory link graph that counts parse calls per URL
#[derive(Default)]
struct GraphParser {
    pages: HashMap<String, PageParseResult>,
    calls: AtomicUsize,
    per_url: Mutex<HashMap<String, usize>>,
}

impl GraphParser {
    /// Pages p0 -> p1 -> ... -> p(n-1), each with the word "w<i>"
    fn chain(n: usize) -> Self {
        let mut parser = Self::default();
        for i in 0..n {
            let links = if i + 1 < n {
                vec![format!("http://x/p{}", i + 1)]
            } else {
                vec![]
            };
            let word = format!("w{}", i);
            parser.insert(&format!("http://x/p{}", i), &[word.as_str()], links);
        }
        parser
    }

    /// Every page links to every page, including itself
    fn complete(n: usize) -> Self {
        let mut parser = Self::default();
        let all: Vec<String> = (0..n).map(|i| format!("http://x/p{}", i)).collect();
        for url in &all {
            parser.insert(url, &["shared"], all.clone());
        }
        parser
    }

    fn insert(&mut self, url: &str, words: &[&str], links: Vec<String>) {
        let mut word_counts = HashMap::new();
        for word in words {
            *word_counts.entry(word.to_string()).or_insert(0) += 1;
        }
        self.pages
            .insert(url.to_string(), PageParseResult { word_counts, links });
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn max_calls_for_one_url(&self) -> usize {
        self.per_url
            .lock()
            .unwrap()
            .values()
            .copied()
            .max()
            .unwrap_or(0)
    }
}

#[async_trait]
impl PageParser for GraphParser {
    async fn parse(&self, url: &str) -> Result<PageParseResult, RippleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self
            .per_url
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_insert(0) += 1;
        tokio::task::yield_now().await;
        Ok(self.pages.get(url).cloned().unwrap_or_default())
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_depth_bounds_link_distance() {
    for depth in 0..6u32 {
        let parser = Arc::new(GraphParser::chain(10));
        let crawler = ParallelCrawler::new(parser.clone());
        let result = crawler
            .crawl(&request(vec!["http://x/p0".to_string()], depth, &[]))
            .await;

        assert_eq!(result.urls_visited, depth as usize);
        assert_eq!(parser.calls(), depth as usize);
        // The page at link distance `depth` is never visited
        assert_eq!(result.count_of(&format!("w{}", depth)), None);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_dense_graph_each_url_parsed_once() {
    let parser = Arc::new(GraphParser::complete(40));
    let crawler = ParallelCrawler::new(parser.clone());
    let seeds = (0..40).map(|i| format!("http://x/p{}", i)).collect();

    let result = crawler.crawl(&request(seeds, 5, &[])).await;

    assert_eq!(result.urls_visited, 40);
    assert_eq!(parser.calls(), 40);
    assert_eq!(parser.max_calls_for_one_url(), 1);
    assert_eq!(result.word_counts, vec![("shared".to_string(), 40)]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_seeds_without_links() {
    let parser = Arc::new(GraphParser::default());
    let crawler = ParallelCrawler::new(parser);
    let seeds = vec![
        "http://x/a".to_string(),
        "http://x/b".to_string(),
        "http://x/a".to_string(),
        "http://x/skip".to_string(),
    ];

    let result = crawler
        .crawl(&request(seeds, 1, &["http://x/skip".to_string()]))
        .await;

    // Distinct, non-ignored seeds only; pages without words report nothing
    assert_eq!(result.urls_visited, 2);
    assert!(result.word_counts.is_empty());
}
