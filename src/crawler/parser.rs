//! Page parsing capability and HTML extraction
//!
//! The crawl engine only sees the `PageParser` trait. This module also holds
//! the HTML extraction used by the HTTP implementation:
//! - Words from the visible body text, counted
//! - Links to follow (from <a> tags)

use crate::state::WordCounts;
use crate::url::IgnoreList;
use crate::RippleError;
use async_trait::async_trait;
use scraper::{Html, Node, Selector};
use url::Url;

/// Words and outbound links extracted from one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageParseResult {
    /// Occurrences of each word on the page
    pub word_counts: WordCounts,

    /// Absolute URLs linked from the page, in document order
    pub links: Vec<String>,
}

/// Fetches and parses a page
///
/// Implementations may be slow and may fail; the crawler treats a failure as
/// "skip this URL" and carries on with the rest of the crawl.
#[async_trait]
pub trait PageParser: Send + Sync {
    /// Returns the word counts and outbound links of the page at `url`
    async fn parse(&self, url: &str) -> Result<PageParseResult, RippleError>;
}

/// Elements whose text is never counted as page words
const NON_CONTENT_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Parses HTML content and extracts word counts and links
///
/// # Word Extraction Rules
///
/// - Only text inside `<body>` is considered, skipping `<script>`, `<style>`,
///   `<noscript>` and `<template>` content
/// - Text is split on whitespace; each token keeps its alphanumeric
///   characters only and is lower-cased
/// - Empty tokens and tokens fully matching an ignored-word pattern are dropped
///
/// # Link Extraction Rules
///
/// **Include:** `<a href="...">` tags, resolved against `base_url`
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links and data URIs
/// - Fragment-only links
/// - Non-HTTP(S) URLs after resolution
///
/// Fragments are removed from resolved links so that anchors into the same
/// page are crawled once.
///
/// # Example
///
/// ```
/// use web_ripple::crawler::parse_html;
/// use web_ripple::url::IgnoreList;
/// use url::Url;
///
/// let html = r#"<html><body><p>Go go lang</p><a href="/next">next</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let page = parse_html(html, &base_url, &IgnoreList::empty());
/// assert_eq!(page.word_counts["go"], 2);
/// assert_eq!(page.links, vec!["https://example.com/next".to_string()]);
/// ```
pub fn parse_html(html: &str, base_url: &Url, ignored_words: &IgnoreList) -> PageParseResult {
    let document = Html::parse_document(html);

    PageParseResult {
        word_counts: extract_words(&document, ignored_words),
        links: extract_links(&document, base_url),
    }
}

/// Counts the words of the document body
fn extract_words(document: &Html, ignored_words: &IgnoreList) -> WordCounts {
    let mut counts = WordCounts::new();

    let body = match Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next())
    {
        Some(body) => body,
        None => return counts,
    };

    for node in body.descendants() {
        let text = match node.value() {
            Node::Text(text) => text,
            _ => continue,
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map_or(false, |e| NON_CONTENT_ELEMENTS.contains(&e.name()))
        });
        if hidden {
            continue;
        }

        for token in text.split_whitespace() {
            if let Some(word) = normalize_word(token, ignored_words) {
                *counts.entry(word).or_insert(0) += 1;
            }
        }
    }

    counts
}

/// Reduces a raw token to a countable word, or None if it must be skipped
fn normalize_word(token: &str, ignored_words: &IgnoreList) -> Option<String> {
    let word: String = token
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();

    if word.is_empty() || ignored_words.matches(&word) {
        return None;
    }

    Some(word)
}

/// Extracts all valid links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            // Skip if it has the download attribute
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let mut absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() != "http" && absolute_url.scheme() != "https" {
        return None;
    }

    absolute_url.set_fragment(None);
    Some(absolute_url.to_string())
}
