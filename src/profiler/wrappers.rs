use crate::crawler::{CrawlRequest, PageParseResult, PageParser, WebCrawler};
use crate::output::CrawlResult;
use crate::profiler::ProfilingState;
use crate::RippleError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

/// Page parser decorator that times every `parse` call
pub struct ProfiledParser<P> {
    inner: P,
    name: String,
    state: Arc<ProfilingState>,
}

impl<P> ProfiledParser<P> {
    pub(crate) fn new(inner: P, state: Arc<ProfilingState>) -> Self {
        Self {
            inner,
            name: short_type_name::<P>(),
            state,
        }
    }

    /// Returns the wrapped parser
    pub fn into_inner(self) -> P {
        self.inner
    }
}

#[async_trait]
impl<P: PageParser> PageParser for ProfiledParser<P> {
    async fn parse(&self, url: &str) -> Result<PageParseResult, RippleError> {
        let start = Instant::now();
        let result = self.inner.parse(url).await;
        self.state.record(&self.name, "parse", start.elapsed());
        result
    }
}

/// Crawler decorator that times every call
pub struct ProfiledCrawler<C> {
    inner: C,
    name: String,
    state: Arc<ProfilingState>,
}

impl<C> ProfiledCrawler<C> {
    pub(crate) fn new(inner: C, state: Arc<ProfilingState>) -> Self {
        Self {
            inner,
            name: short_type_name::<C>(),
            state,
        }
    }

    /// Returns the wrapped crawler
    pub fn into_inner(self) -> C {
        self.inner
    }
}

#[async_trait]
impl<C: WebCrawler> WebCrawler for ProfiledCrawler<C> {
    async fn crawl(&self, request: &CrawlRequest) -> CrawlResult {
        let start = Instant::now();
        let result = self.inner.crawl(request).await;
        self.state.record(&self.name, "crawl", start.elapsed());
        result
    }

    fn max_parallelism(&self) -> usize {
        let start = Instant::now();
        let result = self.inner.max_parallelism();
        self.state.record(&self.name, "max_parallelism", start.elapsed());
        result
    }
}

/// Type name without module path or generic arguments
///
/// `web_ripple::crawler::HttpPageParser` becomes `HttpPageParser`.
fn short_type_name<T>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}
