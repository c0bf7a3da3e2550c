//! Fetcher trait for pluggable feed retrieval.
//!
//! A fetcher turns a locator (URL or local path) into text. It knows
//! nothing about formats; the dispatcher decides how the text is read.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_feeds::{Fetcher, SourceFetcher};
//!
//! let fetcher = SourceFetcher::new();
//! let content = fetcher.fetch("https://example.com/gfwlist.txt").await?;
//! ```

use async_trait::async_trait;

use crate::error::FetchResult;

/// Retrieves the raw text of a feed.
///
/// Implementations:
/// - `HttpFetcher` - http(s) URLs via reqwest
/// - `FileFetcher` - local files
/// - `SourceFetcher` - routes between the two by locator
/// - `MockFetcher` - canned content for tests
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the content behind `locator`, decoded as UTF-8 (invalid bytes replaced).
    async fn fetch(&self, locator: &str) -> FetchResult<String>;

    /// Get the fetcher name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for std::sync::Arc<F> {
    async fn fetch(&self, locator: &str) -> FetchResult<String> {
        (**self).fetch(locator).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
