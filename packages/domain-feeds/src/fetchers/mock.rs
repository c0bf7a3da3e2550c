//! Mock fetcher for testing.
//!
//! Provides a configurable mock implementation of the Fetcher trait.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{FetchError, FetchResult};
use crate::traits::fetcher::Fetcher;

/// Mock fetcher for testing.
///
/// Serves canned content by locator. Unknown locators fail with
/// `InvalidLocator`; failures and delays can be injected per locator.
///
/// # Example
///
/// ```rust
/// use domain_feeds::fetchers::MockFetcher;
///
/// let mock = MockFetcher::new().with_content("https://example.com/a.list", "example.com\n");
/// assert_eq!(mock.fetch_call_count(), 0);
/// ```
#[derive(Default)]
pub struct MockFetcher {
    /// Canned content indexed by locator
    contents: Arc<RwLock<HashMap<String, String>>>,
    /// Locators that fail with an HTTP status
    failures: Arc<RwLock<HashMap<String, u16>>>,
    /// Artificial latency per locator
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    /// Track calls for verification
    fetch_calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    /// Create a new empty mock fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add content served for `locator`.
    pub fn add_content(&self, locator: impl Into<String>, content: impl Into<String>) {
        let mut contents = self.contents.write().unwrap();
        contents.insert(locator.into(), content.into());
    }

    /// Make `locator` fail with the given HTTP status.
    pub fn add_failure(&self, locator: impl Into<String>, status: u16) {
        self.failures.write().unwrap().insert(locator.into(), status);
    }

    /// Delay responses for `locator`.
    pub fn add_delay(&self, locator: impl Into<String>, delay: Duration) {
        self.delays.write().unwrap().insert(locator.into(), delay);
    }

    /// Builder form of [`add_content`](Self::add_content).
    pub fn with_content(self, locator: impl Into<String>, content: impl Into<String>) -> Self {
        self.add_content(locator, content);
        self
    }

    /// Builder form of [`add_failure`](Self::add_failure).
    pub fn with_failure(self, locator: impl Into<String>, status: u16) -> Self {
        self.add_failure(locator, status);
        self
    }

    /// Builder form of [`add_delay`](Self::add_delay).
    pub fn with_delay(self, locator: impl Into<String>, delay: Duration) -> Self {
        self.add_delay(locator, delay);
        self
    }

    /// Get the number of times fetch was called.
    pub fn fetch_call_count(&self) -> usize {
        self.fetch_calls.read().unwrap().len()
    }

    /// Get the locators that were requested, in call order.
    pub fn fetch_calls(&self) -> Vec<String> {
        self.fetch_calls.read().unwrap().clone()
    }

    /// Clear all recorded calls.
    pub fn reset_calls(&self) {
        self.fetch_calls.write().unwrap().clear();
    }
}

impl Clone for MockFetcher {
    fn clone(&self) -> Self {
        Self {
            contents: Arc::clone(&self.contents),
            failures: Arc::clone(&self.failures),
            delays: Arc::clone(&self.delays),
            fetch_calls: Arc::clone(&self.fetch_calls),
        }
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, locator: &str) -> FetchResult<String> {
        // Record the call
        self.fetch_calls.write().unwrap().push(locator.to_string());

        let delay = self.delays.read().unwrap().get(locator).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(status) = self.failures.read().unwrap().get(locator) {
            return Err(FetchError::Status {
                url: locator.to_string(),
                status: *status,
            });
        }

        self.contents
            .read()
            .unwrap()
            .get(locator)
            .cloned()
            .ok_or_else(|| FetchError::InvalidLocator {
                locator: locator.to_string(),
            })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_serves_content() {
        let mock = MockFetcher::new()
            .with_content("https://example.com/a.list", "a.example.com\n")
            .with_content("https://example.com/b.list", "b.example.com\n");

        let content = mock.fetch("https://example.com/b.list").await.unwrap();
        assert_eq!(content, "b.example.com\n");

        let err = mock.fetch("https://example.com/missing").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidLocator { .. }));
    }

    #[tokio::test]
    async fn test_mock_failure_injection() {
        let mock = MockFetcher::new()
            .with_content("https://example.com/a.list", "a.example.com\n")
            .with_failure("https://example.com/a.list", 503);

        let err = mock.fetch("https://example.com/a.list").await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_mock_call_tracking() {
        let mock = MockFetcher::new();
        let shared = mock.clone();

        let _ = mock.fetch("one").await;
        let _ = shared.fetch("two").await;

        assert_eq!(mock.fetch_call_count(), 2);
        assert_eq!(mock.fetch_calls(), vec!["one".to_string(), "two".to_string()]);

        mock.reset_calls();
        assert_eq!(shared.fetch_call_count(), 0);
    }
}
