//! Locator-routing fetcher: URLs over HTTP, everything else from disk.

use async_trait::async_trait;
use std::time::Duration;
use url::Url;

use super::{FileFetcher, HttpFetcher};
use crate::error::FetchResult;
use crate::traits::fetcher::Fetcher;

/// Default fetcher for configured sources.
#[derive(Default)]
pub struct SourceFetcher {
    http: HttpFetcher,
    file: FileFetcher,
}

impl SourceFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTTP request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = self.http.with_timeout(timeout);
        self
    }
}

/// True for http(s) URLs.
pub fn is_remote(locator: &str) -> bool {
    Url::parse(locator)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

#[async_trait]
impl Fetcher for SourceFetcher {
    async fn fetch(&self, locator: &str) -> FetchResult<String> {
        if is_remote(locator) {
            self.http.fetch(locator).await
        } else {
            self.file.fetch(locator).await
        }
    }

    fn name(&self) -> &str {
        "source"
    }
}
