//! Local file fetcher.

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

use crate::error::{FetchError, FetchResult};
use crate::traits::fetcher::Fetcher;

/// Reads feeds from the local filesystem. `file://` prefixes are accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFetcher;

impl FileFetcher {
    pub fn new() -> Self {
        Self
    }

    fn path_of(locator: &str) -> FetchResult<PathBuf> {
        let raw = locator.strip_prefix("file://").unwrap_or(locator).trim();
        if raw.is_empty() {
            return Err(FetchError::InvalidLocator {
                locator: locator.to_string(),
            });
        }
        Ok(PathBuf::from(raw))
    }
}

#[async_trait]
impl Fetcher for FileFetcher {
    async fn fetch(&self, locator: &str) -> FetchResult<String> {
        let path = Self::path_of(locator)?;
        debug!(path = %path.display(), "Reading local source");

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| FetchError::Io { path, source })?;

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn name(&self) -> &str {
        "file"
    }
}
