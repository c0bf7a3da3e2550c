//! Configuration for collection runs.

use std::time::Duration;

/// Default number of feeds fetched at once.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Default per-feed fetch timeout.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for a [`Collector`](crate::pipeline::collect::Collector).
#[derive(Debug, Clone)]
pub struct CollectConfig {
    /// Maximum feeds fetched concurrently (1 = strictly sequential).
    pub concurrency: usize,

    /// Upper bound on a single fetch, enforced on top of the fetcher's own timeout.
    pub fetch_timeout: Duration,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl CollectConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set concurrency. Zero is treated as one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set the per-feed fetch timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Fetch one feed at a time.
    pub fn sequential(self) -> Self {
        self.with_concurrency(1)
    }
}
