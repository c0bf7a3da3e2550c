//! Source aggregation - fetch every feed of a category and union the results.
//!
//! Fetches run through a bounded pool (`buffer_unordered`), each wrapped in a
//! timeout. A feed that fails contributes nothing; the run always completes.

use std::path::Path;

use futures::stream::{self, StreamExt};

use crate::error::error_chain;
use crate::overrides::custom_domains;
use crate::pipeline::dispatch;
use crate::traits::fetcher::Fetcher;
use crate::traits::observer::{CollectEvent, Observer, TracingObserver};
use crate::types::config::CollectConfig;
use crate::types::domain::DomainSet;
use crate::types::source::SourceDescriptor;

/// Collects the domain set of one category (domestic or foreign).
///
/// # Example
///
/// ```rust,ignore
/// use domain_feeds::{Collector, SourceFetcher};
///
/// let collector = Collector::new(SourceFetcher::new());
/// let domains = collector
///     .collect(&sources, Some(Path::new("config/custom_cn_domains.txt")))
///     .await;
/// ```
pub struct Collector<F: Fetcher, O: Observer = TracingObserver> {
    fetcher: F,
    observer: O,
    config: CollectConfig,
}

impl<F: Fetcher> Collector<F> {
    /// Create a collector that reports through `tracing`.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            observer: TracingObserver,
            config: CollectConfig::default(),
        }
    }
}

impl<F: Fetcher, O: Observer> Collector<F, O> {
    /// Replace the observer.
    pub fn with_observer<O2: Observer>(self, observer: O2) -> Collector<F, O2> {
        Collector {
            fetcher: self.fetcher,
            observer,
            config: self.config,
        }
    }

    /// Set the collection config.
    pub fn with_config(mut self, config: CollectConfig) -> Self {
        self.config = config;
        self
    }

    /// Fetch, extract and union every source, then merge the custom file.
    ///
    /// The custom file is optional; a missing file is not an error.
    pub async fn collect(&self, sources: &[String], custom_file: Option<&Path>) -> DomainSet {
        let descriptors: Vec<SourceDescriptor> =
            sources.iter().map(|s| SourceDescriptor::new(s.as_str())).collect();

        let per_source: Vec<DomainSet> = stream::iter(descriptors.iter())
            .map(|descriptor| self.collect_one(descriptor))
            .buffer_unordered(self.config.concurrency.max(1))
            .collect()
            .await;

        let mut domains = per_source
            .into_iter()
            .fold(DomainSet::new(), |mut acc, found| {
                acc.union_with(found);
                acc
            });

        if let Some(path) = custom_file {
            domains.union_with(self.read_custom(path).await);
        }

        self.observer.on_event(CollectEvent::Collected {
            sources: sources.len(),
            total: domains.len(),
        });

        domains
    }

    /// Fetch and extract a single source.
    async fn collect_one(&self, descriptor: &SourceDescriptor) -> DomainSet {
        let source = descriptor.locator.clone();
        self.observer.on_event(CollectEvent::FetchStarted {
            source: source.clone(),
        });

        let fetched =
            tokio::time::timeout(self.config.fetch_timeout, self.fetcher.fetch(&source)).await;

        let content = match fetched {
            Ok(Ok(content)) => content,
            Ok(Err(e)) => {
                self.observer.on_event(CollectEvent::FetchFailed {
                    source,
                    error: error_chain(&e),
                });
                return DomainSet::new();
            }
            Err(_) => {
                self.observer.on_event(CollectEvent::FetchFailed {
                    source,
                    error: format!(
                        "timed out after {}s",
                        self.config.fetch_timeout.as_secs_f64()
                    ),
                });
                return DomainSet::new();
            }
        };

        if content.trim().is_empty() {
            self.observer.on_event(CollectEvent::SourceEmpty { source });
            return DomainSet::new();
        }

        let domains = dispatch::extract_as(&content, descriptor.format);
        self.observer.on_event(CollectEvent::SourceExtracted {
            source,
            format: descriptor.format,
            count: domains.len(),
        });
        domains
    }

    async fn read_custom(&self, path: &Path) -> DomainSet {
        let parsed = match custom_domains::read(path).await {
            Ok(Some(parsed)) => parsed,
            Ok(None) => return DomainSet::new(),
            Err(e) => {
                self.observer.on_event(CollectEvent::CustomReadFailed {
                    path: path.to_path_buf(),
                    error: error_chain(&e),
                });
                return DomainSet::new();
            }
        };

        for rejected in parsed.rejected {
            self.observer.on_event(CollectEvent::CustomLineRejected {
                path: path.to_path_buf(),
                line_number: rejected.line_number,
                line: rejected.line,
                reason: rejected.reason,
            });
        }

        self.observer.on_event(CollectEvent::CustomMerged {
            path: path.to_path_buf(),
            count: parsed.domains.len(),
        });
        parsed.domains
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetchers::MockFetcher;
    use crate::testing::RecordingObserver;
    use std::time::Duration;

    const YAML_URL: &str = "https://example.com/Providers/ChinaDomain.yaml";
    const CONF_URL: &str = "https://example.com/accelerated-domains.china.conf";

    fn sources(urls: &[&str]) -> Vec<String> {
        urls.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_union_across_sources() {
        let fetcher = MockFetcher::new()
            .with_content(YAML_URL, "payload:\n  - DOMAIN-SUFFIX,baidu.com\n  - qq.com\n")
            .with_content(CONF_URL, "server=/qq.com/114.114.114.114\nserver=/163.com/114.114.114.114\n");

        let collector = Collector::new(fetcher.clone());
        let domains = collector.collect(&sources(&[YAML_URL, CONF_URL]), None).await;

        let list: Vec<&str> = domains.iter().map(|d| d.as_str()).collect();
        assert_eq!(list, vec!["163.com", "baidu.com", "qq.com"]);
        assert_eq!(fetcher.fetch_call_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_source_is_skipped() {
        let fetcher = MockFetcher::new()
            .with_content(YAML_URL, "payload:\n  - baidu.com\n")
            .with_failure(CONF_URL, 404);
        let observer = RecordingObserver::new();

        let collector = Collector::new(fetcher).with_observer(observer.clone());
        let domains = collector.collect(&sources(&[YAML_URL, CONF_URL]), None).await;

        assert_eq!(domains.len(), 1);
        assert!(observer
            .events()
            .iter()
            .any(|e| matches!(e, CollectEvent::FetchFailed { source, .. } if source == CONF_URL)));
    }

    #[tokio::test]
    async fn test_timeout_yields_nothing() {
        let fetcher = MockFetcher::new()
            .with_content(YAML_URL, "payload:\n  - baidu.com\n")
            .with_content(CONF_URL, "server=/qq.com/114.114.114.114\n")
            .with_delay(CONF_URL, Duration::from_secs(5));
        let observer = RecordingObserver::new();

        let collector = Collector::new(fetcher)
            .with_observer(observer.clone())
            .with_config(CollectConfig::new().with_fetch_timeout(Duration::from_millis(50)));
        let domains = collector.collect(&sources(&[YAML_URL, CONF_URL]), None).await;

        assert!(domains.contains("baidu.com"));
        assert!(!domains.contains("qq.com"));
        assert_eq!(observer.count(|e| matches!(e, CollectEvent::FetchFailed { .. })), 1);
    }

    #[tokio::test]
    async fn test_sequential_preserves_fetch_order() {
        let fetcher = MockFetcher::new()
            .with_content(YAML_URL, "payload:\n  - baidu.com\n")
            .with_content(CONF_URL, "server=/qq.com/114.114.114.114\n");

        let collector =
            Collector::new(fetcher.clone()).with_config(CollectConfig::new().sequential());
        collector.collect(&sources(&[CONF_URL, YAML_URL]), None).await;

        assert_eq!(fetcher.fetch_calls(), sources(&[CONF_URL, YAML_URL]));
    }

    #[tokio::test]
    async fn test_empty_content_reported() {
        let fetcher = MockFetcher::new().with_content(YAML_URL, "  \n");
        let observer = RecordingObserver::new();

        let collector = Collector::new(fetcher).with_observer(observer.clone());
        let domains = collector.collect(&sources(&[YAML_URL]), None).await;

        assert!(domains.is_empty());
        assert_eq!(observer.count(|e| matches!(e, CollectEvent::SourceEmpty { .. })), 1);
    }

    #[tokio::test]
    async fn test_custom_file_merged_last() {
        let dir = tempfile::tempdir().unwrap();
        let custom = dir.path().join("custom_cn_domains.txt");
        tokio::fs::write(&custom, "# mine\nmine.example.com\ncn\nnot a domain\n")
            .await
            .unwrap();

        let fetcher = MockFetcher::new().with_content(YAML_URL, "payload:\n  - baidu.com\n");
        let observer = RecordingObserver::new();

        let collector = Collector::new(fetcher).with_observer(observer.clone());
        let domains = collector
            .collect(&sources(&[YAML_URL]), Some(custom.as_path()))
            .await;

        let list: Vec<&str> = domains.iter().map(|d| d.as_str()).collect();
        assert_eq!(list, vec!["baidu.com", "cn", "mine.example.com"]);

        let rejected: Vec<usize> = observer
            .events()
            .into_iter()
            .filter_map(|e| match e {
                CollectEvent::CustomLineRejected { line_number, .. } => Some(line_number),
                _ => None,
            })
            .collect();
        assert_eq!(rejected, vec![4]);
    }

    #[tokio::test]
    async fn test_missing_custom_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let collector = Collector::new(MockFetcher::new());
        let domains = collector
            .collect(&[], Some(dir.path().join("absent.txt").as_path()))
            .await;
        assert!(domains.is_empty());
    }
}
