//! Domain Feed Extraction Library
//!
//! Fetches domain-list feeds published in many formats (Clash YAML
//! providers, dnsmasq configs, Adblock lists, Base64 GFWList, plain lists,
//! blackmatrix7 domain lists) and reduces them to one normalized,
//! deduplicated domain set.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_feeds::{Collector, CollectConfig, SourceFetcher};
//!
//! let collector = Collector::new(SourceFetcher::new())
//!     .with_config(CollectConfig::new().with_concurrency(8));
//!
//! let cn = collector
//!     .collect(&cn_sources, Some(Path::new("config/custom_cn_domains.txt")))
//!     .await;
//! ```
//!
//! Single documents can be read without any I/O:
//!
//! ```rust
//! use domain_feeds::extract_by_source;
//!
//! let domains = extract_by_source("||ads.example.com^\n!comment\n", "filters.txt");
//! assert!(domains.contains("ads.example.com"));
//! ```
//!
//! # Modules
//!
//! - [`types`] - `Domain`, `DomainSet`, source descriptors, config
//! - [`extractors`] - one extractor per feed format
//! - [`pipeline`] - format dispatch and multi-source collection
//! - [`fetchers`] - HTTP, file and mock fetchers
//! - [`overrides`] - custom domain and custom DNS files
//! - [`traits`] - `Fetcher` and `Observer` seams
//! - [`testing`] - recording observer for tests

pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod overrides;
pub mod pipeline;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{ExtractError, FetchError, OverrideError};
pub use extractors::{extractor_for, Extractor};
pub use fetchers::{FileFetcher, HttpFetcher, MockFetcher, SourceFetcher};
pub use overrides::{
    custom_domains::CustomDomains,
    dns_map::{DnsMap, DnsOverride, DomainPattern},
    RejectedLine,
};
pub use pipeline::{extract_as, extract_by_source, route, Collector};
pub use traits::{
    fetcher::Fetcher,
    observer::{CollectEvent, Observer, TracingObserver},
};
pub use types::{
    config::CollectConfig,
    domain::{is_valid_domain, Domain, DomainSet},
    source::{SourceDescriptor, SourceFormat},
};

pub use testing::RecordingObserver;
