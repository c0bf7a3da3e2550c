//! Format-specific domain extractors.
//!
//! Every extractor maps raw text to a [`DomainSet`]. Malformed lines
//! contribute nothing; content-level failures (bad YAML, bad Base64) are
//! logged and degrade to a weaker textual pass, so `extract` is infallible.
//!
//! # Available Extractors
//!
//! - `YamlExtractor` - Clash rule providers and rule lists
//! - `DnsmasqExtractor` - `server=/domain/upstream` configs
//! - `AdblockExtractor` - `||domain^` filter lists
//! - `GfwListExtractor` - Base64-encoded GFWList
//! - `PlainTextExtractor` - one domain per line (hosts files too)
//! - `Blackmatrix7Extractor` - blackmatrix7 `*_Domain.txt` lists

mod adblock;
mod blackmatrix7;
mod dnsmasq;
mod gfwlist;
pub(crate) mod line;
mod plain;
mod yaml;

pub use adblock::AdblockExtractor;
pub use blackmatrix7::Blackmatrix7Extractor;
pub use dnsmasq::DnsmasqExtractor;
pub use gfwlist::GfwListExtractor;
pub use plain::PlainTextExtractor;
pub use yaml::YamlExtractor;

use crate::types::domain::DomainSet;
use crate::types::source::SourceFormat;

/// A strategy for pulling domains out of one content format.
pub trait Extractor: Send + Sync {
    /// The format this extractor reads.
    fn format(&self) -> SourceFormat;

    /// Extract every domain the content yields.
    fn extract(&self, content: &str) -> DomainSet;
}

/// The extractor for a concrete format, or `None` for [`SourceFormat::Unknown`].
pub fn extractor_for(format: SourceFormat) -> Option<&'static dyn Extractor> {
    match format {
        SourceFormat::Yaml => Some(&YamlExtractor),
        SourceFormat::Dnsmasq => Some(&DnsmasqExtractor),
        SourceFormat::GfwList => Some(&GfwListExtractor),
        SourceFormat::Adblock => Some(&AdblockExtractor),
        SourceFormat::PlainText => Some(&PlainTextExtractor),
        SourceFormat::Blackmatrix7 => Some(&Blackmatrix7Extractor),
        SourceFormat::Unknown => None,
    }
}
