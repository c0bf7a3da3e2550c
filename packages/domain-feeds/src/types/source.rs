//! Feed descriptors and the formats they can be routed to.

use std::fmt;

/// Content format of a feed, as inferred from its locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// Clash rule-provider / rule list in YAML
    Yaml,
    /// dnsmasq `server=/domain/upstream` configuration
    Dnsmasq,
    /// Base64-encoded GFWList (Adblock-like rules)
    GfwList,
    /// Adblock filter list (`||domain^`)
    Adblock,
    /// One domain per line
    PlainText,
    /// blackmatrix7 `*_Domain.txt` list with a header block
    Blackmatrix7,
    /// Nothing in the locator identifies the format
    Unknown,
}

impl SourceFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Dnsmasq => "dnsmasq-conf",
            Self::GfwList => "gfwlist",
            Self::Adblock => "adblock",
            Self::PlainText => "plain-text",
            Self::Blackmatrix7 => "blackmatrix7-domain",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured feed: where to fetch it and how to read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    /// URL or local path
    pub locator: String,

    /// Format chosen by the dispatcher
    pub format: SourceFormat,
}

impl SourceDescriptor {
    /// Describe a feed, routing its format from the locator.
    pub fn new(locator: impl Into<String>) -> Self {
        let locator = locator.into();
        let format = crate::pipeline::dispatch::route(&locator);
        Self { locator, format }
    }
}
