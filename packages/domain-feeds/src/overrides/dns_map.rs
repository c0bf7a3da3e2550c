//! Per-domain DNS upstream assignments (`custom_domain_dns.txt`).
//!
//! ```text
//! # domains : upstreams
//! a.com/b.com: 1.1.1.1, 8.8.8.8
//! *.corp.example: 10.0.0.53
//! ```
//!
//! A `*.base` pattern covers `base` and everything below it. A later line
//! naming the same pattern replaces the earlier assignment.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use super::{numbered_lines, read_optional, RejectedLine};
use crate::error::OverrideResult;
use crate::types::domain::Domain;

const WILDCARD_PREFIX: &str = "*.";

/// A domain entry on the left side of a mapping line.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum DomainPattern {
    /// Matches only this domain
    Exact(Domain),
    /// `*.base`: matches `base` and its subdomains
    Wildcard(Domain),
}

impl DomainPattern {
    /// Parse one entry: host name, suffix token or `*.`-wildcard over a host name.
    pub fn parse(entry: &str) -> Option<Self> {
        match entry.strip_prefix(WILDCARD_PREFIX) {
            Some(base) => Domain::parse(base).map(Self::Wildcard),
            None => Domain::parse(entry)
                .or_else(|| Domain::suffix_token(entry))
                .map(Self::Exact),
        }
    }

    pub fn matches(&self, domain: &Domain) -> bool {
        match self {
            Self::Exact(exact) => exact == domain,
            Self::Wildcard(base) => domain.is_within(base.as_str()),
        }
    }
}

impl fmt::Display for DomainPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(domain) => write!(f, "{}", domain),
            Self::Wildcard(base) => write!(f, "{}{}", WILDCARD_PREFIX, base),
        }
    }
}

/// One mapping line: patterns sharing an ordered upstream list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsOverride {
    pub patterns: Vec<DomainPattern>,
    pub endpoints: Vec<String>,
}

/// All overrides of a file, in file order and keyed by pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnsMap {
    groups: Vec<DnsOverride>,
    by_pattern: BTreeMap<String, Vec<String>>,
    patterns: Vec<DomainPattern>,
    rejected: Vec<RejectedLine>,
}

impl DnsMap {
    /// Parse a mapping file. Bad lines and bad entries are recorded, not fatal.
    pub fn parse(content: &str) -> Self {
        let mut map = Self::default();

        for (line_number, line) in numbered_lines(content) {
            let Some((domains_part, dns_part)) = line.split_once(':') else {
                map.reject(line_number, line, "missing ':' separator");
                continue;
            };

            let endpoints: Vec<String> = dns_part
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();

            let entries: Vec<&str> = domains_part
                .split('/')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();

            if entries.is_empty() {
                map.reject(line_number, line, "no domains before ':'");
                continue;
            }
            if endpoints.is_empty() {
                map.reject(line_number, line, "no DNS servers after ':'");
                continue;
            }

            let mut patterns = Vec::with_capacity(entries.len());
            for entry in entries {
                match DomainPattern::parse(entry) {
                    Some(pattern) => patterns.push(pattern),
                    None => map.reject(line_number, entry, "invalid domain entry"),
                }
            }

            if patterns.is_empty() {
                continue;
            }
            map.insert(DnsOverride {
                patterns,
                endpoints,
            });
        }

        map
    }

    /// Read and parse a mapping file. A missing file yields an empty map.
    pub async fn read(path: &Path) -> OverrideResult<Self> {
        Ok(read_optional(path)
            .await?
            .as_deref()
            .map(Self::parse)
            .unwrap_or_default())
    }

    fn reject(&mut self, line_number: usize, line: &str, reason: &str) {
        self.rejected.push(RejectedLine::new(line_number, line, reason));
    }

    fn insert(&mut self, group: DnsOverride) {
        for pattern in &group.patterns {
            let key = pattern.to_string();
            if self
                .by_pattern
                .insert(key, group.endpoints.clone())
                .is_none()
            {
                self.patterns.push(pattern.clone());
            }
        }
        self.groups.push(group);
    }

    /// Mapping lines in file order.
    pub fn groups(&self) -> &[DnsOverride] {
        &self.groups
    }

    /// `(pattern, endpoints)` pairs sorted by pattern text.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.by_pattern
            .iter()
            .map(|(pattern, endpoints)| (pattern.as_str(), endpoints.as_slice()))
    }

    /// Upstreams assigned to a pattern, by its text form.
    pub fn endpoints_for(&self, pattern: &str) -> Option<&[String]> {
        self.by_pattern.get(pattern).map(Vec::as_slice)
    }

    /// Whether any override pattern applies to `domain`.
    pub fn covers(&self, domain: &Domain) -> bool {
        self.patterns.iter().any(|p| p.matches(domain))
    }

    /// Lines or entries that were skipped.
    pub fn rejected(&self) -> &[RejectedLine] {
        &self.rejected
    }

    /// Number of distinct patterns.
    pub fn len(&self) -> usize {
        self.by_pattern.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_pattern.is_empty()
    }
}
