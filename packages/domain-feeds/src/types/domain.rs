//! Validated domain names and the sets built from them.

use std::borrow::Borrow;
use std::collections::btree_set::{self, BTreeSet};
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

/// Longest host name allowed (RFC 1035 presentation form, no trailing dot).
pub const MAX_DOMAIN_LEN: usize = 253;

/// Longest bare suffix token accepted from custom override files (`cn`, `hk`, ...).
pub const MAX_SUFFIX_TOKEN_LEN: usize = 5;

lazy_static! {
    // Labels of 1-63 chars, alphanumeric at both ends, at least two labels.
    static ref LABELS_REGEX: Regex = Regex::new(
        r"(?i)^[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)+$"
    ).unwrap();

    static ref IPV4_REGEX: Regex = Regex::new(r"^\d{1,3}(?:\.\d{1,3}){3}$").unwrap();
}

/// Check whether `candidate` is a syntactically valid host name.
///
/// One leading `.` is stripped first. Dotted-quad IPv4 literals are
/// rejected even though they satisfy the label grammar.
pub fn is_valid_domain(candidate: &str) -> bool {
    let domain = candidate.strip_prefix('.').unwrap_or(candidate);

    if domain.is_empty() || domain.len() > MAX_DOMAIN_LEN {
        return false;
    }
    if domain.ends_with('.') || domain.contains("..") {
        return false;
    }
    if IPV4_REGEX.is_match(domain) {
        return false;
    }

    LABELS_REGEX.is_match(domain)
}

/// A normalized host name.
///
/// Always lowercase, never carries a leading dot. Apart from bare suffix
/// tokens read from custom override files, every value has at least two
/// labels and passed [`is_valid_domain`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Domain(String);

impl Domain {
    /// Validate and normalize a candidate host name.
    ///
    /// Handles the leading-dot form (`.example.com`) as well.
    pub fn parse(candidate: &str) -> Option<Self> {
        if !is_valid_domain(candidate) {
            return None;
        }
        let domain = candidate.strip_prefix('.').unwrap_or(candidate);
        Some(Self(domain.to_ascii_lowercase()))
    }

    /// Accept a bare alphabetic token such as `cn` or `hk`.
    ///
    /// Only custom override files may contribute these.
    pub(crate) fn suffix_token(token: &str) -> Option<Self> {
        if token.is_empty()
            || token.len() > MAX_SUFFIX_TOKEN_LEN
            || !token.chars().all(|c| c.is_ascii_alphabetic())
        {
            return None;
        }
        Some(Self(token.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is a bare suffix token rather than a full host name.
    pub fn is_suffix_token(&self) -> bool {
        !self.0.contains('.')
    }

    /// Whether this domain equals `base` or is a subdomain of it.
    pub fn is_within(&self, base: &str) -> bool {
        self.0 == base
            || (self.0.len() > base.len()
                && self.0.ends_with(base)
                && self.0.as_bytes()[self.0.len() - base.len() - 1] == b'.')
    }

    /// The last two labels (`mail.example.com` -> `example.com`).
    pub fn second_level(&self) -> &str {
        match self.0.rmatch_indices('.').nth(1) {
            Some((idx, _)) => &self.0[idx + 1..],
            None => &self.0,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Domain {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<Domain> for String {
    fn from(domain: Domain) -> Self {
        domain.0
    }
}

/// A set of unique domains, iterated in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainSet(BTreeSet<Domain>);

impl DomainSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a domain, returning whether it was new.
    pub fn insert(&mut self, domain: Domain) -> bool {
        self.0.insert(domain)
    }

    /// Validate `candidate` and insert it if it is a domain.
    pub fn insert_candidate(&mut self, candidate: &str) -> bool {
        match Domain::parse(candidate) {
            Some(domain) => self.insert(domain),
            None => false,
        }
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.0.contains(domain)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, Domain> {
        self.0.iter()
    }

    /// Merge another set into this one.
    pub fn union_with(&mut self, other: DomainSet) {
        self.0.extend(other.0);
    }

    /// Domains in `self` that are not in `other`.
    pub fn difference(&self, other: &DomainSet) -> DomainSet {
        Self(self.0.difference(&other.0).cloned().collect())
    }
}

impl FromIterator<Domain> for DomainSet {
    fn from_iter<I: IntoIterator<Item = Domain>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Domain> for DomainSet {
    fn extend<I: IntoIterator<Item = Domain>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for DomainSet {
    type Item = Domain;
    type IntoIter = btree_set::IntoIter<Domain>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DomainSet {
    type Item = &'a Domain;
    type IntoIter = btree_set::Iter<'a, Domain>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
