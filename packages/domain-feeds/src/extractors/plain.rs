//! One domain per line, including hosts-file style lines.

use std::net::IpAddr;

use super::line::{self, HASH_COMMENTS};
use super::Extractor;
use crate::types::domain::{Domain, DomainSet};
use crate::types::source::SourceFormat;

/// Marker of the metadata header some published lists start with.
const HEADER_MARKER: &str = "NAME:";

/// Extracts domains from plain line-oriented lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

/// `0.0.0.0 ads.example.com` -> `ads.example.com`.
fn hosts_entry(line: &str) -> Option<Domain> {
    let mut fields = line.split_whitespace();
    fields.next()?.parse::<IpAddr>().ok()?;
    Domain::parse(fields.next()?)
}

impl Extractor for PlainTextExtractor {
    fn format(&self) -> SourceFormat {
        SourceFormat::PlainText
    }

    fn extract(&self, content: &str) -> DomainSet {
        let mut domains = DomainSet::new();
        let mut header_passed = false;

        for line in line::content_lines(content, HASH_COMMENTS) {
            if !header_passed && line.contains(HEADER_MARKER) {
                header_passed = true;
                continue;
            }
            if let Some(domain) = line::match_line(line).or_else(|| hosts_entry(line)) {
                domains.insert(domain);
            }
        }

        domains
    }
}
