//! Adblock filter lists (`||ads.example.com^`).

use lazy_static::lazy_static;
use regex::Regex;

use super::line::{self, FILTER_COMMENTS};
use super::Extractor;
use crate::types::domain::{Domain, DomainSet};
use crate::types::source::SourceFormat;

/// Prefix of exception (allow) rules.
pub(crate) const EXCEPTION_PREFIX: &str = "@@";

lazy_static! {
    static ref ANCHORED_REGEX: Regex = Regex::new(
        r"(?i)^\|\|([a-z0-9][-a-z0-9]*(?:\.[a-z0-9][-a-z0-9]*)+)\^"
    ).unwrap();
}

/// `||domain^` anchored rule.
pub(crate) fn anchored_domain(line: &str) -> Option<Domain> {
    let caps = ANCHORED_REGEX.captures(line)?;
    Domain::parse(caps.get(1)?.as_str())
}

/// Extracts blocked domains from Adblock-syntax lists.
///
/// Exception rules (`@@...`) name allowed hosts and contribute nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdblockExtractor;

impl Extractor for AdblockExtractor {
    fn format(&self) -> SourceFormat {
        SourceFormat::Adblock
    }

    fn extract(&self, content: &str) -> DomainSet {
        let mut domains = DomainSet::new();

        for line in line::content_lines(content, FILTER_COMMENTS) {
            if line.starts_with(EXCEPTION_PREFIX) {
                continue;
            }
            if let Some(domain) = anchored_domain(line).or_else(|| line::match_line(line)) {
                domains.insert(domain);
            }
        }

        domains
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(content: &str) -> Vec<String> {
        AdblockExtractor.extract(content).into_iter().map(String::from).collect()
    }

    #[test]
    fn test_anchored_rule() {
        assert_eq!(extract("||ads.example.com^\n!comment\n"), vec!["ads.example.com"]);
    }

    #[test]
    fn test_rule_options_and_headers() {
        let content = "\
[Adblock Plus 2.0]
! Title: test list
||tracker.example.net^$third-party
||cdn.example.org^
# hash comment
";
        assert_eq!(extract(content), vec!["cdn.example.org", "tracker.example.net"]);
    }

    #[test]
    fn test_exceptions_and_cosmetic_rules() {
        let content = "\
@@||allowed.example.com^
example.com##.banner
||*.wild^
";
        assert_eq!(extract(content), Vec::<String>::new());
    }

    #[test]
    fn test_plain_domains_and_urls() {
        let content = "plain.example.com\n|https://url.example.com/path\n";
        assert_eq!(extract(content), vec!["plain.example.com", "url.example.com"]);
    }
}
