//! Line policy shared by the textual extractors.
//!
//! Each surviving line is tried against, in order: a Clash rule prefix,
//! the whole line as a domain (leading `.` included), a wildcard marker
//! (`+.` / `*.`), and the first `http(s)://` host in the line.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::domain::Domain;

/// Comment markers for YAML, plain text and dnsmasq content.
pub(crate) const HASH_COMMENTS: &[char] = &['#'];

/// Comment markers for Adblock-style content (Adblock, GFWList).
pub(crate) const FILTER_COMMENTS: &[char] = &['!', '#', '['];

/// Wildcard prefixes that mean "this domain and its subdomains".
const WILDCARD_MARKERS: &[&str] = &["+.", "*."];

lazy_static! {
    // DOMAIN,x / DOMAIN:x / DOMAIN-SUFFIX,x / DOMAIN-SUFFIX:x; trailing policy fields are dropped
    static ref RULE_PREFIX_REGEX: Regex =
        Regex::new(r#"(?i)\bDOMAIN(?:-SUFFIX)?[,:]\s*([^\s,'"]+)"#).unwrap();

    static ref URL_HOST_REGEX: Regex = Regex::new(
        r"(?i)https?://([a-z0-9][-a-z0-9]*(?:\.[a-z0-9][-a-z0-9]*)+)"
    ).unwrap();
}

/// Trimmed lines that are neither blank nor comments.
pub(crate) fn content_lines<'a>(
    content: &'a str,
    comment_markers: &'static [char],
) -> impl Iterator<Item = &'a str> + 'a {
    content
        .lines()
        .map(str::trim)
        .filter(move |line| !line.is_empty() && !line.starts_with(comment_markers))
}

/// Apply the full line policy.
pub(crate) fn match_line(line: &str) -> Option<Domain> {
    rule_prefix(line)
        .or_else(|| Domain::parse(line))
        .or_else(|| wildcard(line))
        .or_else(|| url_host(line))
}

/// Only the direct and leading-dot steps.
pub(crate) fn match_bare(line: &str) -> Option<Domain> {
    Domain::parse(line)
}

pub(crate) fn rule_prefix(line: &str) -> Option<Domain> {
    let caps = RULE_PREFIX_REGEX.captures(line)?;
    Domain::parse(caps.get(1)?.as_str().trim())
}

pub(crate) fn wildcard(line: &str) -> Option<Domain> {
    WILDCARD_MARKERS
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
        .and_then(Domain::parse)
}

pub(crate) fn url_host(line: &str) -> Option<Domain> {
    let caps = URL_HOST_REGEX.captures(line)?;
    Domain::parse(caps.get(1)?.as_str())
}

/// Strip a YAML list marker and surrounding quotes from a line.
pub(crate) fn peel_yaml_item(line: &str) -> &str {
    let item = line.strip_prefix('-').map(str::trim_start).unwrap_or(line);
    item.trim_matches(|c| c == '\'' || c == '"').trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(line: &str) -> Option<String> {
        match_line(line).map(String::from)
    }

    #[test]
    fn test_rule_prefix_forms() {
        assert_eq!(matched("DOMAIN,example.com"), Some("example.com".to_string()));
        assert_eq!(matched("DOMAIN:example.com"), Some("example.com".to_string()));
        assert_eq!(matched("DOMAIN-SUFFIX,google.com"), Some("google.com".to_string()));
        assert_eq!(matched("domain-suffix: google.com"), Some("google.com".to_string()));
        assert_eq!(
            matched("- DOMAIN-SUFFIX,google.com,Proxy"),
            Some("google.com".to_string())
        );
        assert_eq!(matched("  - 'DOMAIN,foo.org'"), Some("foo.org".to_string()));
    }

    #[test]
    fn test_keyword_rules_are_not_domains() {
        assert_eq!(matched("DOMAIN-KEYWORD,google"), None);
        assert_eq!(matched("IP-CIDR,10.0.0.0/8"), None);
    }

    #[test]
    fn test_direct_and_leading_dot() {
        assert_eq!(matched("example.com"), Some("example.com".to_string()));
        assert_eq!(matched(".example.com"), Some("example.com".to_string()));
        assert_eq!(matched("+.example.com"), Some("example.com".to_string()));
        assert_eq!(matched("*.example.com"), Some("example.com".to_string()));
    }

    #[test]
    fn test_url_host() {
        assert_eq!(
            matched("see https://cdn.example.net/path?q=1 for details"),
            Some("cdn.example.net".to_string())
        );
        assert_eq!(matched("http://10.0.0.1/admin"), None);
    }

    #[test]
    fn test_garbage_yields_nothing() {
        for line in ["payload:", "hello world", "1.2.3.4", "||", "server=/"] {
            assert_eq!(matched(line), None, "line {:?}", line);
        }
    }

    #[test]
    fn test_content_lines_skips_comments_and_blanks() {
        let content = "a.com\n\n  # note\n! filter comment\n  b.com  \r\n";
        let lines: Vec<&str> = content_lines(content, HASH_COMMENTS).collect();
        assert_eq!(lines, vec!["a.com", "! filter comment", "b.com"]);

        let lines: Vec<&str> = content_lines(content, FILTER_COMMENTS).collect();
        assert_eq!(lines, vec!["a.com", "b.com"]);
    }

    #[test]
    fn test_peel_yaml_item() {
        assert_eq!(peel_yaml_item("- 'example.com'"), "example.com");
        assert_eq!(peel_yaml_item("-  \"+.example.com\""), "+.example.com");
        assert_eq!(peel_yaml_item("example.com"), "example.com");
    }
}
