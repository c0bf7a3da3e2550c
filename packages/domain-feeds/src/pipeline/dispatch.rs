//! Format routing - pick extractors from a source locator.
//!
//! Routing is a pure function of the locator. Only the unknown-format path
//! looks at extractor output, to decide whether further probing is needed.

use tracing::debug;

use crate::extractors::{extractor_for, Extractor, PlainTextExtractor};
use crate::fetchers::is_remote;
use crate::types::domain::DomainSet;
use crate::types::source::SourceFormat;

/// blackmatrix7 list filenames, matched anywhere in the locator.
const BLACKMATRIX7_TOKENS: &[&str] = &[
    "proxy_domain.txt",
    "chinamax_domain.txt",
    "china_domain.txt",
];

/// Below this many plain-text hits an unknown source is probed with every format.
pub const PROBE_THRESHOLD: usize = 10;

/// Formats tried, in order, when probing an unknown source.
pub const PROBE_ORDER: [SourceFormat; 4] = [
    SourceFormat::Yaml,
    SourceFormat::Dnsmasq,
    SourceFormat::Adblock,
    SourceFormat::GfwList,
];

/// Last path segment of a URL or file path.
///
/// Query and fragment are only stripped from URLs; `?` and `#` are legal
/// in local file names.
fn basename(locator: &str) -> &str {
    let path = if is_remote(locator) {
        locator.split(['?', '#']).next().unwrap_or(locator)
    } else {
        locator
    };
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Decide the format of a source from its locator.
pub fn route(source_id: &str) -> SourceFormat {
    let lowered = source_id.to_lowercase();
    let file_name = basename(&lowered);

    if BLACKMATRIX7_TOKENS.iter().any(|t| lowered.contains(t)) {
        SourceFormat::Blackmatrix7
    } else if file_name.ends_with(".yaml") || file_name.ends_with(".yml") {
        SourceFormat::Yaml
    } else if file_name.ends_with(".conf") {
        SourceFormat::Dnsmasq
    } else if file_name == "gfwlist.txt" {
        SourceFormat::GfwList
    } else if file_name.contains(".list") {
        SourceFormat::PlainText
    } else {
        SourceFormat::Unknown
    }
}

/// Extract domains from content, choosing extractors by the source locator.
pub fn extract_by_source(content: &str, source_id: &str) -> DomainSet {
    extract_as(content, route(source_id))
}

/// Extract domains from content of a known (or unknown) format.
pub fn extract_as(content: &str, format: SourceFormat) -> DomainSet {
    match extractor_for(format) {
        Some(extractor) => {
            let domains = extractor.extract(content);
            debug!(format = %format, count = domains.len(), "extracted domains");
            domains
        }
        None => probe(content),
    }
}

/// Plain text first, then every format in [`PROBE_ORDER`] if that found little.
fn probe(content: &str) -> DomainSet {
    let mut domains = PlainTextExtractor.extract(content);
    debug!(count = domains.len(), "unknown format, plain-text pass");

    if domains.len() >= PROBE_THRESHOLD {
        return domains;
    }

    for extractor in PROBE_ORDER.iter().filter_map(|f| extractor_for(*f)) {
        let found = extractor.extract(content);
        if !found.is_empty() {
            debug!(format = %extractor.format(), count = found.len(), "probe found domains");
        }
        domains.union_with(found);
    }

    domains
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;

    #[test]
    fn test_route_priority() {
        let cases = [
            (
                "https://raw.githubusercontent.com/blackmatrix7/ios_rule_script/master/rule/Clash/Proxy/Proxy_Domain.txt",
                SourceFormat::Blackmatrix7,
            ),
            ("https://example.com/ChinaMax_Domain.txt", SourceFormat::Blackmatrix7),
            ("https://example.com/China_Domain.txt", SourceFormat::Blackmatrix7),
            ("https://example.com/Providers/ChinaDomain.yaml", SourceFormat::Yaml),
            ("https://example.com/rules.YML", SourceFormat::Yaml),
            (
                "https://example.com/accelerated-domains.china.conf",
                SourceFormat::Dnsmasq,
            ),
            (
                "https://raw.githubusercontent.com/gfwlist/gfwlist/master/gfwlist.txt",
                SourceFormat::GfwList,
            ),
            ("https://example.com/Clash/Proxy.list", SourceFormat::PlainText),
            ("/etc/lists/custom.list.txt", SourceFormat::PlainText),
            ("https://example.com/hosts", SourceFormat::Unknown),
            ("https://example.com/notgfwlist.txt", SourceFormat::Unknown),
        ];

        for (locator, expected) in cases {
            assert_eq!(route(locator), expected, "locator {}", locator);
        }
    }

    #[test]
    fn test_route_ignores_query_string() {
        assert_eq!(route("https://example.com/a.yaml?token=x"), SourceFormat::Yaml);
        assert_eq!(route("https://example.com/a.conf#top"), SourceFormat::Dnsmasq);
        assert_eq!(route("C:\\lists\\gfwlist.txt"), SourceFormat::GfwList);
    }

    #[test]
    fn test_route_local_path_keeps_hash_and_question_mark() {
        assert_eq!(route("/srv/my#lists/a.conf"), SourceFormat::Dnsmasq);
        assert_eq!(route("/srv/what?/rules.yaml"), SourceFormat::Yaml);
        assert_eq!(route("/srv/lists/a.conf#old"), SourceFormat::Unknown);
    }

    #[test]
    fn test_route_depends_only_on_locator() {
        let locator = "https://example.com/list.conf";
        for content in ["", "server=/a.com/1.1.1.1", "payload:\n  - b.com\n"] {
            let _ = extract_by_source(content, locator);
            assert_eq!(route(locator), SourceFormat::Dnsmasq);
        }
    }

    #[test]
    fn test_known_format_does_not_probe() {
        // Adblock syntax in a .yaml locator is not picked up by the YAML extractor
        let content = "||ads.example.com^\n";
        assert!(extract_by_source(content, "https://example.com/a.yaml").is_empty());
    }

    #[test]
    fn test_unknown_source_probes_other_formats() {
        let content = "\
a.example.com
b.example.com
c.example.com
||ads.example.net^
||tracker.example.net^
";
        let domains = extract_by_source(content, "https://example.com/feed");
        assert_eq!(domains.len(), 5);
        assert!(domains.contains("ads.example.net"));
        assert!(domains.contains("tracker.example.net"));
    }

    #[test]
    fn test_unknown_source_decodes_gfwlist() {
        let content = base64::engine::general_purpose::STANDARD.encode("||hidden.example.com^\n");
        let domains = extract_by_source(&content, "https://example.com/feed");
        assert_eq!(domains.len(), 1);
        assert!(domains.contains("hidden.example.com"));
    }

    #[test]
    fn test_unknown_source_above_threshold_skips_probing() {
        let mut content: String = (0..PROBE_THRESHOLD)
            .map(|i| format!("host{}.example.com\n", i))
            .collect();
        content.push_str("||ads.example.net^\n");

        let domains = extract_by_source(&content, "https://example.com/feed");
        assert_eq!(domains.len(), PROBE_THRESHOLD);
        assert!(!domains.contains("ads.example.net"));
    }
}
