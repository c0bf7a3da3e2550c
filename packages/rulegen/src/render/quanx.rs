//! Quantumult X whitelist: `host-suffix, <domain>, DIRECT` per registrable suffix.
//!
//! Domains are cut to their last two labels, so `www.example.com.cn`
//! becomes `com.cn`. Bare suffix tokens have no second label and are skipped.

use std::collections::BTreeSet;

use domain_feeds::DomainSet;

/// Policy every generated rule routes to.
const POLICY: &str = "DIRECT";

/// Two-label suffixes of `domains`, sorted and deduplicated.
pub fn suffixes(domains: &DomainSet) -> BTreeSet<&str> {
    domains
        .iter()
        .filter(|domain| !domain.is_suffix_token())
        .map(|domain| domain.second_level())
        .collect()
}

pub fn render(domains: &DomainSet) -> String {
    let mut text = String::from("# QuanX domestic whitelist rules\n# Format: host-suffix, domain, DIRECT\n\n");
    for suffix in suffixes(domains) {
        text.push_str(&format!("host-suffix, {}, {}\n", suffix, POLICY));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_feeds::overrides::custom_domains;

    #[test]
    fn test_reduces_to_two_labels() {
        let domains =
            custom_domains::parse("www.baidu.com\nmap.baidu.com\nqq.com\ncn\n").domains;
        assert_eq!(domains.len(), 4);

        let text = render(&domains);
        let rules: Vec<&str> = text.lines().filter(|l| l.starts_with("host-suffix")).collect();
        assert_eq!(
            rules,
            vec!["host-suffix, baidu.com, DIRECT", "host-suffix, qq.com, DIRECT"]
        );
        assert!(text.starts_with("# QuanX"));
    }

    #[test]
    fn test_empty() {
        assert!(suffixes(&DomainSet::new()).is_empty());
    }
}
