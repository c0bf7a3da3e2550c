//! Plain domain lists and the custom DNS debug dump.

use domain_feeds::{DnsMap, DomainSet};

/// One domain per line, sorted.
pub fn domain_list(domains: &DomainSet) -> String {
    domains.iter().map(|domain| format!("{}\n", domain)).collect()
}

/// `pattern: dns1, dns2` per override, sorted by pattern.
pub fn overrides_debug(overrides: &DnsMap) -> String {
    overrides
        .entries()
        .map(|(pattern, endpoints)| format!("{}: {}\n", pattern, endpoints.join(", ")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_list_sorted() {
        let domains: DomainSet = ["b.com", "A.com"]
            .iter()
            .filter_map(|d| domain_feeds::Domain::parse(d))
            .collect();
        assert_eq!(domain_list(&domains), "a.com\nb.com\n");
        assert_eq!(domain_list(&DomainSet::new()), "");
    }

    #[test]
    fn test_overrides_debug() {
        let overrides = DnsMap::parse("z.com/a.com: 1.1.1.1, 8.8.8.8\n");
        assert_eq!(
            overrides_debug(&overrides),
            "a.com: 1.1.1.1, 8.8.8.8\nz.com: 1.1.1.1, 8.8.8.8\n"
        );
    }
}
