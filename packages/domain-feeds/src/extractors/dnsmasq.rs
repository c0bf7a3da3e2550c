//! dnsmasq configuration (`server=/example.com/114.114.114.114`).

use super::line::{self, HASH_COMMENTS};
use super::Extractor;
use crate::types::domain::{Domain, DomainSet};
use crate::types::source::SourceFormat;

/// Directives of the form `<name>=/<domain>[/<domain>...]/<target>`.
const DOMAIN_DIRECTIVES: &[&str] = &["server=", "address=", "ipset=", "nftset="];

/// Extracts domains from dnsmasq configs such as dnsmasq-china-list.
#[derive(Debug, Clone, Copy, Default)]
pub struct DnsmasqExtractor;

/// Domains named by a `server=/a.com/b.com/upstream` style directive.
///
/// Returns `None` when the line is not such a directive.
fn directive_domains(line: &str) -> Option<Vec<Domain>> {
    let rest = DOMAIN_DIRECTIVES
        .iter()
        .find_map(|directive| line.strip_prefix(directive))?
        .strip_prefix('/')?;

    // Everything before the last '/' is the domain list
    let (domains, _target) = rest.rsplit_once('/')?;
    Some(
        domains
            .split('/')
            .filter_map(|d| Domain::parse(d.trim()))
            .collect(),
    )
}

impl Extractor for DnsmasqExtractor {
    fn format(&self) -> SourceFormat {
        SourceFormat::Dnsmasq
    }

    fn extract(&self, content: &str) -> DomainSet {
        let mut domains = DomainSet::new();

        for line in line::content_lines(content, HASH_COMMENTS) {
            if let Some(found) = directive_domains(line) {
                domains.extend(found);
            } else if let Some(domain) = line::match_line(line) {
                domains.insert(domain);
            }
        }

        domains
    }
}
