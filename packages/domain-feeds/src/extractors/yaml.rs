//! Clash rule-provider / rule-list YAML.

use serde_yaml::{Mapping, Value};
use tracing::debug;

use super::line::{self, HASH_COMMENTS};
use super::Extractor;
use crate::error::ExtractResult;
use crate::types::domain::DomainSet;
use crate::types::source::SourceFormat;

/// Keys that hold rule entries in the provider formats we know about.
const CONTAINER_KEYS: &[&str] = &["payload", "rules", "domains"];

/// Extracts domains from YAML rule providers.
///
/// A line-by-line pass runs first so that content which is not valid YAML
/// still yields its domains; the structured pass then adds whatever the
/// document's sequences contain.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlExtractor;

impl YamlExtractor {
    fn extract_lines(&self, content: &str, domains: &mut DomainSet) {
        for raw in line::content_lines(content, HASH_COMMENTS) {
            let item = line::peel_yaml_item(raw);
            if let Some(domain) = line::match_line(item).or_else(|| line::match_line(raw)) {
                domains.insert(domain);
            }
        }
    }

    fn extract_structured(&self, content: &str, domains: &mut DomainSet) -> ExtractResult<()> {
        let document: Value = serde_yaml::from_str(content)?;

        match &document {
            Value::Mapping(mapping) => Self::walk_mapping(mapping, domains),
            Value::Sequence(items) => Self::walk_sequence(items, domains),
            _ => {}
        }

        Ok(())
    }

    fn walk_mapping(mapping: &Mapping, domains: &mut DomainSet) {
        let known: Vec<&Value> = CONTAINER_KEYS
            .iter()
            .filter_map(|key| mapping.get(*key))
            .collect();

        if known.is_empty() {
            for value in mapping.values() {
                if let Value::Sequence(items) = value {
                    Self::walk_sequence(items, domains);
                }
            }
            return;
        }

        for value in known {
            if let Value::Sequence(items) = value {
                Self::walk_sequence(items, domains);
            }
        }
    }

    fn walk_sequence(items: &[Value], domains: &mut DomainSet) {
        for item in items {
            if let Value::String(entry) = item {
                if let Some(domain) = line::match_line(entry.trim()) {
                    domains.insert(domain);
                }
            }
        }
    }
}

impl Extractor for YamlExtractor {
    fn format(&self) -> SourceFormat {
        SourceFormat::Yaml
    }

    fn extract(&self, content: &str) -> DomainSet {
        let mut domains = DomainSet::new();
        self.extract_lines(content, &mut domains);

        if let Err(e) = self.extract_structured(content, &mut domains) {
            debug!(error = %e, "YAML parse failed, keeping line-based results");
        }

        domains
    }
}
