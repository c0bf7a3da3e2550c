//! Custom domain lists (`custom_cn_domains.txt`, `custom_foreign_domains.txt`).
//!
//! One entry per line: a host name, a leading-dot host name, or a bare
//! alphabetic suffix token of at most five letters (`cn`, `hk`).

use std::path::Path;

use super::{numbered_lines, read_optional, RejectedLine};
use crate::error::OverrideResult;
use crate::types::domain::{Domain, DomainSet, MAX_SUFFIX_TOKEN_LEN};

/// Parsed custom domain file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomDomains {
    pub domains: DomainSet,
    pub rejected: Vec<RejectedLine>,
}

/// Parse custom domain entries.
pub fn parse(content: &str) -> CustomDomains {
    let mut parsed = CustomDomains::default();

    for (line_number, line) in numbered_lines(content) {
        match Domain::parse(line).or_else(|| Domain::suffix_token(line)) {
            Some(domain) => {
                parsed.domains.insert(domain);
            }
            None => parsed.rejected.push(RejectedLine::new(
                line_number,
                line,
                format!(
                    "not a domain or a suffix token of up to {} letters",
                    MAX_SUFFIX_TOKEN_LEN
                ),
            )),
        }
    }

    parsed
}

/// Read and parse a custom domain file. A missing file yields `None`.
pub async fn read(path: &Path) -> OverrideResult<Option<CustomDomains>> {
    Ok(read_optional(path).await?.as_deref().map(parse))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_forms() {
        let parsed = parse("example.com\n.Suffix.example.org\ncn\nHK\n");
        let domains: Vec<&str> = parsed.domains.iter().map(Domain::as_str).collect();
        assert_eq!(domains, vec!["cn", "example.com", "hk", "suffix.example.org"]);
        assert!(parsed.rejected.is_empty());
    }

    #[test]
    fn test_rejected_lines_carry_line_numbers() {
        let content = "\
# header
good.example.com

toolong
bad_domain!.com
1.2.3.4
";
        let parsed = parse(content);
        assert_eq!(parsed.domains.len(), 1);

        let numbers: Vec<usize> = parsed.rejected.iter().map(|r| r.line_number).collect();
        assert_eq!(numbers, vec![4, 5, 6]);
        assert_eq!(parsed.rejected[0].line, "toolong");
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read(&dir.path().join("custom.txt")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.txt");
        tokio::fs::write(&path, "mine.example.com\n").await.unwrap();

        let parsed = read(&path).await.unwrap().unwrap();
        assert!(parsed.domains.contains("mine.example.com"));
    }
}
