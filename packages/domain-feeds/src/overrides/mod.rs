//! Locally authored override files.
//!
//! - [`custom_domains`] - extra domains merged into a category
//! - [`dns_map`] - per-domain DNS upstream assignments
//!
//! Both parsers keep going past bad lines and hand the rejects back with
//! their 1-based line numbers so callers can report them.

pub mod custom_domains;
pub mod dns_map;

use std::path::Path;

use crate::error::{OverrideError, OverrideResult};

/// A line an override parser refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    /// 1-based line number in the source file
    pub line_number: usize,
    /// The trimmed line
    pub line: String,
    /// Why it was refused
    pub reason: String,
}

impl RejectedLine {
    pub(crate) fn new(line_number: usize, line: &str, reason: impl Into<String>) -> Self {
        Self {
            line_number,
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}

/// Non-blank, non-`#` lines with their 1-based line numbers.
pub(crate) fn numbered_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

/// Read an override file, `None` when it does not exist.
pub(crate) async fn read_optional(path: &Path) -> OverrideResult<Option<String>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(OverrideError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_lines_skip_comments() {
        let lines: Vec<_> = numbered_lines("a.com\n\n# note\n  b.com  \n").collect();
        assert_eq!(lines, vec![(1, "a.com"), (4, "b.com")]);
    }

    #[tokio::test]
    async fn test_read_optional_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_optional(&dir.path().join("absent.txt")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_read_optional_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_optional(dir.path()).await.is_err());
    }
}
