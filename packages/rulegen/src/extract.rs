//! The `extract` command: fetch one source and preview its domains.

use anyhow::{Context, Result};
use std::fmt::Write as _;

use domain_feeds::{extract_by_source, route, DomainSet, Fetcher};

/// How many domains the preview lists.
pub const PREVIEW_LIMIT: usize = 20;

/// Fetch `source` and extract its domains.
pub async fn extract_source<F: Fetcher>(fetcher: &F, source: &str) -> Result<DomainSet> {
    let content = fetcher
        .fetch(source)
        .await
        .with_context(|| format!("Failed to fetch {}", source))?;
    tracing::info!(source = %source, format = %route(source), "Fetched source");
    Ok(extract_by_source(&content, source))
}

/// Count line, then the first [`PREVIEW_LIMIT`] domains, then `...` if there are more.
pub fn preview(domains: &DomainSet) -> String {
    let mut text = format!("Extracted {} domains\n", domains.len());
    for domain in domains.iter().take(PREVIEW_LIMIT) {
        let _ = writeln!(text, "{}", domain);
    }
    if domains.len() > PREVIEW_LIMIT {
        text.push_str("...\n");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_feeds::MockFetcher;

    #[tokio::test]
    async fn test_extract_and_preview() {
        let content: String = (0..25).map(|i| format!("host{:02}.example.com\n", i)).collect();
        let fetcher = MockFetcher::new().with_content("https://example.com/hosts.list", content);

        let domains = extract_source(&fetcher, "https://example.com/hosts.list")
            .await
            .unwrap();
        assert_eq!(domains.len(), 25);

        let text = preview(&domains);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Extracted 25 domains");
        assert_eq!(lines[1], "host00.example.com");
        assert_eq!(lines.len(), 1 + PREVIEW_LIMIT + 1);
        assert_eq!(lines.last(), Some(&"..."));
    }

    #[tokio::test]
    async fn test_fetch_error_has_context() {
        let fetcher = MockFetcher::new().with_failure("https://example.com/a.list", 500);
        let err = extract_source(&fetcher, "https://example.com/a.list")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to fetch https://example.com/a.list"));
    }
}
