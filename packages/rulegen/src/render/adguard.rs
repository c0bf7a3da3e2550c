//! AdGuard Home upstream configuration, one `[/domain/]upstreams` rule per domain.
//!
//! Whitelist mode (`gn.txt`) sends unlisted traffic to the foreign upstreams
//! and routes the domestic set to the domestic ones. Blacklist mode
//! (`gw.txt`) is the mirror image.

use domain_feeds::{DnsMap, DomainSet};

use super::divider;

/// Which way the file splits traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Default foreign, listed domains domestic
    Whitelist,
    /// Default domestic, listed domains foreign
    Blacklist,
}

impl Mode {
    fn title(&self) -> &'static str {
        match self {
            Self::Whitelist => "whitelist mode",
            Self::Blacklist => "blacklist mode",
        }
    }

    fn summary(&self) -> &'static str {
        match self {
            Self::Whitelist => {
                "# Whitelist mode: domestic domains use domestic DNS, everything else foreign DNS"
            }
            Self::Blacklist => {
                "# Blacklist mode: foreign domains use foreign DNS, everything else domestic DNS"
            }
        }
    }

    fn default_label(&self) -> &'static str {
        match self {
            Self::Whitelist => "foreign",
            Self::Blacklist => "domestic",
        }
    }

    fn category_label(&self) -> &'static str {
        match self {
            Self::Whitelist => "Domestic",
            Self::Blacklist => "Foreign",
        }
    }
}

/// Upstream lists for both categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upstreams {
    pub cn: Vec<String>,
    pub foreign: Vec<String>,
}

impl Upstreams {
    /// (default upstreams, upstreams for listed domains)
    fn for_mode(&self, mode: Mode) -> (&[String], &[String]) {
        match mode {
            Mode::Whitelist => (self.foreign.as_slice(), self.cn.as_slice()),
            Mode::Blacklist => (self.cn.as_slice(), self.foreign.as_slice()),
        }
    }
}

/// `[/domain/]a b`
pub fn rule(domain: &str, upstreams: &[String]) -> String {
    format!("[/{}/]{}", domain, upstreams.join(" "))
}

/// Render one mode's configuration.
///
/// `listed` is the category routed away from the default; domains covered
/// by an override in `overrides` are left out of it.
pub fn render(
    mode: Mode,
    listed: &DomainSet,
    upstreams: &Upstreams,
    overrides: &DnsMap,
    generated_at: &str,
) -> String {
    let (defaults, listed_dns) = upstreams.for_mode(mode);
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!(
        "# AdGuard Home DNS split configuration - {} (one rule per domain)",
        mode.title()
    ));
    lines.push(format!("# Generated at {} (UTC+8)", generated_at));
    lines.push(mode.summary().to_string());
    if !overrides.is_empty() {
        lines.push("# Includes custom domain DNS rules".to_string());
    }
    lines.push(String::new());

    lines.push(format!("# Default upstream DNS ({})", mode.default_label()));
    lines.extend(defaults.iter().cloned());
    lines.push(String::new());

    if !overrides.is_empty() {
        lines.push(divider());
        lines.push("# Custom domain DNS rules".to_string());
        lines.push(divider());
        for (pattern, endpoints) in overrides.entries() {
            lines.push(rule(pattern, endpoints));
        }
        lines.push(String::new());
    }

    let kept: Vec<&str> = listed
        .iter()
        .filter(|domain| !overrides.covers(domain))
        .map(|domain| domain.as_str())
        .collect();
    let excluded = listed.len() - kept.len();

    lines.push(divider());
    lines.push(format!(
        "# {} domain rules ({} domains, one rule each)",
        mode.category_label(),
        kept.len()
    ));
    if excluded > 0 {
        lines.push(format!(
            "# Excluded {} domains covered by custom DNS rules (wildcards included)",
            excluded
        ));
    }
    lines.push(divider());
    lines.extend(kept.into_iter().map(|domain| rule(domain, listed_dns)));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
