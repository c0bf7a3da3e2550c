//! GFWList: Base64 over Adblock-like rules.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use tracing::warn;

use super::adblock::{anchored_domain, EXCEPTION_PREFIX};
use super::line::{self, FILTER_COMMENTS};
use super::plain::PlainTextExtractor;
use super::Extractor;
use crate::error::ExtractResult;
use crate::types::domain::{Domain, DomainSet};
use crate::types::source::SourceFormat;

/// Standard alphabet, padding optional. The published list is wrapped at 64 columns.
const GFWLIST_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Extracts proxied domains from the GFWList.
///
/// If the content does not decode, it is read as a plain domain list instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct GfwListExtractor;

/// Decode the Base64 body into text, ignoring line breaks.
pub(crate) fn decode(content: &str) -> ExtractResult<String> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = GFWLIST_BASE64.decode(compact)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Host of a `||host...` rule, with or without the trailing `^`.
fn host_anchor(line: &str) -> Option<Domain> {
    let rest = line.strip_prefix("||")?;
    let host = rest
        .split(|c| matches!(c, '^' | '/' | '*' | ':' | '%' | '?'))
        .next()?;
    Domain::parse(host)
}

/// Host of a `|http://host/...` rule.
fn url_anchor(line: &str) -> Option<Domain> {
    let target = line.strip_prefix('|')?;
    if !target.starts_with("http") {
        return None;
    }
    let url = url::Url::parse(target).ok()?;
    Domain::parse(url.host_str()?)
}

fn match_rule(line: &str) -> Option<Domain> {
    if line.starts_with("||") {
        return anchored_domain(line).or_else(|| host_anchor(line));
    }
    if line.starts_with("|http") {
        return url_anchor(line);
    }
    if !line.contains('/') && line.contains('.') {
        if let Some(domain) = Domain::parse(line) {
            return Some(domain);
        }
    }
    line::url_host(line)
}

impl GfwListExtractor {
    fn extract_decoded(&self, decoded: &str) -> DomainSet {
        line::content_lines(decoded, FILTER_COMMENTS)
            .filter(|line| !line.starts_with(EXCEPTION_PREFIX))
            .filter_map(match_rule)
            .collect()
    }
}

impl Extractor for GfwListExtractor {
    fn format(&self) -> SourceFormat {
        SourceFormat::GfwList
    }

    fn extract(&self, content: &str) -> DomainSet {
        match decode(content) {
            Ok(decoded) => self.extract_decoded(&decoded),
            Err(e) => {
                warn!(error = %e, "GFWList decode failed, reading content as plain text");
                PlainTextExtractor.extract(content)
            }
        }
    }
}
