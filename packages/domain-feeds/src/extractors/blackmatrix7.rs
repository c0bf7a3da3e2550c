//! blackmatrix7 `*_Domain.txt` lists.
//!
//! These files open with a metadata block (`NAME:`, `TOTAL:`, `DOMAIN:`...)
//! followed by one domain per line, suffix rules written as `.example.com`.

use super::line::{self, HASH_COMMENTS};
use super::Extractor;
use crate::types::domain::DomainSet;
use crate::types::source::SourceFormat;

/// The header block ends on the first line carrying this marker.
const HEADER_END_MARKER: &str = "DOMAIN:";

#[derive(Debug, Clone, Copy, Default)]
pub struct Blackmatrix7Extractor;

impl Extractor for Blackmatrix7Extractor {
    fn format(&self) -> SourceFormat {
        SourceFormat::Blackmatrix7
    }

    fn extract(&self, content: &str) -> DomainSet {
        // The marker may sit on a commented header line, so comments are dropped after it
        content
            .lines()
            .map(str::trim)
            .skip_while(|line| !line.contains(HEADER_END_MARKER))
            .skip(1)
            .filter(|line| !line.is_empty() && !line.starts_with(HASH_COMMENTS))
            .filter_map(line::match_bare)
            .collect()
    }
}
