//! Extraction pipeline.
//!
//! - [`dispatch`] - pick extractors from a source locator
//! - [`collect`] - fetch a category's feeds and union their domains

pub mod collect;
pub mod dispatch;

pub use collect::Collector;
pub use dispatch::{extract_as, extract_by_source, route, PROBE_ORDER, PROBE_THRESHOLD};
