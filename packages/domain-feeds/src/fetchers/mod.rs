//! Fetcher implementations for feed locators.
//!
//! # Available Fetchers
//!
//! - `SourceFetcher` - routes http(s) URLs to `HttpFetcher`, paths to `FileFetcher`
//! - `HttpFetcher` - reqwest-based download
//! - `FileFetcher` - local files
//! - `MockFetcher` - for testing

mod file;
mod http;
mod mock;
mod source;

pub use file::FileFetcher;
pub use http::HttpFetcher;
pub use mock::MockFetcher;
pub use source::{is_remote, SourceFetcher};

pub use crate::traits::fetcher::Fetcher;
