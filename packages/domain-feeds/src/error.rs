//! Typed errors for the domain-feeds library.
//!
//! Uses `thiserror` for library errors (not `anyhow`). None of these are
//! fatal to a collection run: the collector reports them and moves on.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching a feed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed
    #[error("HTTP request failed")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// Locator is neither an http(s) URL nor a readable path
    #[error("invalid source locator: {locator}")]
    InvalidLocator { locator: String },

    /// Fetch did not complete in time
    #[error("timeout fetching: {locator}")]
    Timeout { locator: String },

    /// Local file could not be read
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Content-level failures inside an extractor.
///
/// Extractors never surface these to callers; they log them and fall
/// back to a weaker textual pass.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Content is not a YAML document
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Content is not valid Base64
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Errors reading a local override file.
#[derive(Debug, Error)]
pub enum OverrideError {
    /// File exists but could not be read
    #[error("failed to read override file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// An error and its `source()` chain, joined with `": "`.
pub fn error_chain(error: &dyn std::error::Error) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for structured extraction passes.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Result type alias for override file operations.
pub type OverrideResult<T> = std::result::Result<T, OverrideError>;
