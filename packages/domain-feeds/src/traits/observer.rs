//! Observer trait - where collection progress and problems are reported.
//!
//! The collector never logs directly. It emits [`CollectEvent`]s to an
//! injected observer; [`TracingObserver`] turns them into `tracing` records.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::types::source::SourceFormat;

/// Something that happened during a collection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectEvent {
    /// A source is about to be fetched
    FetchStarted { source: String },

    /// A source was fetched and its domains extracted
    SourceExtracted {
        source: String,
        format: SourceFormat,
        count: usize,
    },

    /// A source could not be fetched; it contributes no domains
    FetchFailed { source: String, error: String },

    /// A source was fetched but had no content
    SourceEmpty { source: String },

    /// A custom override file exists but could not be read
    CustomReadFailed { path: PathBuf, error: String },

    /// Custom override entries were merged in
    CustomMerged { path: PathBuf, count: usize },

    /// A custom override line was rejected
    CustomLineRejected {
        path: PathBuf,
        line_number: usize,
        line: String,
        reason: String,
    },

    /// A run finished
    Collected { sources: usize, total: usize },
}

/// Receives collection events.
pub trait Observer: Send + Sync {
    fn on_event(&self, event: CollectEvent);
}

/// Default observer: forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn on_event(&self, event: CollectEvent) {
        match event {
            CollectEvent::FetchStarted { source } => {
                info!(source = %source, "Downloading source");
            }
            CollectEvent::SourceExtracted {
                source,
                format,
                count,
            } => {
                info!(source = %source, format = %format, count, "Extracted domains");
            }
            CollectEvent::FetchFailed { source, error } => {
                warn!(source = %source, error = %error, "Failed to fetch source, skipping");
            }
            CollectEvent::SourceEmpty { source } => {
                warn!(source = %source, "Source returned no content");
            }
            CollectEvent::CustomReadFailed { path, error } => {
                warn!(path = %path.display(), error = %error, "Failed to read custom domain file");
            }
            CollectEvent::CustomMerged { path, count } => {
                info!(path = %path.display(), count, "Merged custom domains");
            }
            CollectEvent::CustomLineRejected {
                path,
                line_number,
                line,
                reason,
            } => {
                warn!(
                    path = %path.display(),
                    line_number,
                    line = %line,
                    reason = %reason,
                    "Skipping custom override line"
                );
            }
            CollectEvent::Collected { sources, total } => {
                info!(sources, total, "Collection complete");
            }
        }
    }
}
