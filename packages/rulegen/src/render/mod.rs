//! Rendering of the generated artifacts.
//!
//! - [`adguard`] - AdGuard Home upstream rules (`gn.txt`, `gw.txt`)
//! - [`quanx`] - Quantumult X `host-suffix` rules
//! - [`lists`] - plain domain lists and the override debug dump
//!
//! Renderers are pure: they take sets and a timestamp and return text.

pub mod adguard;
pub mod lists;
pub mod quanx;

use chrono::{DateTime, FixedOffset, Utc};

/// Beijing time, UTC+8.
const BEIJING_OFFSET_SECS: i32 = 8 * 3600;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Generation timestamp for file headers, in Beijing time.
pub fn beijing_timestamp(now: DateTime<Utc>) -> String {
    match FixedOffset::east_opt(BEIJING_OFFSET_SECS) {
        Some(offset) => now.with_timezone(&offset).format(TIMESTAMP_FORMAT).to_string(),
        None => now.format(TIMESTAMP_FORMAT).to_string(),
    }
}

/// `#===...` divider used between header blocks.
pub(crate) fn divider() -> String {
    format!("#{}", "=".repeat(50))
}
