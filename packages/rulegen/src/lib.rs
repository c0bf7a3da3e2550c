//! DNS split-rule generator.
//!
//! Collects domestic and foreign domain sets with `domain_feeds` and writes
//! AdGuard Home upstream rules, plain domain lists and a QuanX whitelist.

pub mod config;
pub mod extract;
pub mod generate;
pub mod render;

pub use config::{FeedConfig, Settings};
pub use generate::{generate, GenerateReport};
