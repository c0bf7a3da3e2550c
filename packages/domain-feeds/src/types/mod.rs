//! Value types shared across the library.

pub mod config;
pub mod domain;
pub mod source;
