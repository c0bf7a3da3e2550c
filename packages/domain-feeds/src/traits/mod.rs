//! Trait seams of the library.
//!
//! Applications plug in how feeds are retrieved and where progress is reported.

pub mod fetcher;
pub mod observer;
