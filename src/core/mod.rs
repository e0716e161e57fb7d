//! Core module: parsing, grading, aggregation, and report assembly

pub mod analysis;
pub mod batch;
pub mod config;
pub mod error;
pub mod extract;
pub mod grading;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod report;

/// Returns the current version of the `KtuAnalytics` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
