//! Output module for crawl reports and the mirror manifest
//!
//! This module handles:
//! - Recording per-URL outcomes of a crawl
//! - Printing a summary of the crawl
//! - Writing the manifest file at the mirror root

mod manifest;
pub mod stats;

pub use manifest::{format_manifest, manifest_file_name, write_manifest, Manifest};
pub use stats::{print_report, CrawlReport, PageRecord};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
