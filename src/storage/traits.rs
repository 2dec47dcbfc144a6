//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Path escapes the storage root: {0}")]
    OutsideRoot(PathBuf),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// What a save operation did on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The file did not exist and was created
    Written,
    /// The file existed and was replaced
    Overwritten,
    /// The file existed and was left untouched
    SkippedExisting,
}

/// Trait for storage backend implementations
///
/// Paths are relative to the backend's root; implementations create any
/// missing parent directories before writing.
pub trait Storage {
    /// Saves content at the given relative path
    ///
    /// # Arguments
    ///
    /// * `path` - Path relative to the storage root (as produced by `map_path`)
    /// * `content` - Raw bytes to write
    ///
    /// # Returns
    ///
    /// The outcome of the save, or a `StorageError` if the directory or file
    /// could not be written
    fn save(&mut self, path: &Path, content: &[u8]) -> StorageResult<SaveOutcome>;

    /// Returns the absolute location a relative path would be written to
    fn resolve(&self, path: &Path) -> PathBuf;
}
