//! Storage module for persisting fetched content
//!
//! This module writes mirrored pages to disk:
//! - Creating missing parent directories
//! - Applying the configured policy for files that already exist
//! - Keeping every write inside the output directory

mod fs;
mod traits;

pub use fs::FsStorage;
pub use traits::{SaveOutcome, Storage, StorageError, StorageResult};

use crate::config::OutputConfig;
use std::path::Path;

/// Opens filesystem storage for the given output configuration
///
/// `override_dir` replaces `output.directory` when set (e.g. from the CLI).
pub fn open_storage(config: &OutputConfig, override_dir: Option<&Path>) -> FsStorage {
    let root = override_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.directory.clone().into());
    FsStorage::new(root, config.on_existing)
}
