use crate::config::ExistingFilePolicy;
use crate::storage::traits::{SaveOutcome, Storage, StorageError, StorageResult};
use std::path::{Component, Path, PathBuf};

/// Filesystem storage rooted at the output directory
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
    policy: ExistingFilePolicy,
}

impl FsStorage {
    /// Creates a storage backend writing under `root`
    ///
    /// The root itself is created lazily on the first save.
    pub fn new(root: impl Into<PathBuf>, policy: ExistingFilePolicy) -> Self {
        Self {
            root: root.into(),
            policy,
        }
    }

    /// Returns the storage root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the policy applied to existing files
    pub fn policy(&self) -> ExistingFilePolicy {
        self.policy
    }
}

impl Storage for FsStorage {
    fn save(&mut self, path: &Path, content: &[u8]) -> StorageResult<SaveOutcome> {
        if !is_contained(path) {
            return Err(StorageError::OutsideRoot(path.to_path_buf()));
        }

        let target = self.resolve(path);

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let existed = target.is_file();
        if existed && self.policy == ExistingFilePolicy::Skip {
            tracing::debug!("Keeping existing file {}", target.display());
            return Ok(SaveOutcome::SkippedExisting);
        }

        std::fs::write(&target, content).map_err(|source| StorageError::Write {
            path: target.clone(),
            source,
        })?;

        Ok(if existed {
            SaveOutcome::Overwritten
        } else {
            SaveOutcome::Written
        })
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

/// Only plain relative paths may be written; no `..`, no absolute paths
fn is_contained(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::Normal(_)))
        && path.components().next().is_some()
}
