//! Filesystem storage backend.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{PageLoaderError, Result};
use crate::storage::Storage;

/// Storage backend that writes files to the local filesystem.
///
/// Only the last level of the destination folder is created; its parent must
/// already exist. Existing files are overwritten.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsStorage;

impl FsStorage {
    /// Create a new `FsStorage`.
    pub fn new() -> Self {
        Self
    }
}

impl Storage for FsStorage {
    async fn save(&self, folder: &Path, file_name: &str, content: &[u8]) -> Result<PathBuf> {
        match tokio::fs::create_dir(folder).await {
            Ok(()) => tracing::debug!("Created folder {}", folder.display()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
            Err(source) => {
                return Err(PageLoaderError::Filesystem {
                    path: folder.to_path_buf(),
                    source,
                });
            }
        }

        let path = folder.join(file_name);
        tokio::fs::write(&path, content)
            .await
            .map_err(|source| PageLoaderError::Filesystem {
                path: path.clone(),
                source,
            })?;

        tracing::debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(path)
    }
}
