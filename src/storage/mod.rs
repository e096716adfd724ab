//! Pluggable writers for the saved page and its assets.
//!
//! [`FsStorage`] writes to the local filesystem. Implement the [`Storage`]
//! trait to add your own backend.

mod fs;

pub use fs::FsStorage;

use std::future::Future;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Trait for backends that persist downloaded content.
///
/// The destination folder is always passed explicitly; implementations must
/// not depend on the process working directory.
///
/// # Implementing a custom backend
///
/// ```rust,no_run
/// use std::path::{Path, PathBuf};
/// use page_loader::{Storage, Result};
///
/// struct DryRun;
///
/// impl Storage for DryRun {
///     async fn save(&self, folder: &Path, file_name: &str, _content: &[u8]) -> Result<PathBuf> {
///         Ok(folder.join(file_name))
///     }
/// }
/// ```
pub trait Storage: Send + Sync {
    /// Persist `content` as `file_name` inside `folder`, creating the folder
    /// if needed, and return the path of the written file.
    fn save(
        &self,
        folder: &Path,
        file_name: &str,
        content: &[u8],
    ) -> impl Future<Output = Result<PathBuf>> + Send;
}
