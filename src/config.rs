//! Builder for configuring a [`PageLoader`].

use std::path::PathBuf;

use crate::fetcher::{Fetcher, HttpFetcher};
use crate::loader::PageLoader;
use crate::storage::{FsStorage, Storage};

/// Builder for configuring a [`PageLoader`].
///
/// Provides a fluent API for choosing the output directory, the client used
/// to fetch the page and its assets, and the backend that writes them.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use page_loader::{HttpFetcher, PageLoaderBuilder};
///
/// # async fn example() -> page_loader::Result<()> {
/// let loader = PageLoaderBuilder::new()
///     .output_dir("/tmp/pages")
///     .fetcher(HttpFetcher::with_timeout(Duration::from_secs(10))?)
///     .build();
///
/// let saved = loader.download("https://example.com/blog").await?;
/// println!("{}", saved.display());
/// # Ok(())
/// # }
/// ```
pub struct PageLoaderBuilder<F: Fetcher = HttpFetcher, S: Storage = FsStorage> {
    fetcher: F,
    storage: S,
    output_dir: Option<PathBuf>,
}

impl PageLoaderBuilder {
    /// Create a builder with sensible defaults.
    ///
    /// Defaults: [`HttpFetcher`] without timeout, [`FsStorage`], and the
    /// current working directory (resolved at download time) as output.
    pub fn new() -> Self {
        Self {
            fetcher: HttpFetcher::new(),
            storage: FsStorage::new(),
            output_dir: None,
        }
    }
}

impl Default for PageLoaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Fetcher, S: Storage> PageLoaderBuilder<F, S> {
    /// Directory that receives the page file and its assets folder. It must
    /// already exist.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Client used for the page and every asset.
    pub fn fetcher<G: Fetcher>(self, fetcher: G) -> PageLoaderBuilder<G, S> {
        PageLoaderBuilder {
            fetcher,
            storage: self.storage,
            output_dir: self.output_dir,
        }
    }

    /// Backend that writes the page and its assets.
    pub fn storage<T: Storage>(self, storage: T) -> PageLoaderBuilder<F, T> {
        PageLoaderBuilder {
            fetcher: self.fetcher,
            storage,
            output_dir: self.output_dir,
        }
    }

    /// Consume the builder and return the configured [`PageLoader`].
    pub fn build(self) -> PageLoader<F, S> {
        PageLoader::new(self.fetcher, self.storage, self.output_dir)
    }
}
