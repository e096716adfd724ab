//! # page_loader
//!
//! Save a web page for offline viewing together with the images, stylesheets
//! and scripts it references.
//!
//! ## Overview
//!
//! A [`PageLoader`] fetches one page through a [`Fetcher`], downloads its
//! images (from any host) and its same-site `link`/`script` targets, writes
//! them through a [`Storage`] backend into a `<page>_files` folder, and
//! rewrites the page so those references point at the local copies.
//!
//! Assets are processed one after another. An asset that fails to download
//! is logged and keeps its original reference; it never fails the page.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! # async fn example() -> page_loader::Result<()> {
//! let saved = page_loader::download("https://example.com/blog", Some("/tmp".as_ref())).await?;
//! // /tmp/example-com-blog.html plus /tmp/example-com-blog_files/
//! println!("{}", saved.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `default-tls` | **yes** | Use the platform TLS implementation for HTTPS. |
//! | `rustls-tls` | no | Use `rustls` instead of the platform TLS. |

pub mod config;
pub mod document;
pub mod error;
pub mod fetcher;
pub mod loader;
pub mod naming;
pub mod reference;
pub mod storage;
pub mod urls;

pub use config::PageLoaderBuilder;
pub use document::Document;
pub use error::{ConnectionErrorKind, EnvironmentErrorKind, FetchError, PageLoaderError, Result};
pub use fetcher::{Fetched, Fetcher, HttpFetcher};
pub use loader::{ASSETS_SUFFIX, PAGE_EXTENSION, PageLoader};
pub use naming::{Extension, make_name};
pub use reference::{DownloadableReference, ResolvedAsset, TagKind};
pub use storage::{FsStorage, Storage};

use std::path::{Path, PathBuf};

/// Download `url` into `output_dir` (the current working directory when
/// `None`) with the default HTTP client and filesystem storage.
///
/// Returns the path of the saved page. See [`PageLoader::download`] for the
/// errors.
pub async fn download(url: &str, output_dir: Option<&Path>) -> Result<PathBuf> {
    let builder = PageLoaderBuilder::new();
    let builder = match output_dir {
        Some(dir) => builder.output_dir(dir),
        None => builder,
    };
    builder.build().download(url).await
}
