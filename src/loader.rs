//! Page localization: fetch a page, download the assets it references and
//! point the page at the local copies.
//!
//! A download runs in one sequential pass:
//!
//! 1. the output directory is checked (no request is made if it is unusable);
//! 2. the page is fetched, its URL gaining `http://` if it had no scheme;
//! 3. the body is decoded (response charset, then `<meta>`, then UTF-8) and
//!    parsed, and its `img`, `link` and `script` references listed;
//! 4. every eligible reference is fetched and written to the assets folder,
//!    one at a time, and rewritten on success;
//! 5. the page is serialized and written next to the assets folder.
//!
//! Failures in step 4 only affect the asset concerned: its reference keeps the
//! original value and processing moves on to the next one.

use std::path::{Path, PathBuf};

use crate::document::Document;
use crate::error::{EnvironmentErrorKind, PageLoaderError, Result};
use crate::fetcher::{Fetched, Fetcher};
use crate::naming::{Extension, make_name};
use crate::reference::{DownloadableReference, ResolvedAsset};
use crate::storage::Storage;
use crate::urls::{is_local, normalize_page_url, resolve_absolute};

/// Suffix of the folder holding a page's assets.
pub const ASSETS_SUFFIX: &str = "_files";

/// Extension of the saved page file.
pub const PAGE_EXTENSION: &str = ".html";

/// Downloads pages with their assets into an output directory.
///
/// Created through [`PageLoaderBuilder`](crate::PageLoaderBuilder).
pub struct PageLoader<F: Fetcher, S: Storage> {
    fetcher: F,
    storage: S,
    output_dir: Option<PathBuf>,
}

impl<F: Fetcher, S: Storage> PageLoader<F, S> {
    pub(crate) fn new(fetcher: F, storage: S, output_dir: Option<PathBuf>) -> Self {
        Self {
            fetcher,
            storage,
            output_dir,
        }
    }

    /// Download `url` and its assets, returning the path of the saved page.
    ///
    /// # Errors
    ///
    /// - [`PageLoaderError::Environment`] if the output directory is missing
    ///   or this process cannot create files in it. Nothing is fetched in
    ///   that case.
    /// - [`PageLoaderError::Connection`] if the page cannot be fetched.
    /// - [`PageLoaderError::Filesystem`] if the page file cannot be written.
    ///
    /// Assets that fail to download or save are logged and skipped.
    pub async fn download(&self, url: &str) -> Result<PathBuf> {
        tracing::debug!("Download requested for url: {url}");
        let output_dir = self.preflight().await?;

        let page_url = normalize_page_url(url);
        let page = self.fetch_page(&page_url).await?;
        let mut document = Document::parse_bytes(&page.body, page.charset());

        let assets_folder = make_name(&page_url, Extension::Replace(ASSETS_SUFFIX));
        self.localize_assets(&mut document, &page_url, &output_dir, &assets_folder)
            .await;

        let file_name = make_name(&page_url, Extension::Replace(PAGE_EXTENSION));
        let path = self
            .storage
            .save(&output_dir, &file_name, document.serialize().as_bytes())
            .await
            .inspect_err(|e| tracing::error!("{e}"))?;

        tracing::info!("Page saved to {}", path.display());
        Ok(path)
    }

    async fn preflight(&self) -> Result<PathBuf> {
        let output_dir = match &self.output_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().map_err(|_| PageLoaderError::Environment {
                kind: EnvironmentErrorKind::NotFound,
                path: PathBuf::from("."),
            })?,
        };

        let is_dir = tokio::fs::metadata(&output_dir)
            .await
            .is_ok_and(|metadata| metadata.is_dir());
        let kind = if !is_dir {
            Some(EnvironmentErrorKind::NotFound)
        } else if let Err(e) = create_scratch_file(&output_dir).await {
            tracing::debug!("Cannot create files in {}: {e}", output_dir.display());
            Some(EnvironmentErrorKind::NotWritable)
        } else {
            None
        };

        match kind {
            Some(kind) => {
                let err = PageLoaderError::Environment {
                    kind,
                    path: output_dir,
                };
                tracing::error!("{err}");
                Err(err)
            }
            None => Ok(output_dir),
        }
    }

    async fn fetch_page(&self, page_url: &str) -> Result<Fetched> {
        self.fetcher.fetch(page_url).await.map_err(|source| {
            let err = PageLoaderError::Connection {
                kind: source.connection_kind(),
                url: page_url.to_string(),
                source,
            };
            tracing::error!("{err}. Aborted.");
            err
        })
    }

    async fn localize_assets(
        &self,
        document: &mut Document,
        page_url: &str,
        output_dir: &Path,
        assets_folder: &str,
    ) {
        let references: Vec<DownloadableReference> = document
            .references()
            .into_iter()
            .filter(|r| r.kind.always_download() || is_local(&r.raw_value, page_url))
            .collect();
        let total = references.len();
        tracing::info!("Downloading {total} assets from {page_url}");

        let assets_dir = output_dir.join(assets_folder);
        let mut outcomes = Vec::with_capacity(total);
        for reference in references {
            let outcome = self.localize(&reference, page_url, &assets_dir).await;
            outcomes.push((reference, outcome));
        }

        let mut saved = 0;
        for (reference, outcome) in outcomes {
            match outcome {
                Ok(asset) => {
                    let local_path = format!("{assets_folder}/{}", asset.local_file_name);
                    document.set_attr(reference.node, reference.attribute(), local_path);
                    saved += 1;
                }
                Err(e) => {
                    tracing::warn!("Could not save {}, keeping original: {e}", reference.raw_value);
                }
            }
        }
        tracing::info!("Saved {saved} of {total} assets");
    }

    async fn localize(
        &self,
        reference: &DownloadableReference,
        page_url: &str,
        assets_dir: &Path,
    ) -> Result<ResolvedAsset> {
        let absolute_url = resolve_absolute(&reference.raw_value, page_url)?;
        let local_file_name = make_name(&absolute_url, Extension::Keep);

        let content = self.fetcher.fetch(&absolute_url).await?;
        self.storage
            .save(assets_dir, &local_file_name, &content.body)
            .await?;

        tracing::debug!("Downloaded {absolute_url} as {local_file_name}");
        Ok(ResolvedAsset {
            absolute_url,
            local_file_name,
        })
    }
}

/// Create and drop an unnamed file in `dir`. Succeeds exactly when this
/// process may write there, whatever the mode bits say.
async fn create_scratch_file(dir: &Path) -> std::io::Result<()> {
    let dir = dir.to_path_buf();
    tokio::task::spawn_blocking(move || tempfile::tempfile_in(dir).map(drop))
        .await
        .map_err(std::io::Error::other)?
}
