//! Retrieval of the page and its assets.
//!
//! The crate ships with [`HttpFetcher`], backed by `reqwest`. Implement the
//! [`Fetcher`] trait to serve content from somewhere else (a cache, fixtures
//! in tests, ...).

mod http;

pub use http::HttpFetcher;

use std::future::Future;

use crate::error::FetchError;

/// Body of a successful response, with the media type the server declared.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fetched {
    /// Raw response body.
    pub body: Vec<u8>,
    /// Value of the `Content-Type` header, if the response had one.
    pub content_type: Option<String>,
}

impl Fetched {
    /// A body without a declared media type.
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            content_type: None,
        }
    }

    /// Attach a `Content-Type` value.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// The `charset` parameter of the content type, unquoted.
    ///
    /// ```
    /// use page_loader::Fetched;
    ///
    /// let page = Fetched::new("x").with_content_type("text/html; Charset=\"windows-1251\"");
    /// assert_eq!(page.charset(), Some("windows-1251"));
    /// ```
    pub fn charset(&self) -> Option<&str> {
        self.content_type
            .as_deref()?
            .split(';')
            .skip(1)
            .filter_map(|param| param.split_once('='))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("charset"))
            .map(|(_, value)| value.trim().trim_matches('"'))
            .filter(|value| !value.is_empty())
    }
}

/// Trait for clients that can retrieve the bytes behind a URL.
///
/// One call is one request: implementations must not retry. A response is
/// only a success if its status is in the 2xx range.
///
/// # Implementing a custom fetcher
///
/// ```rust,no_run
/// use page_loader::{FetchError, Fetched, Fetcher};
///
/// struct Offline;
///
/// impl Fetcher for Offline {
///     async fn fetch(&self, url: &str) -> Result<Fetched, FetchError> {
///         Err(FetchError::Status { url: url.to_string(), status: 503 })
///     }
/// }
/// ```
pub trait Fetcher: Send + Sync {
    /// Issue a single GET for `url` and return the response body.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Fetched, FetchError>> + Send;
}
