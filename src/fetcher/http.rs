//! HTTP fetcher backed by `reqwest`.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

use crate::error::{FetchError, PageLoaderError, Result};
use crate::fetcher::{Fetched, Fetcher};

/// Fetcher that performs real HTTP(S) requests.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use page_loader::HttpFetcher;
///
/// let fetcher = HttpFetcher::with_timeout(Duration::from_secs(10)).unwrap();
/// ```
#[derive(Clone, Debug, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with a default `reqwest` client (no timeout).
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing, preconfigured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Create a fetcher whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PageLoaderError::Config(format!("cannot build HTTP client: {e}")))?;
        Ok(Self::with_client(client))
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<Fetched, FetchError> {
        tracing::debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(String::from);
        let body = response.bytes().await.map_err(|e| classify(url, e))?;
        tracing::debug!("Received {} bytes from {url}", body.len());
        Ok(Fetched {
            body: body.to_vec(),
            content_type,
        })
    }
}

fn classify(url: &str, error: reqwest::Error) -> FetchError {
    let url = url.to_string();
    if error.is_connect() {
        FetchError::Unreachable {
            url,
            source: Box::new(error),
        }
    } else {
        FetchError::Transport {
            url,
            source: Box::new(error),
        }
    }
}
