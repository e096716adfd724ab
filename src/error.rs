//! Error types for the `page_loader` crate.

use std::fmt;
use std::path::PathBuf;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// All errors that can occur while localizing a page.
#[derive(Debug, thiserror::Error)]
pub enum PageLoaderError {
    /// The output directory failed the preflight check. Raised before any
    /// network request is made.
    #[error("{kind}: {}", .path.display())]
    Environment {
        kind: EnvironmentErrorKind,
        path: PathBuf,
    },

    /// The page itself could not be retrieved.
    #[error("{kind} ({url}): {source}")]
    Connection {
        kind: ConnectionErrorKind,
        url: String,
        #[source]
        source: FetchError,
    },

    /// Writing a file or creating the assets folder failed.
    #[error("Failed to write {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An asset could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A reference could not be joined against the page URL.
    #[error("Cannot resolve {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The loader configuration is invalid.
    #[error("Config error: {0}")]
    Config(String),
}

/// Why the output directory was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvironmentErrorKind {
    NotFound,
    NotWritable,
}

impl fmt::Display for EnvironmentErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("Folder doesn't exist"),
            Self::NotWritable => f.write_str("Don't have write access"),
        }
    }
}

/// Classification of a failed page request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionErrorKind {
    /// The host could not be resolved or refused the connection.
    BadUrl,
    /// The server answered with a non-2xx status.
    BadResponse,
    /// Anything else: timeouts, TLS, unsupported schemes.
    Other,
}

impl fmt::Display for ConnectionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadUrl => f.write_str("Invalid url"),
            Self::BadResponse => f.write_str("Was not able to load page"),
            Self::Other => f.write_str("Some other error arose"),
        }
    }
}

/// Failure of a single GET issued by a [`Fetcher`](crate::Fetcher).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The response status was outside the 2xx range.
    #[error("{url} returned status code {status}")]
    Status { url: String, status: u16 },

    /// DNS lookup failed or the connection was refused.
    #[error("Could not connect to {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: BoxError,
    },

    /// Any other transport-level failure.
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },
}

impl FetchError {
    /// How this failure is reported when it happens to the page request.
    pub fn connection_kind(&self) -> ConnectionErrorKind {
        match self {
            Self::Status { .. } => ConnectionErrorKind::BadResponse,
            Self::Unreachable { .. } => ConnectionErrorKind::BadUrl,
            Self::Transport { .. } => ConnectionErrorKind::Other,
        }
    }

    /// The URL that was requested.
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. } | Self::Unreachable { url, .. } | Self::Transport { url, .. } => {
                url
            }
        }
    }
}

/// A type alias for `Result<T, PageLoaderError>`.
pub type Result<T> = std::result::Result<T, PageLoaderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_errors_map_to_connection_kinds() {
        let status = FetchError::Status {
            url: "http://a.test".into(),
            status: 404,
        };
        let unreachable = FetchError::Unreachable {
            url: "http://a.test".into(),
            source: "dns".into(),
        };
        let transport = FetchError::Transport {
            url: "http://a.test".into(),
            source: "timeout".into(),
        };
        assert_eq!(status.connection_kind(), ConnectionErrorKind::BadResponse);
        assert_eq!(unreachable.connection_kind(), ConnectionErrorKind::BadUrl);
        assert_eq!(transport.connection_kind(), ConnectionErrorKind::Other);
    }

    #[test]
    fn messages_carry_context() {
        let err = PageLoaderError::Environment {
            kind: EnvironmentErrorKind::NotFound,
            path: PathBuf::from("/nowhere"),
        };
        assert_eq!(err.to_string(), "Folder doesn't exist: /nowhere");

        let err = PageLoaderError::Connection {
            kind: ConnectionErrorKind::BadResponse,
            url: "http://a.test/x".into(),
            source: FetchError::Status {
                url: "http://a.test/x".into(),
                status: 500,
            },
        };
        let message = err.to_string();
        assert!(message.starts_with("Was not able to load page"));
        assert!(message.contains("500"));
    }
}
