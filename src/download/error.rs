//! Error types for image downloads.

use std::path::PathBuf;

use thiserror::Error;

/// Fixed user-facing message for any failed image download.
pub const DOWNLOAD_FAILED_MESSAGE: &str = "Failed to download image. Please try again.";

/// Errors that can occur while fetching and saving an image.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// HTTP client construction failed.
    #[error("failed to build HTTP client: {source}")]
    Build {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error downloading {url}: {source}")]
    Network {
        /// The URL that failed to download.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout downloading {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// HTTP error response (4xx client errors, 5xx server errors).
    #[error("HTTP {status} downloading {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// File system error while saving the image.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The provided URL is malformed or invalid.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },
}

impl DownloadError {
    /// Creates a client build error.
    pub fn build(source: reqwest::Error) -> Self {
        Self::Build { source }
    }

    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Fixed user-facing message shown for this failure.
    ///
    /// Distinct from the search-fetch message so the user can tell which
    /// operation failed; the detailed cause goes to the log.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        DOWNLOAD_FAILED_MESSAGE
    }
}

// As with the search errors, no blanket From impls: every variant needs the
// url/path context the source error does not carry.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display_contains_url() {
        let error = DownloadError::timeout("https://images.example.com/full.jpg");
        let msg = error.to_string();
        assert!(msg.contains("timeout"), "got: {msg}");
        assert!(msg.contains("full.jpg"), "got: {msg}");
    }

    #[test]
    fn test_http_status_display() {
        let error = DownloadError::http_status("https://images.example.com/full.jpg", 404);
        let msg = error.to_string();
        assert!(msg.contains("404"), "got: {msg}");
        assert!(msg.contains("full.jpg"), "got: {msg}");
    }

    #[test]
    fn test_io_display_contains_path() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let error = DownloadError::io(PathBuf::from("/tmp/downloaded-image.jpg"), source);
        assert!(
            error.to_string().contains("/tmp/downloaded-image.jpg"),
            "got: {error}"
        );
    }

    #[test]
    fn test_invalid_url_display() {
        let error = DownloadError::invalid_url("not-a-url");
        let msg = error.to_string();
        assert!(msg.contains("invalid URL"), "got: {msg}");
        assert!(msg.contains("not-a-url"), "got: {msg}");
    }

    #[test]
    fn test_user_message_is_distinct_from_search_message() {
        let error = DownloadError::timeout("u");
        assert_eq!(error.user_message(), DOWNLOAD_FAILED_MESSAGE);
        assert_ne!(error.user_message(), crate::api::SEARCH_FAILED_MESSAGE);
    }
}
