//! Error types for search endpoint requests.

use thiserror::Error;

/// Fixed user-facing message for any failed search fetch.
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to fetch images. Please try again.";

/// Errors that can occur while querying the search endpoint.
#[derive(Debug, Error)]
pub enum SearchError {
    /// HTTP client construction failed.
    #[error("failed to build HTTP client: {source}")]
    Build {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error querying {url}: {source}")]
    Network {
        /// The request URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout querying {url}")]
    Timeout {
        /// The request URL that timed out.
        url: String,
    },

    /// HTTP error response (4xx client errors, 5xx server errors).
    #[error("HTTP {status} querying {url}")]
    HttpStatus {
        /// The request URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The response body was not the expected JSON shape.
    #[error("malformed response body from {url}: {source}")]
    Decode {
        /// The request URL whose body failed to decode.
        url: String,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },
}

impl SearchError {
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

    /// Creates a malformed-body error.
    pub fn decode(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            url: url.into(),
            source,
        }
    }

    /// Fixed user-facing message shown for this failure.
    ///
    /// Every variant maps to the same string; the detailed cause goes to the
    /// log, not the user.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        SEARCH_FAILED_MESSAGE
    }
}

// No blanket From<reqwest::Error> impl: the variants require the request URL
// for context, which the source error does not carry. The helper
// constructors are the supported construction path.
