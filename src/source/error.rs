//! Error type for snapshot fetchers.

use thiserror::Error;

/// Errors that can occur while fetching a snapshot.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The server answered with a non-success status.
    #[error("endpoint returned status {0}")]
    Status(u16),

    /// Failed to parse the response body.
    #[error("failed to parse snapshot: {0}")]
    Parse(String),

    /// Connection failed.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for a response.
    #[error("request timed out")]
    Timeout,

    /// Local I/O failure (file-based sources).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Connection(err.to_string())
        } else if err.is_decode() {
            FetchError::Parse(err.to_string())
        } else {
            FetchError::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}
