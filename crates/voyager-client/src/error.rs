//! Error types for the API client.

use thiserror::Error;
use voyager_core::ConfigError;
use voyager_search::{FetchError, SearchError};

/// Errors that can occur while talking to the API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Missing or unusable session cookies
    #[error("session error: {0}")]
    Session(String),

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("API error: status {status}, {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Response body could not be decoded
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// Search failure
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Configuration failure
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Convert into the error a [`voyager_search::PageFetcher`] reports for
    /// the request at `path`.
    #[must_use]
    pub fn into_fetch_error(self, path: &str) -> FetchError {
        match self {
            Self::Api { status, .. } => FetchError::Status {
                status,
                path: path.to_string(),
            },
            Self::Parse(message) => FetchError::Body(message),
            other => FetchError::Transport(other.to_string()),
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
