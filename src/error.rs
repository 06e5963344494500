//! Error types shared by the gateway, the controllers and the front-ends.

use thiserror::Error;

/// Crate error type.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid backend URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the backend.
        message: String,
    },

    /// Reading a local file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An operator guard rejected the action before any request was made.
    #[error("{0}")]
    Validation(String),

    /// `confirm_replace` was called without a pending replace target.
    #[error("No document selected for replacement")]
    NoReplaceTarget,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the error came from a local guard rather than the backend.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NoReplaceTarget)
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for crate operations.
pub type Result<T> = std::result::Result<T, Error>;
