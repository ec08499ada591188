//! Error types for the user directory client.

use thiserror::Error;
use userdir_core::CoreError;

/// Errors that can occur when talking to the user directory service.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned a non-2xx response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Invalid base URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Draft or patch could not be encoded
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Photo file not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// IO error while reading a photo
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Photo capture was cancelled
    #[error("Capture cancelled")]
    CaptureCancelled,
}

impl ClientError {
    /// HTTP status for server errors
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
