/// Core error types for the user directory
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for the user directory
#[derive(Error, Debug)]
pub enum CoreError {
    /// A required draft field was left empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Birth date is not an ISO `YYYY-MM-DD` date
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Photo rejected before upload
    #[error("Invalid photo: {0}")]
    InvalidPhoto(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Create an invalid photo error
    pub fn invalid_photo(msg: impl Into<String>) -> Self {
        Self::InvalidPhoto(msg.into())
    }
}
