/// Store error types
use thiserror::Error;
use userdir_client::ClientError;
use userdir_core::CoreError;

/// Errors surfaced by store operations and dispatch
#[derive(Error, Debug)]
pub enum StoreError {
    /// The remote call failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A draft or patch was rejected before sending
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// Server returned a record without the expected id
    #[error("Server returned a user without the expected id")]
    MissingId,

    /// Update requested with nothing changed
    #[error("No changes to save")]
    EmptyPatch,
}

impl StoreError {
    /// Whether the request never left the client
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::EmptyPatch)
    }
}

/// Result type alias using `StoreError`
pub type Result<T> = std::result::Result<T, StoreError>;
