//! Frontend Errors
//!
//! Failure taxonomy for model calls.

use thiserror::Error;

/// Common result type for model operations
pub type Result<T> = std::result::Result<T, GroceryError>;

/// Errors surfaced by the grocery model and its transport
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GroceryError {
    /// Rejected before any network call
    #[error("{0}")]
    Validation(String),
    /// Fetch rejected or non-2xx status
    #[error("transport error: {0}")]
    Transport(String),
    /// Body could not be encoded or decoded
    #[error("invalid payload: {0}")]
    Codec(String),
}

impl From<serde_json::Error> for GroceryError {
    fn from(e: serde_json::Error) -> Self {
        GroceryError::Codec(e.to_string())
    }
}
