//! Store error types

use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached or failed mid-operation
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A record was rejected before it reached the store
    #[error("Invalid record: {0}")]
    Invalid(String),
}

impl StoreError {
    /// Check if the caller supplied bad input (as opposed to a storage fault)
    pub fn is_invalid(&self) -> bool {
        matches!(self, StoreError::Invalid(_))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}
