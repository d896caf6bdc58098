//! Store error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing the key-value store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The store file exists but is not a JSON object
    #[error("Corrupt store file {}: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
