//! Domain errors
//!
//! Validation and not-found outcomes are returned as failed envelopes, not
//! errors. `DomainError` is reserved for store and serialization failures.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// A store uniqueness constraint rejected the write.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    InternalError(String),
}
