//! Domain error types

use thiserror::Error;

/// Domain-level errors raised by the identity index and the request model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The key is already mapped to a position.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// The position is already mapped to a key.
    #[error("duplicate position: {0}")]
    DuplicatePosition(usize),

    /// No entry with the given identifier exists.
    #[error("entry not found: {0}")]
    EntryNotFound(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// An identifier is invalid or empty.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
