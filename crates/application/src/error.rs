//! Application error types

use netconsole_domain::DomainError;
use thiserror::Error;

/// Errors raised by format adapters and the use cases built on them.
///
/// Only [`AdapterError::FormatValidation`] is ever downgraded to "not this
/// format" (by `try_parse` and detection); every other variant is a contract
/// violation and reaches the caller unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// The document is malformed or belongs to another dialect.
    #[error("invalid {format} document: {reason}")]
    FormatValidation {
        /// Identifier of the format that rejected the document.
        format: &'static str,
        /// Human-readable reason.
        reason: String,
    },

    /// The operation is not supported by this format.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// No entry with the given identifier exists.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other domain error.
    #[error("domain error: {0}")]
    Domain(DomainError),

    /// Serializing the backing document failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl AdapterError {
    /// Creates a validation error for `format`.
    #[must_use]
    pub fn validation(format: &'static str, reason: impl Into<String>) -> Self {
        Self::FormatValidation {
            format,
            reason: reason.into(),
        }
    }

    /// Creates an unsupported-operation error.
    #[must_use]
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::UnsupportedOperation(operation.into())
    }

    /// Returns true for validation errors.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::FormatValidation { .. })
    }
}

impl From<DomainError> for AdapterError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::EntryNotFound(id) => Self::NotFound(id),
            other => Self::Domain(other),
        }
    }
}

/// Result type alias for adapter operations.
pub type AdapterResult<T> = Result<T, AdapterError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_entry_not_found_maps_to_not_found() {
        let error = AdapterError::from(DomainError::EntryNotFound("root/3".to_string()));
        assert_eq!(error, AdapterError::NotFound("root/3".to_string()));
    }

    #[test]
    fn test_other_domain_errors_are_wrapped() {
        let error = AdapterError::from(DomainError::DuplicatePosition(2));
        assert!(matches!(error, AdapterError::Domain(_)));
        assert!(!error.is_validation());
    }

    #[test]
    fn test_validation_message() {
        let error = AdapterError::validation("postman-v2.1", "item is not an array");
        assert!(error.is_validation());
        assert_eq!(
            error.to_string(),
            "invalid postman-v2.1 document: item is not an array"
        );
    }
}
