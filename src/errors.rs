// Copyright 2025 Cowboy AI, LLC.

//! Error types for catalog operations

use thiserror::Error;

/// Errors that can occur in catalog operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// An argument was missing, empty or out of range
    #[error("Invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument
        argument: String,
        /// Why the argument was rejected
        reason: String,
    },

    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    EntityNotFound {
        /// Type of entity that wasn't found
        entity_type: String,
        /// ID that was searched for
        id: String,
    },

    /// Already exists error
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Invalid operation
    #[error("Invalid operation: {reason}")]
    InvalidOperation {
        /// Reason why the operation is invalid
        reason: String,
    },

    /// Invariant violation
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Concurrency conflict
    #[error("Concurrency conflict: expected version {expected}, but found {actual}")]
    ConcurrencyConflict {
        /// Expected version
        expected: u64,
        /// Actual version
        actual: u64,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::SerializationError(err.to_string())
    }
}

impl CatalogError {
    /// Create an invalid argument error
    pub fn invalid_argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        CatalogError::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }

    /// Create an entity not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl ToString) -> Self {
        CatalogError::EntityNotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Check if this is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CatalogError::InvalidArgument { .. })
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::EntityNotFound { .. })
    }

    /// Check if this is a concurrency error
    pub fn is_concurrency_error(&self) -> bool {
        matches!(self, CatalogError::ConcurrencyConflict { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test error creation and display messages
    ///
    /// ```mermaid
    /// graph TD
    ///     A[CatalogError] -->|Display| B[Error Message]
    ///     A -->|Clone| C[Cloned Error]
    /// ```
    #[test]
    fn test_error_display_messages() {
        let err = CatalogError::invalid_argument("child_code", "can not be null or empty");
        assert_eq!(
            err.to_string(),
            "Invalid argument `child_code`: can not be null or empty"
        );

        let err = CatalogError::not_found("Category", "123");
        assert_eq!(err.to_string(), "Entity not found: Category with id 123");

        let err = CatalogError::AlreadyExists("Category 00001".to_string());
        assert_eq!(err.to_string(), "Already exists: Category 00001");

        let err = CatalogError::InvalidOperation {
            reason: "Category has children".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid operation: Category has children");

        let err = CatalogError::InvariantViolation("depth exceeded".to_string());
        assert_eq!(err.to_string(), "Invariant violation: depth exceeded");

        let err = CatalogError::ConcurrencyConflict {
            expected: 5,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "Concurrency conflict: expected version 5, but found 3"
        );

        let err = CatalogError::SerializationError("Invalid JSON".to_string());
        assert_eq!(err.to_string(), "Serialization error: Invalid JSON");
    }

    #[test]
    fn test_helper_method_exclusivity() {
        let invalid = CatalogError::invalid_argument("code", "empty");
        assert!(invalid.is_invalid_argument());
        assert!(!invalid.is_not_found());
        assert!(!invalid.is_concurrency_error());

        let missing = CatalogError::not_found("Brand", "42");
        assert!(!missing.is_invalid_argument());
        assert!(missing.is_not_found());

        let conflict = CatalogError::ConcurrencyConflict {
            expected: 1,
            actual: 2,
        };
        assert!(conflict.is_concurrency_error());
        assert!(!conflict.is_not_found());
    }

    /// Test serde_json error conversion
    #[test]
    fn test_serde_json_conversion() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{ invalid json }").unwrap_err();
        let err: CatalogError = serde_err.into();

        match err {
            CatalogError::SerializationError(msg) => assert!(!msg.is_empty()),
            other => panic!("Expected SerializationError, got {other:?}"),
        }
    }
}
