//! Domain error types

use thiserror::Error;

/// Errors raised while building values and contexts from external documents.
///
/// Expansion itself never fails with a `DomainError`; these only surface when
/// converting JSON or YAML input into the engine's data model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The input holds a kind of data that is not a `Value`.
    #[error("unsupported value: {kind} cannot be used as a variable value")]
    UnsupportedValue {
        /// The kind of data that was rejected (e.g. `boolean`).
        kind: String,
    },

    /// The document could not be parsed.
    #[error("invalid {format} document: {message}")]
    InvalidDocument {
        /// Document format (`json` or `yaml`).
        format: String,
        /// Parser message.
        message: String,
    },
}

impl DomainError {
    /// Creates an `UnsupportedValue` error.
    #[must_use]
    pub fn unsupported_value(kind: impl Into<String>) -> Self {
        Self::UnsupportedValue { kind: kind.into() }
    }

    /// Creates an `InvalidDocument` error.
    #[must_use]
    pub fn invalid_document(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            format: format.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
