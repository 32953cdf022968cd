//! Expansion error types

use thiserror::Error;

/// Errors that abort an expansion call.
///
/// Missing variables, null variables and malformed placeholders are not
/// errors: they pass through as literal text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExpandError {
    /// Resolving a variable required resolving a variable already in progress.
    #[error("variable '{name}' raises circular dependency")]
    CircularDependency {
        /// The variable that was reached a second time.
        name: String,
    },
}

impl ExpandError {
    /// Creates a `CircularDependency` error.
    #[must_use]
    pub fn circular_dependency(name: impl Into<String>) -> Self {
        Self::CircularDependency { name: name.into() }
    }

    /// Returns true if this is a circular dependency error.
    #[must_use]
    pub const fn is_circular_dependency(&self) -> bool {
        matches!(self, Self::CircularDependency { .. })
    }

    /// Returns the variable name the error refers to.
    #[must_use]
    pub fn variable_name(&self) -> &str {
        match self {
            Self::CircularDependency { name } => name,
        }
    }
}

/// Result type alias for expansion operations.
pub type ExpandResult<T> = Result<T, ExpandError>;
