//! Loading layers and roots from JSON or YAML text
//!
//! Both formats are read into a `serde_json::Value` first, so booleans and
//! nested objects are reported as [`DomainError::UnsupportedValue`] whichever
//! format they came from.

use crate::context::{Context, context_from_value};
use crate::error::{DomainError, DomainResult};
use crate::value::Root;

/// Parses a JSON object into a context layer.
///
/// # Errors
///
/// Returns [`DomainError::InvalidDocument`] on malformed JSON, or
/// [`DomainError::UnsupportedValue`] if a field is not a `Value`.
pub fn context_from_json(input: &str) -> DomainResult<Context> {
    let value: serde_json::Value = serde_json::from_str(input)
        .map_err(|e| DomainError::invalid_document("json", e.to_string()))?;
    context_from_value(value)
}

/// Parses a JSON document into an expansion root.
///
/// # Errors
///
/// Returns [`DomainError::InvalidDocument`] on malformed JSON, or
/// [`DomainError::UnsupportedValue`] if the document holds a boolean or an
/// object nested inside a value.
pub fn root_from_json(input: &str) -> DomainResult<Root> {
    let value: serde_json::Value = serde_json::from_str(input)
        .map_err(|e| DomainError::invalid_document("json", e.to_string()))?;
    Root::try_from(value)
}

/// Parses a YAML mapping into a context layer.
///
/// # Errors
///
/// Returns [`DomainError::InvalidDocument`] on malformed YAML, or
/// [`DomainError::UnsupportedValue`] if the document is not a mapping or a
/// field is not a `Value`.
pub fn context_from_yaml(input: &str) -> DomainResult<Context> {
    context_from_value(parse_yaml(input)?)
}

/// Parses a YAML document into an expansion root.
///
/// # Errors
///
/// Returns [`DomainError::InvalidDocument`] on malformed YAML, or
/// [`DomainError::UnsupportedValue`] if the document holds a boolean or an
/// object nested inside a value.
pub fn root_from_yaml(input: &str) -> DomainResult<Root> {
    Root::try_from(parse_yaml(input)?)
}

fn parse_yaml(input: &str) -> DomainResult<serde_json::Value> {
    serde_yaml::from_str(input).map_err(|e| DomainError::invalid_document("yaml", e.to_string()))
}
