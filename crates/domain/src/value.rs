//! Variable values and expansion roots

use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::error::{DomainError, DomainResult};

/// A value a variable can hold, and the unit an expansion produces.
///
/// `Null` doubles as the absent marker: a name missing from every layer
/// looks up as `Null`, and a placeholder that resolves to `Null` is left
/// verbatim during substitution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null or absent.
    #[default]
    Null,
    /// A number. Stored as `f64`, wrapped so values stay `Eq + Hash`.
    Number(OrderedFloat<f64>),
    /// A string, possibly containing placeholders.
    String(String),
    /// An ordered sequence of values; arrays may nest.
    Array(Vec<Self>),
}

impl Value {
    /// Creates a string value.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Creates a number value.
    #[must_use]
    pub const fn number(value: f64) -> Self {
        Self::Number(OrderedFloat(value))
    }

    /// Creates an array value from anything convertible into values.
    #[must_use]
    pub fn array<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::Array(items.into_iter().map(Into::into).collect())
    }

    /// Returns true for the null/absent marker.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string content, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric content, if this is a number.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(n.0),
            _ => None,
        }
    }

    /// Returns the elements, if this is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Human-readable name of the variant.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
        }
    }

    /// Renders the value as replacement text.
    ///
    /// Returns `None` for `Null`, which never replaces a placeholder.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        if self.is_null() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

/// Formats a number the way it reads in a template: integral values carry no
/// fractional part, and magnitudes below `1e-6` or from `1e21` up switch to
/// exponent form (`1e-7`, `1.5e+21`).
#[allow(clippy::float_cmp)]
fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        return format!("{sign}Infinity");
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }

    let formatted = format!("{n:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Number(n) => f.write_str(&format_number(n.0)),
            Self::String(s) => f.write_str(s),
            Self::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::number(f64::from(value))
    }
}

#[allow(clippy::cast_precision_loss)]
impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::number(value as f64)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::array(items)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = DomainError;

    fn try_from(value: serde_json::Value) -> DomainResult<Self> {
        match value {
            serde_json::Value::Null => Ok(Self::Null),
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(Self::number)
                .ok_or_else(|| DomainError::unsupported_value(format!("number {n}"))),
            serde_json::Value::String(s) => Ok(Self::String(s)),
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(Self::try_from)
                .collect::<DomainResult<Vec<_>>>()
                .map(Self::Array),
            serde_json::Value::Bool(_) => Err(DomainError::unsupported_value("boolean")),
            serde_json::Value::Object(_) => Err(DomainError::unsupported_value("object")),
        }
    }
}

/// The first argument of an expansion.
///
/// A `Value` is expanded against the supplied layers; an `Object` is expanded
/// against itself first and the supplied layers after it. The result of an
/// expansion has the same variant as its input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Root {
    /// A single value: string, number, array or null.
    Value(Value),
    /// A mapping whose own keys are all expanded.
    Object(Context),
}

impl Root {
    /// Returns the value, if this root is a value.
    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            Self::Object(_) => None,
        }
    }

    /// Returns the mapping, if this root is an object.
    #[must_use]
    pub const fn as_object(&self) -> Option<&Context> {
        match self {
            Self::Object(o) => Some(o),
            Self::Value(_) => None,
        }
    }

    /// Consumes the root, returning the value if it is one.
    #[must_use]
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Value(v) => Some(v),
            Self::Object(_) => None,
        }
    }

    /// Consumes the root, returning the mapping if it is one.
    #[must_use]
    pub fn into_object(self) -> Option<Context> {
        match self {
            Self::Object(o) => Some(o),
            Self::Value(_) => None,
        }
    }

    /// Returns true if this root is an object.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }
}

impl From<Value> for Root {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Context> for Root {
    fn from(object: Context) -> Self {
        Self::Object(object)
    }
}

impl TryFrom<serde_json::Value> for Root {
    type Error = DomainError;

    fn try_from(value: serde_json::Value) -> DomainResult<Self> {
        match value {
            serde_json::Value::Object(map) => {
                crate::context::context_from_map(map).map(Self::Object)
            }
            other => Value::try_from(other).map(Self::Value),
        }
    }
}
