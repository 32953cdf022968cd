//! Context layers and the merged lookup view over them

use std::collections::{HashMap, HashSet};
use std::hash::BuildHasher;

use indexmap::IndexMap;

use crate::error::{DomainError, DomainResult};
use crate::value::Value;

/// One caller-supplied layer of variables, keyed by name.
///
/// Insertion order is kept so that own keys iterate in a stable order.
pub type Context = IndexMap<String, Value>;

static NULL: Value = Value::Null;

/// Anything that can answer "what is the value of this name".
pub trait Lookup {
    /// Looks up a name. `None` means the name is not defined at all.
    fn lookup(&self, name: &str) -> Option<&Value>;
}

impl<S: BuildHasher> Lookup for HashMap<String, Value, S> {
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl<S: BuildHasher> Lookup for IndexMap<String, Value, S> {
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

/// An ordered stack of borrowed layers read as one table.
///
/// Layers are consulted in order (first wins). A layer that defines a name
/// shadows every later layer, even when its value is `Null`. Layers are never
/// mutated.
///
/// # Example
///
/// ```
/// use varexpand_domain::{Context, LayeredContext, Value};
///
/// let high = Context::from([("port".to_string(), Value::from(8080))]);
/// let low = Context::from([
///     ("port".to_string(), Value::from(8000)),
///     ("host".to_string(), Value::from("localhost")),
/// ]);
///
/// let merged = LayeredContext::from_layers([&high, &low]);
/// assert_eq!(merged.get("port"), Some(&Value::from(8080)));
/// assert_eq!(merged.get("host"), Some(&Value::from("localhost")));
/// assert!(merged.raw("missing").is_null());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LayeredContext<'a> {
    layers: Vec<&'a Context>,
}

impl<'a> LayeredContext<'a> {
    /// Creates an empty view with no layers.
    #[must_use]
    pub const fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Creates a view over the given layers, highest precedence first.
    #[must_use]
    pub fn from_layers<I>(layers: I) -> Self
    where
        I: IntoIterator<Item = &'a Context>,
    {
        Self {
            layers: layers.into_iter().collect(),
        }
    }

    /// Appends a layer with lower precedence than every existing one.
    pub fn push_layer(&mut self, layer: &'a Context) {
        self.layers.push(layer);
    }

    /// Builder form of [`push_layer`](Self::push_layer).
    #[must_use]
    pub fn with_layer(mut self, layer: &'a Context) -> Self {
        self.push_layer(layer);
        self
    }

    /// Returns the value from the first layer defining `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.layers.iter().copied().find_map(|layer| layer.get(name))
    }

    /// Returns the raw value of `name`, or the `Null` marker when no layer
    /// defines it.
    #[must_use]
    pub fn raw(&self, name: &str) -> &'a Value {
        self.get(name).unwrap_or(&NULL)
    }

    /// Returns true if any layer defines `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.layers.iter().any(|layer| layer.contains_key(name))
    }

    /// Returns every defined name once, in order of first definition walking
    /// layers from highest to lowest precedence.
    #[must_use]
    pub fn keys(&self) -> Vec<&'a str> {
        let mut seen = HashSet::new();
        self.layers
            .iter()
            .copied()
            .flat_map(IndexMap::keys)
            .map(String::as_str)
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Returns the layers, highest precedence first.
    #[must_use]
    pub fn layers(&self) -> &[&'a Context] {
        &self.layers
    }

    /// Returns the number of layers.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Returns true if no layer defines any name.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(|layer| layer.is_empty())
    }
}

impl Lookup for LayeredContext<'_> {
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

/// Converts a JSON object into a context layer.
///
/// # Errors
///
/// Returns [`DomainError::UnsupportedValue`] if the input is not an object or
/// any field holds a boolean or a nested object.
pub fn context_from_value(value: serde_json::Value) -> DomainResult<Context> {
    match value {
        serde_json::Value::Object(map) => context_from_map(map),
        serde_json::Value::Null => Err(DomainError::unsupported_value("null context")),
        other => Err(DomainError::unsupported_value(format!(
            "{} context",
            json_kind(&other)
        ))),
    }
}

pub(crate) fn context_from_map(
    map: serde_json::Map<String, serde_json::Value>,
) -> DomainResult<Context> {
    map.into_iter()
        .map(|(name, value)| Value::try_from(value).map(|v| (name, v)))
        .collect()
}

const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
