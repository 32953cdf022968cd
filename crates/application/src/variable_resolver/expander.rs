//! Reusable expander bound to base layers

use varexpand_domain::{Context, LayeredContext, Root, Value};

use super::dispatch;
use crate::error::ExpandResult;

/// An expander that owns a fixed set of base layers.
///
/// Every call resolves against the layers passed to that call first and the
/// base layers after them, in the order they were added. Each call still runs
/// its own resolution session; nothing is cached between calls.
///
/// # Example
///
/// ```
/// use varexpand_application::{Context, Expander, Value};
///
/// let defaults = Context::from([
///     ("region".to_string(), Value::from("eu-west-1")),
///     ("bucket".to_string(), Value::from("assets-$region")),
/// ]);
/// let expander = Expander::new().with_layer(defaults);
///
/// let out = expander.expand_value(&Value::from("s3://$bucket"), &[]).unwrap();
/// assert_eq!(out, Value::from("s3://assets-eu-west-1"));
///
/// let prod = Context::from([("region".to_string(), Value::from("us-east-1"))]);
/// let out = expander.expand_value(&Value::from("s3://$bucket"), &[&prod]).unwrap();
/// assert_eq!(out, Value::from("s3://assets-us-east-1"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expander {
    base: Vec<Context>,
}

impl Expander {
    /// Creates an expander with no base layers.
    #[must_use]
    pub const fn new() -> Self {
        Self { base: Vec::new() }
    }

    /// Creates an expander from base layers, highest precedence first.
    #[must_use]
    pub fn from_layers<I>(layers: I) -> Self
    where
        I: IntoIterator<Item = Context>,
    {
        Self {
            base: layers.into_iter().collect(),
        }
    }

    /// Adds a base layer below the existing ones.
    #[must_use]
    pub fn with_layer(mut self, layer: Context) -> Self {
        self.push_layer(layer);
        self
    }

    /// Adds a base layer below the existing ones.
    pub fn push_layer(&mut self, layer: Context) {
        self.base.push(layer);
    }

    /// Returns the base layers, highest precedence first.
    #[must_use]
    pub fn layers(&self) -> &[Context] {
        &self.base
    }

    fn chain<'a>(&'a self, layers: &[&'a Context]) -> Vec<&'a Context> {
        layers.iter().copied().chain(self.base.iter()).collect()
    }

    /// Expands a root against the call layers, then the base layers.
    ///
    /// # Errors
    ///
    /// Returns [`ExpandError::CircularDependency`](crate::ExpandError) if a
    /// variable depends on itself.
    pub fn expand(&self, root: &Root, layers: &[&Context]) -> ExpandResult<Root> {
        match root {
            Root::Value(value) => self.expand_value(value, layers).map(Root::Value),
            Root::Object(object) => self.expand_object(object, layers).map(Root::Object),
        }
    }

    /// Expands a value against the call layers, then the base layers.
    ///
    /// # Errors
    ///
    /// Returns [`ExpandError::CircularDependency`](crate::ExpandError) if a
    /// variable depends on itself.
    pub fn expand_value(&self, root: &Value, layers: &[&Context]) -> ExpandResult<Value> {
        let raw = LayeredContext::from_layers(self.chain(layers));
        dispatch::expand_value_in(root, &raw)
    }

    /// Expands an object's own keys against itself, the call layers, then the
    /// base layers.
    ///
    /// # Errors
    ///
    /// Returns [`ExpandError::CircularDependency`](crate::ExpandError) if a
    /// key depends on itself.
    pub fn expand_object(&self, root: &Context, layers: &[&Context]) -> ExpandResult<Context> {
        dispatch::expand_object(root, &self.chain(layers))
    }

    /// Resolves every name of the call layers and base layers.
    ///
    /// # Errors
    ///
    /// Returns [`ExpandError::CircularDependency`](crate::ExpandError) if a
    /// variable depends on itself.
    pub fn expand_all(&self, layers: &[&Context]) -> ExpandResult<Context> {
        dispatch::expand_all(&self.chain(layers))
    }
}
