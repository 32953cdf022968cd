//! Public expansion entry points
//!
//! Decides whether the caller expands a single value or a whole object, builds
//! the raw table from the supplied layers and hands the work to the engine.

use std::iter;

use varexpand_domain::{Context, LayeredContext, Root, Value};

use super::engine::resolve;
use super::parser::{extract_names, value_has_placeholders};
use super::substitute::substitute;
use crate::error::ExpandResult;

/// Expands a root against context layers, highest precedence first.
///
/// `None` stands for a call with no arguments and yields `Ok(None)`. A value
/// root is expanded with [`expand_value`], an object root with
/// [`expand_object`]; the result has the same shape as the root.
///
/// # Errors
///
/// Returns [`ExpandError::CircularDependency`](crate::ExpandError) if a
/// referenced variable depends on itself.
pub fn expand(root: Option<&Root>, layers: &[&Context]) -> ExpandResult<Option<Root>> {
    let Some(root) = root else {
        tracing::debug!("nothing to expand");
        return Ok(None);
    };

    let expanded = match root {
        Root::Value(value) => Root::Value(expand_value(value, layers)?),
        Root::Object(object) => Root::Object(expand_object(object, layers)?),
    };
    Ok(Some(expanded))
}

/// Expands the placeholders of a value against context layers.
///
/// Only the names the value references are resolved. The value itself is not
/// a layer. Strings, numbers and arrays keep their shape.
///
/// # Examples
///
/// ```
/// use varexpand_application::{Context, Value, expand_value};
///
/// let env = Context::from([
///     ("host".to_string(), Value::from("localhost")),
///     ("port".to_string(), Value::from(8080)),
///     ("url".to_string(), Value::from("http://$host:$port")),
/// ]);
///
/// let expanded = expand_value(&Value::from("GET ${url}/health"), &[&env]).unwrap();
/// assert_eq!(expanded, Value::from("GET http://localhost:8080/health"));
/// ```
///
/// # Errors
///
/// Returns [`ExpandError::CircularDependency`](crate::ExpandError) if a
/// referenced variable depends on itself.
pub fn expand_value(root: &Value, layers: &[&Context]) -> ExpandResult<Value> {
    let raw = LayeredContext::from_layers(layers.iter().copied());
    expand_value_in(root, &raw)
}

pub(crate) fn expand_value_in(root: &Value, raw: &LayeredContext<'_>) -> ExpandResult<Value> {
    if !value_has_placeholders(root) {
        return Ok(root.clone());
    }

    let names = extract_names(root);
    tracing::debug!(
        layers = raw.layer_count(),
        variables = names.len(),
        "expanding value"
    );

    let resolved = resolve(&names, raw)?;
    Ok(substitute(root, &resolved))
}

/// Expands every own key of an object.
///
/// The object is the highest precedence layer, so its own definitions win
/// over the extra layers, while its values may still reference names from
/// those layers. Keys that only exist in the extra layers are not part of the
/// result.
///
/// # Errors
///
/// Returns [`ExpandError::CircularDependency`](crate::ExpandError) if any key
/// depends on itself.
pub fn expand_object(root: &Context, layers: &[&Context]) -> ExpandResult<Context> {
    let raw = LayeredContext::from_layers(iter::once(root).chain(layers.iter().copied()));

    tracing::debug!(
        layers = raw.layer_count(),
        keys = root.len(),
        "expanding object"
    );

    resolve(root.keys(), &raw)
}

/// Resolves every name defined in any layer against all layers.
///
/// Keys appear in order of first definition, highest precedence layer first.
///
/// # Errors
///
/// Returns [`ExpandError::CircularDependency`](crate::ExpandError) if any
/// variable depends on itself.
pub fn expand_all(layers: &[&Context]) -> ExpandResult<Context> {
    let raw = LayeredContext::from_layers(layers.iter().copied());
    let names = raw.keys();

    tracing::debug!(
        layers = raw.layer_count(),
        keys = names.len(),
        "expanding all layers"
    );

    resolve(names, &raw)
}
