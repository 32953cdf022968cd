//! Varexpand Application - The expansion engine
//!
//! Substitutes `$name` and `${name}` placeholders with values drawn from
//! layered contexts. Values that reference other variables are resolved
//! transitively, and circular references are reported as
//! [`ExpandError::CircularDependency`].
//!
//! Missing or null variables are not errors: their placeholders are kept as
//! literal text. `$$` always produces a single `$`.

pub mod error;
pub mod variable_resolver;

pub use error::{ExpandError, ExpandResult};
pub use variable_resolver::{
    Expander, expand, expand_all, expand_object, expand_value, extract_names, substitute,
};
pub use varexpand_domain::{
    Context, DomainError, DomainResult, LayeredContext, Lookup, Root, Value, context_from_json,
    context_from_value, context_from_yaml, root_from_json, root_from_yaml,
};
