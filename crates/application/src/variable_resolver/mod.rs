//! Variable resolution module
//!
//! Parses `$name`, `${name}` and `$$` placeholders, resolves them against
//! layered contexts and substitutes the results.
//!
//! # Usage
//!
//! ```
//! use varexpand_application::variable_resolver::{expand_object, expand_value};
//! use varexpand_domain::{Context, Value};
//!
//! let env = Context::from([("user".to_string(), Value::from("ada"))]);
//!
//! let greeting = expand_value(&Value::from("hello $user, that's $$5"), &[&env]).unwrap();
//! assert_eq!(greeting, Value::from("hello ada, that's $5"));
//!
//! let config = Context::from([
//!     ("home".to_string(), Value::from("/home/$user")),
//!     ("cache".to_string(), Value::from("${home}/.cache")),
//! ]);
//! let expanded = expand_object(&config, &[&env]).unwrap();
//! assert_eq!(expanded["cache"], Value::from("/home/ada/.cache"));
//! ```

pub mod dispatch;
pub mod engine;
pub mod expander;
pub mod parser;
pub mod substitute;

pub use dispatch::{expand, expand_all, expand_object, expand_value};
pub use engine::{Resolution, resolve};
pub use expander::Expander;
pub use parser::{
    Placeholder, PlaceholderKind, extract_names, extract_variable_names, has_placeholders,
    parse_placeholders, value_has_placeholders,
};
pub use substitute::{substitute, substitute_str};
