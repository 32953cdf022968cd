//! Varexpand Domain - Values and context layers
//!
//! This crate defines the data model the expansion engine works on: values,
//! expansion roots, context layers and the layered lookup view that merges
//! them. All types here are pure Rust with no I/O dependencies.

pub mod context;
pub mod document;
pub mod error;
pub mod value;

pub use context::{Context, LayeredContext, Lookup, context_from_value};
pub use document::{context_from_json, context_from_yaml, root_from_json, root_from_yaml};
pub use error::{DomainError, DomainResult};
pub use value::{Root, Value};
