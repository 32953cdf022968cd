//! Dependency resolution engine
//!
//! Resolves variables against a [`LayeredContext`], following references
//! transitively. Work is driven by an explicit stack of pending names rather
//! than recursion, so dependency chains of any depth are fine. The names on
//! the stack are exactly the current dependency path: reaching one of them
//! again is a cycle.

use std::collections::{HashMap, HashSet};

use varexpand_domain::{Context, LayeredContext, Value};

use super::parser::{extract_names, value_has_placeholders};
use super::substitute::substitute;
use crate::error::{ExpandError, ExpandResult};

/// Names currently being resolved, in push order.
#[derive(Debug, Default)]
struct DependencyStack {
    names: Vec<String>,
    in_progress: HashSet<String>,
}

impl DependencyStack {
    fn push(&mut self, name: &str) -> ExpandResult<()> {
        if self.in_progress.contains(name) {
            tracing::debug!(
                variable = name,
                path = ?self.names,
                "circular dependency detected"
            );
            return Err(ExpandError::circular_dependency(name));
        }

        tracing::trace!(variable = name, depth = self.names.len(), "resolving variable");
        self.in_progress.insert(name.to_string());
        self.names.push(name.to_string());
        Ok(())
    }

    fn pop(&mut self) -> Option<String> {
        let name = self.names.pop()?;
        self.in_progress.remove(&name);
        Some(name)
    }

    fn top(&self) -> Option<&str> {
        self.names.last().map(String::as_str)
    }

    fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn clear(&mut self) {
        self.names.clear();
        self.in_progress.clear();
    }
}

/// One resolution session over a raw table.
///
/// Holds the memo of fully substituted values and the dependency stack. Both
/// live exactly as long as the session; nothing is shared between sessions.
pub struct Resolution<'r, 'a> {
    raw: &'r LayeredContext<'a>,
    cache: HashMap<String, Value>,
    stack: DependencyStack,
}

impl<'r, 'a> Resolution<'r, 'a> {
    /// Starts a session over the given raw table.
    #[must_use]
    pub fn new(raw: &'r LayeredContext<'a>) -> Self {
        Self {
            raw,
            cache: HashMap::new(),
            stack: DependencyStack::default(),
        }
    }

    /// Resolves one variable to its fully substituted value.
    ///
    /// A name no layer defines resolves to `Null`, so substituting it leaves
    /// its placeholder untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ExpandError::CircularDependency`] if the variable depends on
    /// itself, directly or through other variables. The session stays usable:
    /// values cached before the cycle was found are kept.
    pub fn resolve_name(&mut self, name: &str) -> ExpandResult<Value> {
        if let Some(cached) = self.cache.get(name) {
            tracing::trace!(variable = name, "resolved from cache");
            return Ok(cached.clone());
        }

        let result = self.descend(name);
        if result.is_err() {
            self.stack.clear();
        }
        result
    }

    fn descend(&mut self, name: &str) -> ExpandResult<Value> {
        self.stack.push(name)?;
        let mut resolved = Value::Null;

        while let Some(top) = self.stack.top().map(str::to_owned) {
            let raw_value = self.raw.raw(&top);
            let dependencies = extract_names(raw_value);

            // Descend into the first dependency still missing; the top stays
            // on the stack until all of its dependencies are cached.
            if let Some(pending) = dependencies
                .iter()
                .find(|dep| !self.cache.contains_key(dep.as_str()))
            {
                self.stack.push(pending)?;
                continue;
            }

            let value = if value_has_placeholders(raw_value) {
                substitute(raw_value, &self.cache)
            } else {
                raw_value.clone()
            };

            self.stack.pop();
            tracing::trace!(variable = %top, "variable resolved");

            if self.stack.is_empty() {
                resolved = value.clone();
            }
            self.cache.insert(top, value);
        }

        Ok(resolved)
    }

    /// Resolves every requested name, in order.
    ///
    /// Names requested more than once appear once in the result.
    ///
    /// # Errors
    ///
    /// Returns [`ExpandError::CircularDependency`] on the first cycle found.
    /// No partial result is returned.
    pub fn resolve_all<I, S>(mut self, names: I) -> ExpandResult<Context>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut resolved = Context::new();

        for name in names {
            let name = name.as_ref();
            if resolved.contains_key(name) {
                continue;
            }
            let value = self.resolve_name(name)?;
            resolved.insert(name.to_string(), value);
        }

        Ok(resolved)
    }

    /// Returns the number of variables resolved so far in this session.
    #[must_use]
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }
}

/// Resolves the requested names against a raw table in one session.
///
/// # Errors
///
/// Returns [`ExpandError::CircularDependency`] if any requested name depends
/// on itself, directly or transitively.
pub fn resolve<I, S>(names: I, raw: &LayeredContext<'_>) -> ExpandResult<Context>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Resolution::new(raw).resolve_all(names)
}
