//! Placeholder parser for `$name`, `${name}` and `$$`
//!
//! Scans strings left to right. At each `$` the first matching form wins:
//! `$$` (escape), `$` followed by `[A-Za-z0-9_]+` (bare name), then
//! `${` followed by `[A-Za-z0-9_-]+` and `}` (braced name). A `$` that starts
//! none of these is literal text and scanning resumes at the next character.

use std::ops::Range;

use varexpand_domain::Value;

/// The form a placeholder takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// `$$`, a literal dollar sign.
    Escape,
    /// `$name`.
    Bare(String),
    /// `${name}`.
    Braced(String),
}

/// A placeholder found in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// What was matched.
    pub kind: PlaceholderKind,

    /// Byte range in the original string covering the whole match.
    pub span: Range<usize>,
}

impl Placeholder {
    /// Creates a new placeholder.
    #[must_use]
    pub const fn new(kind: PlaceholderKind, span: Range<usize>) -> Self {
        Self { kind, span }
    }

    /// Returns the referenced variable name, or `None` for an escape.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            PlaceholderKind::Escape => None,
            PlaceholderKind::Bare(name) | PlaceholderKind::Braced(name) => Some(name),
        }
    }

    /// Returns true for `$$`.
    #[must_use]
    pub const fn is_escape(&self) -> bool {
        matches!(self.kind, PlaceholderKind::Escape)
    }

    fn into_name(self) -> Option<String> {
        match self.kind {
            PlaceholderKind::Escape => None,
            PlaceholderKind::Bare(name) | PlaceholderKind::Braced(name) => Some(name),
        }
    }
}

const fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

const fn is_braced_name_byte(b: u8) -> bool {
    is_name_byte(b) || b == b'-'
}

/// Parses a string and returns every placeholder in order.
///
/// # Examples
///
/// ```
/// use varexpand_application::variable_resolver::parser::{parse_placeholders, PlaceholderKind};
///
/// let found = parse_placeholders("$$ $host:${port-no}");
/// assert_eq!(found.len(), 3);
/// assert!(found[0].is_escape());
/// assert_eq!(found[1].kind, PlaceholderKind::Bare("host".into()));
/// assert_eq!(found[2].kind, PlaceholderKind::Braced("port-no".into()));
/// ```
#[must_use]
pub fn parse_placeholders(input: &str) -> Vec<Placeholder> {
    let bytes = input.as_bytes();
    let mut placeholders = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'$' {
            i += 1;
            continue;
        }

        if let Some(placeholder) = match_at(input, i) {
            i = placeholder.span.end;
            placeholders.push(placeholder);
        } else {
            // Lone `$`: literal text
            i += 1;
        }
    }

    placeholders
}

/// Tries to match a placeholder starting at the `$` at byte `start`.
fn match_at(input: &str, start: usize) -> Option<Placeholder> {
    let bytes = input.as_bytes();

    match *bytes.get(start + 1)? {
        b'$' => Some(Placeholder::new(PlaceholderKind::Escape, start..start + 2)),
        b'{' => {
            let name_start = start + 2;
            let len = bytes[name_start..]
                .iter()
                .take_while(|b| is_braced_name_byte(**b))
                .count();
            let name_end = name_start + len;

            if len == 0 || bytes.get(name_end) != Some(&b'}') {
                return None;
            }

            Some(Placeholder::new(
                PlaceholderKind::Braced(input[name_start..name_end].to_string()),
                start..name_end + 1,
            ))
        }
        b if is_name_byte(b) => {
            let name_start = start + 1;
            let len = bytes[name_start..]
                .iter()
                .take_while(|b| is_name_byte(**b))
                .count();
            let name_end = name_start + len;

            Some(Placeholder::new(
                PlaceholderKind::Bare(input[name_start..name_end].to_string()),
                start..name_end,
            ))
        }
        _ => None,
    }
}

/// Returns true if the string contains any placeholder, escapes included.
#[must_use]
pub fn has_placeholders(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes
        .iter()
        .enumerate()
        .any(|(i, b)| *b == b'$' && match_at(input, i).is_some())
}

/// Returns true if the value contains any placeholder, escapes included.
#[must_use]
pub fn value_has_placeholders(value: &Value) -> bool {
    match value {
        Value::String(s) => has_placeholders(s),
        Value::Array(items) => items.iter().any(value_has_placeholders),
        Value::Null | Value::Number(_) => false,
    }
}

/// Extracts the variable names referenced in a string, in order.
/// Escapes contribute nothing; repeated references are repeated.
#[must_use]
pub fn extract_variable_names(input: &str) -> Vec<String> {
    parse_placeholders(input)
        .into_iter()
        .filter_map(Placeholder::into_name)
        .collect()
}

/// Extracts the variable names referenced anywhere in a value.
///
/// Numbers and null reference nothing; arrays contribute the names of their
/// elements in element order.
#[must_use]
pub fn extract_names(value: &Value) -> Vec<String> {
    let mut names = Vec::new();
    collect_names(value, &mut names);
    names
}

fn collect_names(value: &Value, names: &mut Vec<String>) {
    match value {
        Value::String(s) => names.extend(extract_variable_names(s)),
        Value::Array(items) => {
            for item in items {
                collect_names(item, names);
            }
        }
        Value::Null | Value::Number(_) => {}
    }
}
