//! Verbatim placeholder substitution
//!
//! One left-to-right pass: inserted text is never scanned again.

use varexpand_domain::{Lookup, Value};

use super::parser::{PlaceholderKind, parse_placeholders};

/// Substitutes placeholders in a string.
///
/// `$$` becomes `$`. A name is replaced by the rendering of its looked-up
/// value when the name is present and not `Null`; otherwise the placeholder
/// text is kept as is.
#[must_use]
pub fn substitute_str<L: Lookup + ?Sized>(input: &str, lookup: &L) -> String {
    let placeholders = parse_placeholders(input);

    if placeholders.is_empty() {
        return input.to_string();
    }

    let mut result = String::with_capacity(input.len());
    let mut last_end = 0;

    for placeholder in &placeholders {
        // Append text before this placeholder
        result.push_str(&input[last_end..placeholder.span.start]);

        match &placeholder.kind {
            PlaceholderKind::Escape => result.push('$'),
            PlaceholderKind::Bare(name) | PlaceholderKind::Braced(name) => {
                match lookup.lookup(name).and_then(Value::render) {
                    Some(text) => result.push_str(&text),
                    None => result.push_str(&input[placeholder.span.clone()]),
                }
            }
        }

        last_end = placeholder.span.end;
    }

    result.push_str(&input[last_end..]);
    result
}

/// Substitutes placeholders throughout a value, keeping its shape.
///
/// Arrays are substituted element by element; numbers and null are returned
/// unchanged.
#[must_use]
pub fn substitute<L: Lookup + ?Sized>(value: &Value, lookup: &L) -> Value {
    match value {
        Value::String(s) => Value::String(substitute_str(s, lookup)),
        Value::Array(items) => {
            Value::Array(items.iter().map(|item| substitute(item, lookup)).collect())
        }
        Value::Null | Value::Number(_) => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn table(entries: &[(&str, Value)]) -> HashMap<String, Value> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_substitute_found_names() {
        let lookup = table(&[("a", Value::from(1)), ("b", Value::from("two"))]);
        assert_eq!(substitute_str("$a ${b}!", &lookup), "1 two!");
    }

    #[test]
    fn test_missing_and_null_left_verbatim() {
        let lookup = table(&[("b", Value::Null)]);
        assert_eq!(substitute_str("$a ${b} $c", &lookup), "$a ${b} $c");
    }

    #[test]
    fn test_empty_string_value_replaces() {
        let lookup = table(&[("b", Value::from(""))]);
        assert_eq!(substitute_str("[$b]", &lookup), "[]");
    }

    #[test]
    fn test_escape_collapses() {
        let lookup = table(&[("a", Value::from(1))]);
        assert_eq!(substitute_str("$$", &lookup), "$");
        assert_eq!(substitute_str("$$$", &lookup), "$$");
        assert_eq!(substitute_str("$$$a", &lookup), "$1");
        assert_eq!(substitute_str("$a$$", &lookup), "1$");
    }

    #[test]
    fn test_inserted_text_is_not_rescanned() {
        let lookup = table(&[("a", Value::from("$b")), ("b", Value::from("deep"))]);
        assert_eq!(substitute_str("$a", &lookup), "$b");
    }

    #[test]
    fn test_array_value_renders_comma_joined() {
        let lookup = table(&[("list", Value::array([1, 2, 3]))]);
        assert_eq!(substitute_str("[$list]", &lookup), "[1,2,3]");
    }

    #[test]
    fn test_substitute_keeps_shape() {
        let lookup = table(&[("a", Value::from(1)), ("b", Value::from(2))]);
        let input = Value::array(vec![
            Value::from("$a"),
            Value::from(7),
            Value::array(vec![Value::from("$b$$")]),
            Value::Null,
        ]);

        assert_eq!(
            substitute(&input, &lookup),
            Value::array(vec![
                Value::from("1"),
                Value::from(7),
                Value::array(vec![Value::from("2$")]),
                Value::Null,
            ])
        );
    }
}
