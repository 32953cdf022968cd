#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use pretty_assertions::assert_eq;
use serde_json::json;
use varexpand_application::{
    Context, ExpandError, ExpandResult, Expander, Root, Value, context_from_value, expand,
};

fn ctx(value: serde_json::Value) -> Context {
    context_from_value(value).expect("context fixture")
}

fn root(value: serde_json::Value) -> Root {
    Root::try_from(value).expect("root fixture")
}

/// Mirrors `expand(root, layer1, layer2, ...)`.
fn run(root_json: serde_json::Value, layers: &[serde_json::Value]) -> ExpandResult<Root> {
    let layers: Vec<Context> = layers.iter().cloned().map(ctx).collect();
    let refs: Vec<&Context> = layers.iter().collect();
    expand(Some(&root(root_json)), &refs).map(|r| r.expect("root given"))
}

fn expanded(root_json: serde_json::Value, layers: &[serde_json::Value]) -> Root {
    run(root_json, layers).expect("expansion succeeds")
}

#[test]
fn test_primitives() {
    assert_eq!(expanded(json!("abc"), &[]), root(json!("abc")));
    assert_eq!(expanded(json!(3), &[]), root(json!(3)));
}

#[test]
fn test_no_arguments() {
    assert_eq!(expand(None, &[]).unwrap(), None);
}

#[test]
fn test_names() {
    assert_eq!(expanded(json!("$abc"), &[json!({"abc": 1})]), root(json!("1")));

    assert_eq!(
        expanded(json!("$abc-def"), &[json!({"abc": 1, "abc-": 2, "abc-def": 3})]),
        root(json!("1-def"))
    );

    assert_eq!(
        expanded(json!("$abc-def"), &[json!({"abc-": 1, "abc-def": 2})]),
        root(json!("$abc-def"))
    );

    assert_eq!(expanded(json!("${abc}"), &[json!({"abc": 1})]), root(json!("1")));

    assert_eq!(
        expanded(json!("${abc-}def"), &[json!({"abc": 1, "abc-": 2, "abc-def": 3})]),
        root(json!("2def"))
    );

    assert_eq!(
        expanded(json!("${abc-def}"), &[json!({"abc": 1, "abc-": 2, "abc-def": 3})]),
        root(json!("3"))
    );
}

#[test]
fn test_string_expansion() {
    assert_eq!(expanded(json!("$a"), &[json!({"a": 1})]), root(json!("1")));
    assert_eq!(expanded(json!("${a}"), &[json!({"a": 1})]), root(json!("1")));
    assert_eq!(
        expanded(json!("$a $b"), &[json!({"a": "$b", "b": 2})]),
        root(json!("2 2"))
    );
    assert_eq!(
        expanded(json!("$a ${c}"), &[json!({"a": "$b", "b": 3, "c": 3})]),
        root(json!("3 3"))
    );
}

#[test]
fn test_string_not_found_expansion() {
    assert_eq!(expanded(json!("$b"), &[json!({"b": ""})]), root(json!("")));
    assert_eq!(expanded(json!("$b"), &[json!({"b": null})]), root(json!("$b")));
    assert_eq!(expanded(json!("$b"), &[json!({})]), root(json!("$b")));
    assert_eq!(expanded(json!("$b"), &[]), root(json!("$b")));
}

#[test]
fn test_string_expansion_with_nested_context() {
    assert_eq!(
        expanded(json!("$a"), &[json!({"a": 1}), json!({"a": 3})]),
        root(json!("1"))
    );

    assert_eq!(
        expanded(json!("$a"), &[json!({"a": "$b", "b": 2}), json!({"b": 3})]),
        root(json!("2"))
    );

    assert_eq!(
        expanded(json!("$a"), &[json!({"a": "$b"}), json!({"b": 3}), json!({"b": 4})]),
        root(json!("3"))
    );

    assert_eq!(
        expanded(
            json!("$a"),
            &[json!({"b": 5}), json!({"a": "$b"}), json!({"a": 1, "b": 2})]
        ),
        root(json!("5"))
    );
}

#[test]
fn test_transitive_resolution_across_layers() {
    assert_eq!(
        expanded(json!("$a"), &[json!({"a": "$b", "b": "$c"}), json!({"c": "final"})]),
        root(json!("final"))
    );
}

#[test]
fn test_null_shadows_later_layer() {
    assert_eq!(
        expanded(json!("$a"), &[json!({"a": null}), json!({"a": "later"})]),
        root(json!("$a"))
    );
}

#[test]
fn test_cycle_expansion() {
    let err = run(json!("$a"), &[json!({"a": "$b", "b": "$a"})]).unwrap_err();
    assert!(err.is_circular_dependency());

    let err = run(json!({"a": "$b", "b": "$a"}), &[]).unwrap_err();
    assert!(err.is_circular_dependency());

    let err = run(
        json!({"a": "$c", "b": "$a"}),
        &[json!({"a": 1, "b": 3, "c": "$b"})],
    )
    .unwrap_err();
    assert!(err.is_circular_dependency());

    let err = run(json!({"a": "$a"}), &[json!({"a": 1})]).unwrap_err();
    assert_eq!(err, ExpandError::circular_dependency("a"));

    let err = run(
        json!({"a": "$b $c"}),
        &[json!({"a": 1, "b": 3, "c": "$d"}), json!({"d": "$a"})],
    )
    .unwrap_err();
    assert!(err.is_circular_dependency());
}

#[test]
fn test_cycle_error_message_names_variable() {
    let err = run(json!("$a"), &[json!({"a": "$b", "b": "$a"})]).unwrap_err();
    assert_eq!(err.to_string(), "variable 'a' raises circular dependency");
}

#[test]
fn test_object_expansion() {
    assert_eq!(
        expanded(json!({"a": 1, "b": 2}), &[json!({"c": 3, "d": 4})]),
        root(json!({"a": 1, "b": 2}))
    );

    assert_eq!(
        expanded(json!({"a": 1, "b": 2, "c": "$a"}), &[]),
        root(json!({"a": 1, "b": 2, "c": "1"}))
    );

    assert_eq!(
        expanded(json!({"a": "$b $c $d", "b": 2}), &[json!({"c": "1"})]),
        root(json!({"a": "2 1 $d", "b": 2}))
    );
}

#[test]
fn test_object_expansion_with_nested_context() {
    assert_eq!(
        expanded(json!({"a": 1, "b": 2}), &[json!({"b": 3, "a": 4, "c": 5})]),
        root(json!({"a": 1, "b": 2}))
    );

    assert_eq!(
        expanded(json!({"a": "$x"}), &[json!({"x": 1, "y": 2})]),
        root(json!({"a": "1"}))
    );
}

#[test]
fn test_object_expansion_keeps_key_order() {
    let out = expanded(json!({"z": "$a", "a": 1, "m": "$z"}), &[]);
    let object = out.into_object().unwrap();
    let keys: Vec<&str> = object.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
    assert_eq!(object["m"], Value::from("1"));
}

#[test]
fn test_special_cases() {
    let layer = json!({"a": 1, "b": 2});

    assert_eq!(expanded(json!("$a$b $a"), &[layer.clone()]), root(json!("12 1")));
    assert_eq!(expanded(json!("${a}$b"), &[layer.clone()]), root(json!("12")));
    assert_eq!(expanded(json!("$"), &[layer.clone()]), root(json!("$")));
    assert_eq!(expanded(json!("${}"), &[layer.clone()]), root(json!("${}")));
    assert_eq!(expanded(json!("$$"), &[layer.clone()]), root(json!("$")));
    assert_eq!(expanded(json!("$$$"), &[layer.clone()]), root(json!("$$")));
    assert_eq!(expanded(json!("$$$a"), &[layer.clone()]), root(json!("$1")));
    assert_eq!(expanded(json!("$a$$"), &[layer]), root(json!("1$")));
}

#[test]
fn test_arrays() {
    assert_eq!(expanded(json!([1, 2]), &[]), root(json!([1, 2])));
    assert_eq!(expanded(json!(["$a", "$b"]), &[]), root(json!(["$a", "$b"])));
    assert_eq!(
        expanded(json!(["$a", "$b"]), &[json!({"a": 1, "b": 2})]),
        root(json!(["1", "2"]))
    );
    assert_eq!(
        expanded(json!({"array": ["$a", "$b"], "c": 3}), &[json!({"a": 1, "b": 2})]),
        root(json!({"array": ["1", "2"], "c": 3}))
    );
}

#[test]
fn test_nested_arrays_keep_shape() {
    assert_eq!(
        expanded(json!([["$a", 1], [], "$b"]), &[json!({"a": "x", "b": [1, 2]})]),
        root(json!([["x", 1], [], "1,2"]))
    );
}

#[test]
fn test_expander_bound_layers() {
    let expander = Expander::new()
        .with_layer(ctx(json!({"scheme": "https", "host": "example.org"})))
        .with_layer(ctx(json!({"base": "$scheme://$host"})));

    let api = ctx(json!({"host": "api.example.org"}));
    let out = expander
        .expand(&root(json!({"health": "${base}/health"})), &[&api])
        .unwrap();

    assert_eq!(out, root(json!({"health": "https://api.example.org/health"})));
}
