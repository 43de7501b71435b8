//! Integration tests for container converters
//!
//! Objects, arrays, records, and tagged unions over realistic payloads,
//! including the error aggregation and key ordering rules callers rely on.

use reshape::prelude::*;
use serde_json::Value;

// ============================================================================
// OBJECT SHAPES
// ============================================================================

#[test]
fn test_strict_drops_and_shape_keeps_unknown_keys() {
    let document = json!({"one": "x", "two": "y"});

    let stripped = strict().field("one", string()).convert(document.clone()).unwrap();
    assert_eq!(Value::Object(stripped), json!({"one": "x"}));

    let kept = shape().field("one", string()).convert(document).unwrap();
    assert_eq!(Value::Object(kept), json!({"one": "x", "two": "y"}));
}

#[test]
fn test_shape_output_lists_passthrough_keys_first() {
    let converter = shape().field("b", number());
    let converted = converter.convert(json!({"a": 1, "b": 2, "c": 3})).unwrap();
    let keys: Vec<&str> = converted.keys().map(String::as_str).collect();
    assert_eq!(keys, ["a", "c", "b"]);
}

#[test]
fn test_object_conversion_reports_every_field_issue() {
    let converter = strict().field("id", number()).field("name", string());
    let issues = converter.convert(json!({"id": "x"})).unwrap_err();
    assert_eq!(issues.len(), 2);
    assert_eq!(
        issues.to_string(),
        "At Path $.id, expected number but was \"x\", At Path $.name, expected string but was MISSING_VALUE"
    );
}

#[test]
fn test_partial_shapes_tolerate_absent_fields() {
    let converter = strict().field("id", number()).field("note", string()).partial();

    let converted = converter.convert(json!({"id": 1})).unwrap();
    assert_eq!(Value::Object(converted), json!({"id": 1.0}));

    // Present fields are still converted strictly.
    let issues = converter.convert(json!({"id": true})).unwrap_err();
    assert_eq!(issues.to_string(), "At Path $.id, expected number but was true");
}

#[test]
fn test_typed_rest_converts_undeclared_keys() {
    let converter = shape().field("name", string()).with_rest(number());

    let converted = converter.convert(json!({"name": "a", "x": 1, "y": 2})).unwrap();
    assert_eq!(Value::Object(converted), json!({"x": 1.0, "y": 2.0, "name": "a"}));

    let issues = converter.convert(json!({"name": "a", "x": "bad"})).unwrap_err();
    assert_eq!(issues.to_string(), "At Path $.x, expected number but was \"bad\"");
}

#[test]
fn test_fields_can_pull_from_other_positions() {
    let converter = shape().field("owner", path("$.meta.owner").unwrap().pipe(string()));
    let converted = converter.convert(json!({"meta": {"owner": "ada"}, "x": 1})).unwrap();

    let keys: Vec<&str> = converted.keys().map(String::as_str).collect();
    assert_eq!(keys, ["meta", "x", "owner"]);
    assert_eq!(converted.get("owner"), Some(&json!("ada")));
}

#[test]
fn test_containers_require_a_present_input() {
    let issues = strict()
        .field("one", string())
        .try_convert_node(Node::missing_root())
        .unwrap_err();
    assert_eq!(issues.to_string(), "At Path $, expected {one: string} but was MISSING_VALUE");

    let issues = array(number()).try_convert_node(Node::missing_root()).unwrap_err();
    assert_eq!(issues.to_string(), "At Path $, expected Array<number> but was MISSING_VALUE");

    let issues = record(number()).try_convert_node(Node::missing_root()).unwrap_err();
    assert_eq!(
        issues.to_string(),
        "At Path $, expected Record<string,number> but was MISSING_VALUE"
    );
}

#[test]
fn test_containers_reject_mismatched_shapes() {
    let issues = strict().field("one", string()).convert(json!([1])).unwrap_err();
    assert_eq!(issues.to_string(), "At Path $, expected object but was [1]");

    let issues = record(number()).convert(json!("nope")).unwrap_err();
    assert_eq!(issues.to_string(), "At Path $, expected object but was \"nope\"");

    let issues = array(number()).convert(json!({})).unwrap_err();
    assert_eq!(issues.to_string(), "At Path $, expected Array but was {}");
}

// ============================================================================
// ARRAYS AND RECORDS
// ============================================================================

#[test]
fn test_arrays_convert_each_element() {
    let converter = array(number());
    assert_eq!(converter.convert(json!([1, 2, 3])), Ok(vec![1.0, 2.0, 3.0]));
    assert_eq!(converter.convert(json!([])), Ok(vec![]));

    let issues = converter.convert(json!([1, "x", true])).unwrap_err();
    assert_eq!(
        issues.to_string(),
        "At Path $[1], expected number but was \"x\", At Path $[2], expected number but was true"
    );
}

#[test]
fn test_arrays_compact_missing_element_results() {
    let ids = array(path("@.id").unwrap());
    assert_eq!(
        ids.convert(json!([{"id": 1}, {}, {"id": 3}])),
        Ok(vec![json!(1), json!(3)])
    );
}

#[test]
fn test_records_convert_every_value() {
    let converter = record(number());

    let scores = converter.convert(json!({"math": 90, "art": 75})).unwrap();
    assert_eq!(scores.get("math"), Some(&90.0));
    let subjects: Vec<&str> = scores.keys().map(String::as_str).collect();
    assert_eq!(subjects, ["math", "art"]);

    let issues = converter.convert(json!({"math": "A"})).unwrap_err();
    assert_eq!(issues.to_string(), "At Path $.math, expected number but was \"A\"");
}

// ============================================================================
// NESTING
// ============================================================================

#[test]
fn test_nested_containers_compose() {
    let converter = strict()
        .field("team", string())
        .field("members", array(strict().field("id", number()).field("name", string())));

    let converted = converter
        .convert(json!({
            "team": "core",
            "members": [{"id": 1, "name": "ada"}, {"id": 2, "name": "grace"}]
        }))
        .unwrap();
    assert_eq!(
        Value::Object(converted),
        json!({
            "team": "core",
            "members": [{"id": 1.0, "name": "ada"}, {"id": 2.0, "name": "grace"}]
        })
    );

    // Element issues carry the full path down into the nested object.
    let issues = converter
        .convert(json!({"team": "core", "members": [{"id": 1, "name": "ada"}, {"id": "x"}]}))
        .unwrap_err();
    assert_eq!(
        issues.to_string(),
        "At Path $.members[1].id, expected number but was \"x\", At Path $.members[1].name, expected string but was MISSING_VALUE"
    );
}

// ============================================================================
// TAGGED UNIONS
// ============================================================================

fn shape_union() -> TaggedUnion {
    union("kind")
        .variant("circle", strict().field("radius", number()))
        .variant("rect", strict().field("w", number()).field("h", number()))
}

#[test]
fn test_union_routes_to_the_tagged_branch() {
    assert_eq!(
        shape_union().convert(json!({"kind": "circle", "radius": 2})),
        Ok(json!({"radius": 2.0}))
    );
    assert_eq!(
        shape_union().convert(json!({"kind": "rect", "w": 3, "h": 4})),
        Ok(json!({"w": 3.0, "h": 4.0}))
    );
}

#[test]
fn test_union_rejects_unknown_and_absent_tags() {
    let issues = shape_union().convert(json!({"kind": "oval"})).unwrap_err();
    assert_eq!(
        issues.to_string(),
        "At Path $, expected \"circle\" | \"rect\" but was \"oval\""
    );

    let issues = shape_union().convert(json!({"radius": 2})).unwrap_err();
    assert_eq!(
        issues.to_string(),
        "At Path $, expected \"circle\" | \"rect\" but was MISSING_VALUE"
    );
}

#[test]
fn test_union_passes_branch_failures_through() {
    let issues = shape_union()
        .convert(json!({"kind": "circle", "radius": "big"}))
        .unwrap_err();
    assert_eq!(issues.to_string(), "At Path $.radius, expected number but was \"big\"");
}

#[test]
fn test_union_names_list_the_branches() {
    assert_eq!(shape_union().name(), "{radius: number} | {w: number, h: number}");

    let issues = shape_union().try_convert_node(Node::missing_root()).unwrap_err();
    assert_eq!(
        issues.to_string(),
        "At Path $, expected {radius: number} | {w: number, h: number} but was MISSING_VALUE"
    );
}

#[test]
fn test_union_by_resolves_the_tag_with_a_converter() {
    let converter = union_by(path("$.meta.kind").unwrap())
        .variant("v1", shape().field("payload", unknown()))
        .variant(2, strict().field("count", number()));

    assert_eq!(
        converter.convert(json!({"meta": {"kind": 2}, "count": 3})),
        Ok(json!({"count": 3.0}))
    );

    let issues = converter.convert(json!({"meta": {}})).unwrap_err();
    assert_eq!(issues.to_string(), "At Path $, expected \"v1\" | 2 but was MISSING_VALUE");
}
