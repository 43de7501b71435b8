//! Property-based tests for converter behavior
//!
//! Pins compaction, ordering, and fallback rules over generated inputs.

use proptest::prelude::*;
use reshape::prelude::*;
use serde_json::Value;

// ===== ARRAY COMPACTION =====

proptest! {
    #[test]
    fn array_compaction_keeps_present_results_in_order(
        flags in prop::collection::vec(any::<bool>(), 0..20),
    ) {
        let items: Vec<Value> = flags
            .iter()
            .enumerate()
            .map(|(index, with_id)| if *with_id { json!({"id": index}) } else { json!({}) })
            .collect();

        let converted = array(path("@.id").unwrap())
            .convert(Value::Array(items))
            .unwrap();

        let expected: Vec<Value> = flags
            .iter()
            .enumerate()
            .filter(|(_, with_id)| **with_id)
            .map(|(index, _)| json!(index))
            .collect();
        prop_assert_eq!(converted, expected);
    }

    #[test]
    fn an_array_of_unknown_is_identity(
        values in prop::collection::vec((0i64..100).prop_map(Value::from), 0..16),
    ) {
        let converted = array(unknown()).convert(Value::Array(values.clone())).unwrap();
        prop_assert_eq!(converted, values);
    }
}

// ===== KEY ORDER =====

proptest! {
    #[test]
    fn record_output_preserves_document_key_order(
        keys in prop::collection::hash_set("[a-z]{1,6}", 1..8),
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let mut document = serde_json::Map::new();
        for (position, key) in keys.iter().enumerate() {
            document.insert(key.clone(), json!(position));
        }

        let converted = record(number()).convert(Value::Object(document)).unwrap();

        let output: Vec<&str> = converted.keys().map(String::as_str).collect();
        let expected: Vec<&str> = keys.iter().map(String::as_str).collect();
        prop_assert_eq!(output, expected);
    }

    #[test]
    fn an_open_shape_with_no_declared_fields_is_identity(
        keys in prop::collection::hash_set("[a-z]{1,6}", 0..8),
    ) {
        let mut document = serde_json::Map::new();
        for (position, key) in keys.iter().enumerate() {
            document.insert(key.clone(), json!(position));
        }

        let converted = shape().convert(Value::Object(document.clone())).unwrap();
        prop_assert_eq!(converted, document);
    }
}

// ===== BRANCHES AND FALLBACKS =====

proptest! {
    #[test]
    fn or_accepts_the_union_of_branch_values(n in 0i64..10) {
        let low = one_of([0, 1, 2, 3, 4]);
        let high = one_of([5, 6, 7, 8, 9]);
        prop_assert_eq!(low.or(high).convert(json!(n)), Ok(json!(n)));
    }

    #[test]
    fn or_merges_equal_failures_into_one_issue(n in 10i64..20) {
        let low = one_of([0, 1, 2]);
        let high = one_of([5, 6, 7]);
        let issues = low.or(high).convert(json!(n)).unwrap_err();
        prop_assert_eq!(issues.len(), 1);
        prop_assert_eq!(issues.first().path.as_str(), "$");
    }

    #[test]
    fn defaults_apply_only_to_missing_inputs(n in any::<i32>(), fallback in any::<i32>()) {
        let converter = number().default_to(json!(fallback));

        let node = converter.try_convert_node(Node::missing_root()).unwrap();
        prop_assert_eq!(node.value().copied(), Some(f64::from(fallback)));

        prop_assert_eq!(converter.convert(json!(n)), Ok(f64::from(n)));
    }
}

// ===== REPORTING =====

proptest! {
    #[test]
    fn issues_display_every_issue_once(count in 1usize..5) {
        let mut issues = Issues::of(Issue::new("$.f0", "number"));
        for index in 1..count {
            issues.push(Issue::new(format!("$.f{index}"), "number"));
        }
        prop_assert_eq!(issues.len(), count);
        prop_assert_eq!(issues.to_string().matches("At Path").count(), count);
    }
}
