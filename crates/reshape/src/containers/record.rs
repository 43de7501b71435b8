//! Records with uniform value types.

use indexmap::IndexMap;
use serde_json::Value;

use crate::foundation::error::{Issue, Issues};
use crate::foundation::node::Node;
use crate::foundation::traits::Convert;

/// Applies one converter to every value of a JSON object, keeping keys.
///
/// Keys convert in document order and the output preserves it. Failures
/// aggregate across all values; on success, keys whose result is missing are
/// dropped from the output.
#[derive(Debug, Clone)]
pub struct RecordOf<C> {
    value: C,
}

/// Converter for objects whose values all satisfy `value`.
pub fn record<C>(value: C) -> RecordOf<C>
where
    C: Convert<Input = Value>,
{
    RecordOf { value }
}

impl<C> Convert for RecordOf<C>
where
    C: Convert<Input = Value>,
    C::Output: Clone,
{
    type Input = Value;
    type Output = IndexMap<String, C::Output>;

    fn name(&self) -> String {
        format!("Record<string,{}>", self.value.name())
    }

    fn try_convert_node(
        &self,
        node: Node<Value>,
    ) -> Result<Node<IndexMap<String, C::Output>>, Issues> {
        let Some(value) = node.value() else {
            return Err(Issues::of(Issue::new(node.path(), self.name())));
        };
        let Value::Object(entries) = value else {
            return Err(Issues::of(Issue::mismatch(node.path(), "object", value)));
        };

        let mut issues: Vec<Issue> = Vec::new();
        let mut outputs: IndexMap<String, C::Output> = IndexMap::new();
        for (key, item) in entries {
            match self.value.try_convert_node(node.child(key.as_str(), item.clone())) {
                Ok(result) => {
                    if let Some(output) = result.into_value() {
                        outputs.insert(key.clone(), output);
                    }
                }
                Err(failure) => issues.extend(failure),
            }
        }

        match Issues::from_vec(issues) {
            Some(issues) => Err(issues),
            None => Ok(node.set_value(outputs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::foundation::traits::Convert;
    use crate::leaf::number;

    use super::*;

    #[test]
    fn test_record_converts_each_value() {
        let converter = record(number());
        assert_eq!(converter.name(), "Record<string,number>");

        let converted = converter
            .convert(json!({"a": 1, "b": 2.5}))
            .expect("all values are numbers");
        let expected: IndexMap<String, f64> =
            [(String::from("a"), 1.0), (String::from("b"), 2.5)]
                .into_iter()
                .collect();
        assert_eq!(converted, expected);
    }

    #[test]
    fn test_record_rejects_arrays() {
        let issues = record(number()).convert(json!([1, 2])).unwrap_err();
        assert_eq!(
            issues.first().to_string(),
            "At Path $, expected object but was [1, 2]"
        );
    }

    #[test]
    fn test_record_aggregates_and_orders_failures() {
        let issues = record(number())
            .convert(json!({"a": "x", "b": 2, "c": null}))
            .unwrap_err();
        assert_eq!(issues.len(), 2);
        assert_eq!(
            issues.first().to_string(),
            "At Path $.a, expected number but was \"x\""
        );
        assert_eq!(
            issues.iter().nth(1).map(ToString::to_string),
            Some(String::from("At Path $.c, expected number but was null"))
        );
    }
}
