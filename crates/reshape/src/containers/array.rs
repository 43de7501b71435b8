//! Arrays of one element type.

use serde_json::Value;

use crate::foundation::error::{Issue, Issues};
use crate::foundation::node::Node;
use crate::foundation::traits::Convert;

/// Applies one converter to every element of a JSON array.
///
/// Elements convert in index order. When any element fails, the failure
/// carries the issues of every failing element; when all succeed, elements
/// whose result is missing are left out, shifting later indices in the
/// output.
#[derive(Debug, Clone)]
pub struct ArrayOf<C> {
    element: C,
}

/// Converter for arrays whose elements all satisfy `element`.
pub fn array<C>(element: C) -> ArrayOf<C>
where
    C: Convert<Input = Value>,
{
    ArrayOf { element }
}

impl<C> Convert for ArrayOf<C>
where
    C: Convert<Input = Value>,
    C::Output: Clone,
{
    type Input = Value;
    type Output = Vec<C::Output>;

    fn name(&self) -> String {
        format!("Array<{}>", self.element.name())
    }

    fn try_convert_node(&self, node: Node<Value>) -> Result<Node<Vec<C::Output>>, Issues> {
        let Some(value) = node.value() else {
            return Err(Issues::of(Issue::new(node.path(), self.name())));
        };
        let Value::Array(items) = value else {
            return Err(Issues::of(Issue::mismatch(node.path(), "Array", value)));
        };

        let mut issues: Vec<Issue> = Vec::new();
        let mut outputs: Vec<C::Output> = Vec::new();
        for (index, item) in items.iter().enumerate() {
            match self.element.try_convert_node(node.child(index, item.clone())) {
                Ok(result) => {
                    if let Some(output) = result.into_value() {
                        outputs.push(output);
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
    use crate::path::path;

    use super::*;

    #[test]
    fn test_array_converts_each_element() {
        let converter = array(number());
        assert_eq!(converter.name(), "Array<number>");
        assert_eq!(converter.convert(json!([1, 2, 3])), Ok(vec![1.0, 2.0, 3.0]));
        assert_eq!(converter.convert(json!([])), Ok(Vec::new()));
    }

    #[test]
    fn test_array_rejects_non_arrays() {
        let issues = array(number()).convert(json!({"0": 1})).unwrap_err();
        assert_eq!(
            issues.first().to_string(),
            "At Path $, expected Array but was {0: 1}"
        );
    }

    #[test]
    fn test_array_aggregates_every_failing_element() {
        let issues = array(number())
            .convert(json!([1, "x", 3, false]))
            .unwrap_err();
        assert_eq!(issues.len(), 2);
        assert_eq!(
            issues.first().to_string(),
            "At Path $[1], expected number but was \"x\""
        );
        assert_eq!(
            issues.iter().nth(1).map(ToString::to_string),
            Some(String::from("At Path $[3], expected number but was false"))
        );
    }

    #[test]
    fn test_array_compacts_missing_element_results() {
        // elements without the field resolve to missing and drop out
        let converter = array(path("@.id").unwrap());
        let converted = converter
            .convert(json!([{"id": 1}, {"other": 2}, {"id": 3}]))
            .expect("navigation never fails");
        assert_eq!(converted, vec![json!(1), json!(3)]);
    }
}
