//! Tolerating absent values.

use crate::foundation::error::Issues;
use crate::foundation::node::Node;
use crate::foundation::traits::Convert;

/// Passes missing inputs through instead of letting the inner converter
/// report them.
///
/// The result of a missing input is a missing output node at the same
/// position; root-level entry points still treat that as a failure, so
/// `optional` is mostly meaningful inside containers, where a missing field
/// result is simply compacted away.
#[derive(Debug, Clone)]
pub struct Optional<C> {
    inner: C,
}

impl<C> Optional<C> {
    pub(crate) fn new(inner: C) -> Self {
        Self { inner }
    }
}

/// Wraps a converter so missing inputs succeed as missing outputs.
pub fn optional<C: Convert>(inner: C) -> Optional<C> {
    Optional::new(inner)
}

impl<C: Convert> Convert for Optional<C> {
    type Input = C::Input;
    type Output = C::Output;

    fn name(&self) -> String {
        format!("optional {}", self.inner.name())
    }

    fn try_convert_node(&self, node: Node<Self::Input>) -> Result<Node<Self::Output>, Issues> {
        if node.is_missing() {
            Ok(node.set_missing())
        } else {
            self.inner.try_convert_node(node)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::foundation::node::Node;
    use crate::foundation::traits::Convert;
    use crate::leaf::number;

    use super::*;

    #[test]
    fn test_optional_passes_missing_through() {
        let converter = optional(number());
        let result = converter
            .try_convert_node(Node::missing_root())
            .expect("missing is fine");
        assert!(result.is_missing());
    }

    #[test]
    fn test_optional_still_validates_present_values() {
        let converter = optional(number());
        assert_eq!(converter.convert(json!(2)), Ok(2.0));

        let issues = converter.convert(json!("x")).unwrap_err();
        assert_eq!(
            issues.first().to_string(),
            "At Path $, expected number but was \"x\""
        );
    }
}
