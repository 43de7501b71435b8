//! Rejecting absent results.

use crate::foundation::error::{Issue, Issues};
use crate::foundation::node::Node;
use crate::foundation::traits::Convert;

/// Turns a missing result of the inner converter into a presence failure.
///
/// Useful behind converters that succeed with missing nodes, such as path
/// navigation: `path` locates a value or ends missing, `required` insists it
/// was there.
#[derive(Debug, Clone)]
pub struct Required<C> {
    inner: C,
}

impl<C> Required<C> {
    pub(crate) fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C: Convert> Convert for Required<C> {
    type Input = C::Input;
    type Output = C::Output;

    fn name(&self) -> String {
        format!("required {}", self.inner.name())
    }

    fn try_convert_node(&self, node: Node<Self::Input>) -> Result<Node<Self::Output>, Issues> {
        let result = self.inner.try_convert_node(node)?;
        if result.is_missing() {
            Err(Issues::of(Issue::new(result.path(), self.name())))
        } else {
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::combinators::ConvertExt;
    use crate::foundation::traits::Convert;
    use crate::path::path;

    #[test]
    fn test_required_rejects_missing_navigation_result() {
        let converter = path("$.user.name").unwrap().required();
        let issues = converter.convert(json!({"user": {}})).unwrap_err();
        assert_eq!(
            issues.first().to_string(),
            "At Path $.user.name, expected required path $.user.name but was MISSING_VALUE"
        );
    }

    #[test]
    fn test_required_passes_present_results() {
        let converter = path("$.user.name").unwrap().required();
        assert_eq!(
            converter.convert(json!({"user": {"name": "ada"}})),
            Ok(json!("ada"))
        );
    }
}
