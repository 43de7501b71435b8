//! Sequencing of two converters.

use crate::foundation::error::Issues;
use crate::foundation::node::Node;
use crate::foundation::traits::Convert;

/// Runs one converter and feeds its output node into the next.
///
/// The second converter also receives missing results, so it decides what
/// absence means at its stage. A failure in the first stage short-circuits.
#[derive(Debug, Clone)]
pub struct Pipe<A, B> {
    first: A,
    second: B,
}

impl<A, B> Pipe<A, B> {
    pub(crate) fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A, B> Convert for Pipe<A, B>
where
    A: Convert,
    B: Convert<Input = A::Output>,
{
    type Input = A::Input;
    type Output = B::Output;

    fn name(&self) -> String {
        format!("{} -> {}", self.first.name(), self.second.name())
    }

    fn try_convert_node(&self, node: Node<Self::Input>) -> Result<Node<Self::Output>, Issues> {
        let mid = self.first.try_convert_node(node)?;
        self.second.try_convert_node(mid)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::combinators::ConvertExt;
    use crate::foundation::traits::Convert;
    use crate::leaf::number;
    use crate::path::path;

    #[test]
    fn test_pipe_chains_and_names() {
        let cents = path("$.price")
            .unwrap()
            .pipe(number())
            .pipe(crate::combinators::from_fn("cents", |n: &f64| {
                Ok((n * 100.0).round() as i64)
            }));
        assert_eq!(cents.name(), "path $.price -> number -> cents");
        assert_eq!(cents.convert(json!({"price": 1.25})), Ok(125));
    }

    #[test]
    fn test_pipe_short_circuits_on_first_failure() {
        let converter = number().pipe(crate::combinators::from_fn("half", |n: &f64| Ok(n / 2.0)));
        let issues = converter.convert(json!("nope")).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues.first().to_string(),
            "At Path $, expected number but was \"nope\""
        );
    }

    #[test]
    fn test_pipe_forwards_missing_to_second_stage() {
        let converter = path("$.gone").unwrap().pipe(number());
        let issues = converter.convert(json!({})).unwrap_err();
        assert_eq!(
            issues.first().to_string(),
            "At Path $.gone, expected number but was MISSING_VALUE"
        );
    }
}
