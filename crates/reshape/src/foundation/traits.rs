//! The converter abstraction and its root entry points.

use serde_json::Value;
use tracing::debug;

use crate::foundation::error::{Issue, Issues};
use crate::foundation::node::Node;

// ============================================================================
// CONVERSION
// ============================================================================

/// Outcome of a root-level conversion. Never panics, never throws.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "a failed conversion is reported through this value"]
pub enum Conversion<T> {
    /// The conversion produced a value.
    Converted(T),
    /// The conversion failed with at least one issue.
    Failed(Issues),
}

impl<T> Conversion<T> {
    pub fn is_converted(&self) -> bool {
        matches!(self, Self::Converted(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Converted(value) => Some(value),
            Self::Failed(_) => None,
        }
    }

    pub fn issues(&self) -> Option<&Issues> {
        match self {
            Self::Converted(_) => None,
            Self::Failed(issues) => Some(issues),
        }
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Self::Converted(value) => Some(value),
            Self::Failed(_) => None,
        }
    }

    pub fn into_result(self) -> Result<T, Issues> {
        match self {
            Self::Converted(value) => Ok(value),
            Self::Failed(issues) => Err(issues),
        }
    }
}

impl<T> From<Conversion<T>> for Result<T, Issues> {
    fn from(conversion: Conversion<T>) -> Self {
        conversion.into_result()
    }
}

// ============================================================================
// CONVERT
// ============================================================================

/// A named conversion from a positioned input to a positioned output.
///
/// Converters are built once and reused: they hold no per-call state, so one
/// instance can serve many documents, concurrently when its captured values
/// allow it. The node-level contract is the whole surface; combinators in
/// [`crate::combinators`] and containers in [`crate::containers`] compose on
/// top of it without special cases.
pub trait Convert {
    /// Type of value the converter reads.
    type Input;
    /// Type of value the converter produces.
    type Output;

    /// Name shown in issue messages and composed converter names.
    fn name(&self) -> String;

    /// Converts one node, reporting every issue found.
    ///
    /// A successful result may still be a missing node; whether that is
    /// acceptable is the caller's decision, which is how `optional` and
    /// `required` get their meaning.
    fn try_convert_node(&self, node: Node<Self::Input>) -> Result<Node<Self::Output>, Issues>;

    /// Converts a whole document, treating a missing result as failure.
    fn convert(&self, input: Value) -> Result<Self::Output, Issues>
    where
        Self: Convert<Input = Value> + Sized,
        Self::Output: Clone,
    {
        self.try_convert(input).into_result()
    }

    /// Converts a whole document into an explicit [`Conversion`] outcome.
    fn try_convert(&self, input: Value) -> Conversion<Self::Output>
    where
        Self: Convert<Input = Value> + Sized,
        Self::Output: Clone,
    {
        match self.try_convert_node(Node::root(input)) {
            Ok(node) => match node.into_value_or_path() {
                Ok(value) => Conversion::Converted(value),
                Err(path) => Conversion::Failed(Issues::of(Issue::new(path, self.name()))),
            },
            Err(issues) => {
                debug!(converter = %self.name(), issues = issues.len(), "conversion failed");
                Conversion::Failed(issues)
            }
        }
    }
}

impl<C> Convert for Box<C>
where
    C: Convert + ?Sized,
{
    type Input = C::Input;
    type Output = C::Output;

    fn name(&self) -> String {
        self.as_ref().name()
    }

    fn try_convert_node(&self, node: Node<Self::Input>) -> Result<Node<Self::Output>, Issues> {
        self.as_ref().try_convert_node(node)
    }
}

/// Converter with its implementation type erased, the currency of dynamic
/// composition in object shapes and unions.
pub type BoxedConverter<In = Value, Out = Value> =
    Box<dyn Convert<Input = In, Output = Out> + Send + Sync>;

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    struct Passthrough;

    impl Convert for Passthrough {
        type Input = Value;
        type Output = Value;

        fn name(&self) -> String {
            String::from("passthrough")
        }

        fn try_convert_node(&self, node: Node<Value>) -> Result<Node<Value>, Issues> {
            Ok(node)
        }
    }

    struct DropValue;

    impl Convert for DropValue {
        type Input = Value;
        type Output = Value;

        fn name(&self) -> String {
            String::from("drop")
        }

        fn try_convert_node(&self, node: Node<Value>) -> Result<Node<Value>, Issues> {
            Ok(node.set_missing())
        }
    }

    #[test]
    fn test_convert_returns_bare_value() {
        assert_eq!(Passthrough.convert(json!(5)), Ok(json!(5)));
    }

    #[test]
    fn test_missing_result_becomes_presence_issue() {
        let outcome = DropValue.try_convert(json!(5));
        assert_eq!(
            outcome,
            Conversion::Failed(Issues::of(Issue::new("$", "drop")))
        );
    }

    #[test]
    fn test_conversion_accessors() {
        let converted: Conversion<i64> = Conversion::Converted(3);
        assert!(converted.is_converted());
        assert_eq!(converted.value(), Some(&3));
        assert_eq!(converted.clone().ok(), Some(3));
        assert_eq!(converted.into_result(), Ok(3));

        let failed: Conversion<i64> = Conversion::Failed(Issues::of(Issue::new("$", "number")));
        assert!(!failed.is_converted());
        assert_eq!(failed.issues().map(Issues::len), Some(1));
        assert_eq!(failed.ok(), None);
    }

    #[test]
    fn test_boxed_converter_forwards() {
        let boxed: BoxedConverter = Box::new(Passthrough);
        assert_eq!(boxed.name(), "passthrough");
        assert_eq!(boxed.convert(json!([1])), Ok(json!([1])));
    }
}
