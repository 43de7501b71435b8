//! Leaf converters for JSON primitives.
//!
//! These are the terminals of converter pipelines: presence-and-shape checks
//! that read one value and either pass it on, typed where the shape implies
//! a type. Every leaf except [`never`] requires a present input.

use serde_json::Value;

use crate::foundation::display::display_value;
use crate::foundation::error::{Issue, Issues};
use crate::foundation::node::Node;
use crate::foundation::traits::Convert;

// ============================================================================
// TYPED PRIMITIVES
// ============================================================================

/// Accepts any JSON number as `f64`.
#[derive(Debug, Clone, Copy)]
pub struct NumberConverter;

/// Converter for JSON numbers.
pub fn number() -> NumberConverter {
    NumberConverter
}

impl Convert for NumberConverter {
    type Input = Value;
    type Output = f64;

    fn name(&self) -> String {
        String::from("number")
    }

    fn try_convert_node(&self, node: Node<Value>) -> Result<Node<f64>, Issues> {
        match node.value() {
            Some(value) => match value.as_f64() {
                Some(parsed) => Ok(node.set_value(parsed)),
                None => Err(Issues::of(Issue::mismatch(node.path(), "number", value))),
            },
            None => Err(Issues::of(Issue::new(node.path(), "number"))),
        }
    }
}

/// Accepts a JSON string as an owned `String`.
#[derive(Debug, Clone, Copy)]
pub struct StringConverter;

/// Converter for JSON strings.
pub fn string() -> StringConverter {
    StringConverter
}

impl Convert for StringConverter {
    type Input = Value;
    type Output = String;

    fn name(&self) -> String {
        String::from("string")
    }

    fn try_convert_node(&self, node: Node<Value>) -> Result<Node<String>, Issues> {
        match node.value() {
            Some(Value::String(text)) => {
                let text = text.clone();
                Ok(node.set_value(text))
            }
            Some(other) => Err(Issues::of(Issue::mismatch(node.path(), "string", other))),
            None => Err(Issues::of(Issue::new(node.path(), "string"))),
        }
    }
}

/// Accepts a JSON boolean as `bool`.
#[derive(Debug, Clone, Copy)]
pub struct BooleanConverter;

/// Converter for JSON booleans.
pub fn boolean() -> BooleanConverter {
    BooleanConverter
}

impl Convert for BooleanConverter {
    type Input = Value;
    type Output = bool;

    fn name(&self) -> String {
        String::from("boolean")
    }

    fn try_convert_node(&self, node: Node<Value>) -> Result<Node<bool>, Issues> {
        match node.value() {
            Some(Value::Bool(flag)) => {
                let flag = *flag;
                Ok(node.set_value(flag))
            }
            Some(other) => Err(Issues::of(Issue::mismatch(node.path(), "boolean", other))),
            None => Err(Issues::of(Issue::new(node.path(), "boolean"))),
        }
    }
}

// ============================================================================
// VALUE MATCHERS
// ============================================================================

/// Accepts exactly one JSON value, named by its display form.
#[derive(Debug, Clone)]
pub struct LiteralConverter {
    value: Value,
    name: String,
}

/// Converter matching one exact value, e.g. `literal("v2")` or `literal(42)`.
pub fn literal(value: impl Into<Value>) -> LiteralConverter {
    let value = value.into();
    let name = display_value(&value);
    LiteralConverter { value, name }
}

/// Converter matching JSON `null`.
pub fn null() -> LiteralConverter {
    literal(Value::Null)
}

impl Convert for LiteralConverter {
    type Input = Value;
    type Output = Value;

    fn name(&self) -> String {
        self.name.clone()
    }

    fn try_convert_node(&self, node: Node<Value>) -> Result<Node<Value>, Issues> {
        match node.value() {
            Some(found) if *found == self.value => Ok(node),
            Some(other) => Err(Issues::of(Issue::mismatch(node.path(), &self.name, other))),
            None => Err(Issues::of(Issue::new(node.path(), &self.name))),
        }
    }
}

/// Accepts any of a fixed set of JSON values.
#[derive(Debug, Clone)]
pub struct OneOfConverter {
    values: Vec<Value>,
    name: String,
}

/// Converter matching any listed value, named `v1 | v2 | ...`.
pub fn one_of<I, V>(values: I) -> OneOfConverter
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let values: Vec<Value> = values.into_iter().map(Into::into).collect();
    let name = values
        .iter()
        .map(display_value)
        .collect::<Vec<_>>()
        .join(" | ");
    OneOfConverter { values, name }
}

impl Convert for OneOfConverter {
    type Input = Value;
    type Output = Value;

    fn name(&self) -> String {
        self.name.clone()
    }

    fn try_convert_node(&self, node: Node<Value>) -> Result<Node<Value>, Issues> {
        match node.value() {
            Some(found) if self.values.contains(found) => Ok(node),
            Some(other) => Err(Issues::of(Issue::mismatch(node.path(), &self.name, other))),
            None => Err(Issues::of(Issue::new(node.path(), &self.name))),
        }
    }
}

// ============================================================================
// PRESENCE MARKERS
// ============================================================================

/// Accepts any present value unchanged.
#[derive(Debug, Clone, Copy)]
pub struct UnknownConverter;

/// Converter passing any present value through.
pub fn unknown() -> UnknownConverter {
    UnknownConverter
}

impl Convert for UnknownConverter {
    type Input = Value;
    type Output = Value;

    fn name(&self) -> String {
        String::from("unknown")
    }

    fn try_convert_node(&self, node: Node<Value>) -> Result<Node<Value>, Issues> {
        if node.is_missing() {
            Err(Issues::of(Issue::new(node.path(), "unknown")))
        } else {
            Ok(node)
        }
    }
}

/// Accepts only absence; any present value is a shape error.
#[derive(Debug, Clone, Copy)]
pub struct NeverConverter;

/// Converter rejecting every present value.
pub fn never() -> NeverConverter {
    NeverConverter
}

impl Convert for NeverConverter {
    type Input = Value;
    type Output = Value;

    fn name(&self) -> String {
        String::from("never")
    }

    fn try_convert_node(&self, node: Node<Value>) -> Result<Node<Value>, Issues> {
        match node.value() {
            Some(found) => Err(Issues::of(Issue::mismatch(node.path(), "never", found))),
            None => Ok(node),
        }
    }
}
