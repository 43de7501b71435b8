//! Discriminated unions.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::containers::ToValue;
use crate::foundation::display::display_value;
use crate::foundation::error::{Issue, Issues};
use crate::foundation::node::Node;
use crate::foundation::traits::{BoxedConverter, Convert};

enum Selector {
    /// Reads the discriminator from a key of the input.
    Key(String),
    /// Computes the discriminator with a converter.
    Converter(BoxedConverter),
}

/// Picks a branch converter by a discriminator value and runs it on the
/// whole input.
///
/// An unknown or missing discriminator, including a failing selector, is a
/// single failure at the input's own position listing the expected tags;
/// branch failures are reported as the branch reports them.
pub struct TaggedUnion {
    selector: Selector,
    branches: Vec<(Value, BoxedConverter)>,
}

/// Union discriminated by the value under `key`.
pub fn union(key: impl Into<String>) -> TaggedUnion {
    TaggedUnion {
        selector: Selector::Key(key.into()),
        branches: Vec::new(),
    }
}

/// Union discriminated by the output of `selector`.
pub fn union_by<C>(selector: C) -> TaggedUnion
where
    C: Convert<Input = Value, Output = Value> + Send + Sync + 'static,
{
    TaggedUnion {
        selector: Selector::Converter(Box::new(selector)),
        branches: Vec::new(),
    }
}

impl fmt::Debug for TaggedUnion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaggedUnion")
            .field("tags", &self.expected_tags())
            .finish_non_exhaustive()
    }
}

impl TaggedUnion {
    /// Adds a branch handling inputs whose discriminator equals `tag`.
    #[must_use]
    pub fn variant<C>(mut self, tag: impl Into<Value>, converter: C) -> Self
    where
        C: Convert<Input = Value> + Send + Sync + 'static,
        C::Output: Serialize,
    {
        self.branches
            .push((tag.into(), Box::new(ToValue::new(converter))));
        self
    }

    fn discriminator(&self, node: &Node<Value>) -> Option<Value> {
        match &self.selector {
            Selector::Key(key) => match node.value() {
                Some(Value::Object(entries)) => entries.get(key).cloned(),
                Some(Value::Array(items)) => {
                    key.parse::<usize>().ok().and_then(|i| items.get(i)).cloned()
                }
                _ => None,
            },
            Selector::Converter(converter) => converter
                .try_convert_node(node.clone())
                .ok()
                .and_then(|result| result.into_value()),
        }
    }

    fn expected_tags(&self) -> String {
        self.branches
            .iter()
            .map(|(tag, _)| display_value(tag))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl Convert for TaggedUnion {
    type Input = Value;
    type Output = Value;

    fn name(&self) -> String {
        self.branches
            .iter()
            .map(|(_, converter)| converter.name())
            .collect::<Vec<_>>()
            .join(" | ")
    }

    fn try_convert_node(&self, node: Node<Value>) -> Result<Node<Value>, Issues> {
        if node.is_missing() {
            return Err(Issues::of(Issue::new(node.path(), self.name())));
        }

        let found = self.discriminator(&node);
        if let Some(tag) = &found {
            for (candidate, branch) in &self.branches {
                if candidate == tag {
                    return branch.try_convert_node(node);
                }
            }
        }

        Err(Issues::of(Issue {
            path: node.path(),
            expected: self.expected_tags(),
            actual: found.as_ref().map(display_value),
        }))
    }
}
