//! Object shapes with per-key converters.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::combinators::Optional;
use crate::containers::ToValue;
use crate::foundation::error::{Issue, Issues};
use crate::foundation::node::Node;
use crate::foundation::traits::{BoxedConverter, Convert};
use crate::leaf::unknown;

enum Rest {
    /// Undeclared keys are dropped.
    Drop,
    /// Undeclared keys are converted and kept.
    Keep(BoxedConverter),
}

/// Converts an object by running a dedicated converter per declared key.
///
/// Every declared key is converted even when absent from the input: the
/// converter receives a missing child, so optionals and defaults decide what
/// absence means per field. Failures aggregate across all keys. Declared
/// keys whose result is missing are left out of the output.
///
/// [`strict`] drops undeclared input keys; [`shape`] keeps them, passing each
/// through a rest converter. In the output, kept undeclared keys come first
/// and declared keys follow, each group in document respectively declaration
/// order.
pub struct ObjectShape {
    fields: Vec<(String, BoxedConverter)>,
    rest: Rest,
}

/// Object shape that drops undeclared keys.
pub fn strict() -> ObjectShape {
    ObjectShape {
        fields: Vec::new(),
        rest: Rest::Drop,
    }
}

/// Object shape that passes undeclared keys through unconverted.
pub fn shape() -> ObjectShape {
    ObjectShape {
        fields: Vec::new(),
        rest: Rest::Keep(Box::new(unknown())),
    }
}

impl fmt::Debug for ObjectShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectShape")
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

impl ObjectShape {
    /// Declares a key converted by `converter`.
    #[must_use]
    pub fn field<C>(mut self, name: impl Into<String>, converter: C) -> Self
    where
        C: Convert<Input = Value> + Send + Sync + 'static,
        C::Output: Serialize,
    {
        self.fields
            .push((name.into(), Box::new(ToValue::new(converter))));
        self
    }

    /// Converts undeclared keys with `converter` instead of passing them
    /// through.
    #[must_use]
    pub fn with_rest<C>(mut self, converter: C) -> Self
    where
        C: Convert<Input = Value> + Send + Sync + 'static,
        C::Output: Serialize,
    {
        self.rest = Rest::Keep(Box::new(ToValue::new(converter)));
        self
    }

    /// Wraps every declared (and rest) converter in `optional`, so absent
    /// keys simply drop out.
    #[must_use]
    pub fn partial(self) -> Self {
        let fields = self
            .fields
            .into_iter()
            .map(|(name, converter)| {
                (name, Box::new(Optional::new(converter)) as BoxedConverter)
            })
            .collect();
        let rest = match self.rest {
            Rest::Drop => Rest::Drop,
            Rest::Keep(converter) => {
                Rest::Keep(Box::new(Optional::new(converter)) as BoxedConverter)
            }
        };
        Self { fields, rest }
    }

    fn convert_declared(
        &self,
        node: &Node<Value>,
        entries: &Map<String, Value>,
    ) -> Result<Map<String, Value>, Issues> {
        let mut issues: Vec<Issue> = Vec::new();
        let mut outputs: Map<String, Value> = Map::new();
        for (name, converter) in &self.fields {
            let child = match entries.get(name) {
                Some(value) => node.child(name.as_str(), value.clone()),
                None => node.missing_child(name.as_str()),
            };
            match converter.try_convert_node(child) {
                Ok(result) => {
                    if let Some(output) = result.into_value() {
                        outputs.insert(name.clone(), output);
                    }
                }
                Err(failure) => issues.extend(failure),
            }
        }
        match Issues::from_vec(issues) {
            Some(issues) => Err(issues),
            None => Ok(outputs),
        }
    }

    fn convert_rest(
        &self,
        node: &Node<Value>,
        entries: &Map<String, Value>,
        converter: &BoxedConverter,
    ) -> Result<Map<String, Value>, Issues> {
        let mut issues: Vec<Issue> = Vec::new();
        let mut outputs: Map<String, Value> = Map::new();
        for (key, item) in entries {
            if self.fields.iter().any(|(name, _)| name == key) {
                continue;
            }
            match converter.try_convert_node(node.child(key.as_str(), item.clone())) {
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
            None => Ok(outputs),
        }
    }
}

impl Convert for ObjectShape {
    type Input = Value;
    type Output = Map<String, Value>;

    fn name(&self) -> String {
        let fields = self
            .fields
            .iter()
            .map(|(name, converter)| format!("{name}: {}", converter.name()))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{{{fields}}}")
    }

    fn try_convert_node(&self, node: Node<Value>) -> Result<Node<Map<String, Value>>, Issues> {
        let Some(value) = node.value() else {
            return Err(Issues::of(Issue::new(node.path(), self.name())));
        };
        let Value::Object(entries) = value else {
            return Err(Issues::of(Issue::mismatch(node.path(), "object", value)));
        };

        let declared = self.convert_declared(&node, entries)?;
        let mut output = match &self.rest {
            Rest::Drop => Map::new(),
            Rest::Keep(converter) => self.convert_rest(&node, entries, converter)?,
        };
        output.extend(declared);
        Ok(node.set_value(output))
    }
}
