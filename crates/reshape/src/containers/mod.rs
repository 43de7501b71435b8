//! Structural converters over arrays and objects.
//!
//! Containers apply converters to the elements of a value and aggregate
//! every child failure before reporting, so one pass surfaces all problems.
//! Child results that resolve to missing are compacted out of the output.
//! All containers require a present input.

mod array;
mod object;
mod record;
mod union;

use serde::Serialize;
use serde_json::Value;

use crate::foundation::error::{Issue, Issues};
use crate::foundation::node::Node;
use crate::foundation::traits::Convert;

pub use array::{ArrayOf, array};
pub use object::{ObjectShape, shape, strict};
pub use record::{RecordOf, record};
pub use union::{TaggedUnion, union, union_by};

/// Adapts a typed converter to a `Value`-producing one by serializing its
/// output, so heterogeneous field and branch converters can share one boxed
/// type. Missing results stay missing.
pub(crate) struct ToValue<C> {
    inner: C,
}

impl<C> ToValue<C> {
    pub(crate) fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C> Convert for ToValue<C>
where
    C: Convert,
    C::Output: Serialize,
{
    type Input = C::Input;
    type Output = Value;

    fn name(&self) -> String {
        self.inner.name()
    }

    fn try_convert_node(&self, node: Node<Self::Input>) -> Result<Node<Value>, Issues> {
        let result = self.inner.try_convert_node(node)?;
        match result.value() {
            None => Ok(result.set_missing()),
            Some(output) => match serde_json::to_value(output) {
                Ok(value) => Ok(result.set_value(value)),
                Err(_) => Err(Issues::of(Issue::new(result.path(), "serializable value"))),
            },
        }
    }
}
