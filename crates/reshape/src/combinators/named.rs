//! Renaming converters.

use crate::foundation::error::Issues;
use crate::foundation::node::Node;
use crate::foundation::traits::Convert;

/// Overrides the display name of the inner converter.
///
/// Composed names grow fast; a rename keeps issue messages and `or` branch
/// names readable where the mechanical name would leak plumbing.
#[derive(Debug, Clone)]
pub struct Named<C> {
    inner: C,
    name: String,
}

impl<C> Named<C> {
    pub(crate) fn new(inner: C, name: impl Into<String>) -> Self {
        Self {
            inner,
            name: name.into(),
        }
    }
}

impl<C: Convert> Convert for Named<C> {
    type Input = C::Input;
    type Output = C::Output;

    fn name(&self) -> String {
        self.name.clone()
    }

    fn try_convert_node(&self, node: Node<Self::Input>) -> Result<Node<Self::Output>, Issues> {
        self.inner.try_convert_node(node)
    }
}
