//! The positioned value model conversions run over.
//!
//! A [`Node`] wraps a value, or its absence, together with the step that
//! reached it and a handle on its parent. The chain back to the root lets a
//! node render the full path expression that locates it, and that rendering
//! only happens when an issue actually needs the path. Nodes are immutable;
//! operations like [`Node::set_value`] return a new node sharing the parent
//! chain.

use std::sync::{Arc, LazyLock};

use serde_json::Value;

use crate::path::step::Step;

/// A value (or a recorded absence) at a position inside the input document.
///
/// Cloning is cheap: the payload and parent chain are shared, never copied.
#[derive(Debug)]
pub struct Node<T> {
    inner: Arc<NodeInner<T>>,
}

#[derive(Debug)]
struct NodeInner<T> {
    parent: Option<Node<Value>>,
    step: Step,
    payload: Option<T>,
}

impl<T> Clone for Node<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

static MISSING_ROOT: LazyLock<Node<Value>> = LazyLock::new(|| Node::make(None, Step::Root, None));

fn render_path(parent: Option<&Node<Value>>, step: &Step) -> String {
    match parent {
        Some(parent) => step.render(&parent.path()),
        None => step.render(""),
    }
}

impl<T> Node<T> {
    fn make(parent: Option<Node<Value>>, step: Step, payload: Option<T>) -> Self {
        Self {
            inner: Arc::new(NodeInner {
                parent,
                step,
                payload,
            }),
        }
    }

    /// The value at this position, or `None` when the position is missing.
    pub fn value(&self) -> Option<&T> {
        self.inner.payload.as_ref()
    }

    /// Whether this position was reached but holds no value.
    pub fn is_missing(&self) -> bool {
        self.inner.payload.is_none()
    }

    /// Renders the path expression locating this node, e.g. `$.users[0]`.
    pub fn path(&self) -> String {
        render_path(self.inner.parent.as_ref(), &self.inner.step)
    }

    /// Replaces the value at this position, keeping the position itself.
    pub fn set_value<N>(&self, value: N) -> Node<N> {
        Node::make(self.inner.parent.clone(), self.inner.step.clone(), Some(value))
    }

    /// Clears the value at this position, keeping the position itself.
    pub fn set_missing<N>(&self) -> Node<N> {
        Node::make(self.inner.parent.clone(), self.inner.step.clone(), None)
    }

    /// Applies `f` to the value, keeping the position and presence state.
    pub fn map<N>(self, f: impl FnOnce(T) -> N) -> Node<N>
    where
        T: Clone,
    {
        match Arc::try_unwrap(self.inner) {
            Ok(inner) => Node::make(inner.parent, inner.step, inner.payload.map(f)),
            Err(shared) => Node::make(
                shared.parent.clone(),
                shared.step.clone(),
                shared.payload.clone().map(f),
            ),
        }
    }

    /// Consumes the node, yielding its value when present.
    pub fn into_value(self) -> Option<T>
    where
        T: Clone,
    {
        match Arc::try_unwrap(self.inner) {
            Ok(inner) => inner.payload,
            Err(shared) => shared.payload.clone(),
        }
    }

    /// Consumes the node, yielding its value, or the rendered path when the
    /// position is missing.
    pub fn into_value_or_path(self) -> Result<T, String>
    where
        T: Clone,
    {
        match Arc::try_unwrap(self.inner) {
            Ok(inner) => match inner.payload {
                Some(value) => Ok(value),
                None => Err(render_path(inner.parent.as_ref(), &inner.step)),
            },
            Err(shared) => match &shared.payload {
                Some(value) => Ok(value.clone()),
                None => Err(render_path(shared.parent.as_ref(), &shared.step)),
            },
        }
    }
}

impl Node<Value> {
    /// Root node holding a whole input document. Its path renders as `$`.
    pub fn root(value: Value) -> Self {
        Self::make(None, Step::Root, Some(value))
    }

    /// The shared root node with no value, used when converting absent input.
    pub fn missing_root() -> Self {
        MISSING_ROOT.clone()
    }

    /// Child of this node reached by `step`, holding `value`.
    ///
    /// Integers coerce to index brackets and names to dot steps; a name
    /// containing `.` becomes a quoted bracket key so the rendered path stays
    /// parseable.
    pub fn child(&self, step: impl Into<Step>, value: Value) -> Self {
        Self::make(Some(self.clone()), step.into(), Some(value))
    }

    /// Child position that exists in the path but carries no value.
    pub fn missing_child(&self, step: impl Into<Step>) -> Self {
        Self::make(Some(self.clone()), step.into(), None)
    }

    /// The parent of this node, when it has one.
    pub fn parent(&self) -> Option<Self> {
        self.inner.parent.clone()
    }

    /// Walks the parent chain back to the document root.
    pub(crate) fn to_root(&self) -> Self {
        match self.parent() {
            Some(parent) => parent.to_root(),
            None => self.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_root_path_renders_dollar() {
        assert_eq!(Node::root(json!(1)).path(), "$");
    }

    #[test]
    fn test_child_coercion_index_and_name() {
        let root = Node::root(json!({}));
        assert_eq!(root.child(2, json!(0)).path(), "$[2]");
        assert_eq!(
            root.child("a", json!(1)).child("b", json!(2)).path(),
            "$.a.b"
        );
    }

    #[test]
    fn test_dotted_name_renders_as_quoted_bracket() {
        let root = Node::root(json!({}));
        assert_eq!(root.child("a.b", json!(1)).path(), "$[\"a.b\"]");
    }

    #[test]
    fn test_set_value_keeps_position() {
        let child = Node::root(json!({})).child("a", json!(1));
        let replaced = child.set_value(json!(2));
        assert_eq!(replaced.path(), "$.a");
        assert_eq!(replaced.value(), Some(&json!(2)));

        let cleared: Node<Value> = replaced.set_missing();
        assert!(cleared.is_missing());
        assert_eq!(cleared.path(), "$.a");
    }

    #[test]
    fn test_missing_root_is_missing_at_dollar() {
        let node = Node::missing_root();
        assert!(node.is_missing());
        assert_eq!(node.path(), "$");
        assert_eq!(node.parent().map(|n| n.path()), None);
    }

    #[test]
    fn test_map_preserves_presence() {
        let node = Node::root(json!(2)).set_value(2_i64);
        let doubled = node.map(|v| v * 2);
        assert_eq!(doubled.value(), Some(&4));

        let missing: Node<i64> = Node::root(json!(2)).set_missing();
        assert!(missing.map(|v| v * 2).is_missing());
    }

    #[test]
    fn test_into_value_or_path() {
        let present = Node::root(json!({})).child("a", json!(5));
        assert_eq!(present.into_value_or_path(), Ok(json!(5)));

        let absent = Node::root(json!({})).missing_child("a");
        assert_eq!(absent.into_value_or_path(), Err(String::from("$.a")));
    }

    #[test]
    fn test_to_root_walks_all_the_way_up() {
        let leaf = Node::root(json!({}))
            .child("a", json!({}))
            .child("b", json!(1));
        assert_eq!(leaf.to_root().path(), "$");
    }
}
