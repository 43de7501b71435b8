//! Fallbacks for missing values.
//!
//! The input-side forms ([`DefaultTo`], [`DefaultWith`], [`DefaultFrom`])
//! substitute a value for a missing input and re-feed it through the inner
//! converter, so the default is validated like any other input. The
//! output-side form ([`DefaultIfMissing`]) runs the inner converter first and
//! only patches a missing result, leaving present results untouched. A
//! present input never consults a default, even when something nested deeper
//! inside it is missing.

use std::fmt;

use serde::Serialize;

use crate::foundation::display::display_value;
use crate::foundation::error::Issues;
use crate::foundation::node::Node;
use crate::foundation::traits::Convert;

fn constant_label(value: &impl Serialize) -> String {
    serde_json::to_value(value).map_or_else(|_| String::from("_"), |v| display_value(&v))
}

// ============================================================================
// DEFAULT TO (constant)
// ============================================================================

/// Substitutes a constant for a missing input, then converts it.
pub struct DefaultTo<C: Convert> {
    inner: C,
    value: C::Input,
    label: String,
}

impl<C: Convert> DefaultTo<C> {
    pub(crate) fn new(inner: C, value: C::Input) -> Self
    where
        C::Input: Serialize,
    {
        let label = constant_label(&value);
        Self { inner, value, label }
    }
}

impl<C: Convert> fmt::Debug for DefaultTo<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultTo")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl<C> Convert for DefaultTo<C>
where
    C: Convert,
    C::Input: Clone,
{
    type Input = C::Input;
    type Output = C::Output;

    fn name(&self) -> String {
        format!("{} default {}", self.inner.name(), self.label)
    }

    fn try_convert_node(&self, node: Node<Self::Input>) -> Result<Node<Self::Output>, Issues> {
        if node.is_missing() {
            self.inner.try_convert_node(node.set_value(self.value.clone()))
        } else {
            self.inner.try_convert_node(node)
        }
    }
}

// ============================================================================
// DEFAULT WITH (function)
// ============================================================================

/// Substitutes the result of a nullary function for a missing input.
pub struct DefaultWith<C, F> {
    inner: C,
    make: F,
}

impl<C, F> DefaultWith<C, F> {
    pub(crate) fn new(inner: C, make: F) -> Self {
        Self { inner, make }
    }
}

impl<C, F> fmt::Debug for DefaultWith<C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultWith").finish_non_exhaustive()
    }
}

impl<C, F> Convert for DefaultWith<C, F>
where
    C: Convert,
    F: Fn() -> C::Input,
{
    type Input = C::Input;
    type Output = C::Output;

    fn name(&self) -> String {
        format!("{} default fn()", self.inner.name())
    }

    fn try_convert_node(&self, node: Node<Self::Input>) -> Result<Node<Self::Output>, Issues> {
        if node.is_missing() {
            self.inner.try_convert_node(node.set_value((self.make)()))
        } else {
            self.inner.try_convert_node(node)
        }
    }
}

// ============================================================================
// DEFAULT FROM (converter)
// ============================================================================

/// Lets a fallback converter produce the missing input.
///
/// The fallback runs on the missing node itself, so a path fallback can
/// navigate back through the node's parents and read a different part of the
/// same document.
#[derive(Debug, Clone)]
pub struct DefaultFrom<C, D> {
    inner: C,
    fallback: D,
}

impl<C, D> DefaultFrom<C, D> {
    pub(crate) fn new(inner: C, fallback: D) -> Self {
        Self { inner, fallback }
    }
}

impl<C, D> Convert for DefaultFrom<C, D>
where
    C: Convert,
    D: Convert<Input = C::Input, Output = C::Input>,
{
    type Input = C::Input;
    type Output = C::Output;

    fn name(&self) -> String {
        format!("{} default {}", self.inner.name(), self.fallback.name())
    }

    fn try_convert_node(&self, node: Node<Self::Input>) -> Result<Node<Self::Output>, Issues> {
        if node.is_missing() {
            let substituted = self.fallback.try_convert_node(node)?;
            self.inner.try_convert_node(substituted)
        } else {
            self.inner.try_convert_node(node)
        }
    }
}

// ============================================================================
// DEFAULT IF MISSING (output side)
// ============================================================================

/// Patches a missing result with a constant, without re-converting.
pub struct DefaultIfMissing<C: Convert> {
    inner: C,
    value: C::Output,
    label: String,
}

impl<C: Convert> DefaultIfMissing<C> {
    pub(crate) fn new(inner: C, value: C::Output) -> Self
    where
        C::Output: Serialize,
    {
        let label = constant_label(&value);
        Self { inner, value, label }
    }
}

impl<C: Convert> fmt::Debug for DefaultIfMissing<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultIfMissing")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl<C> Convert for DefaultIfMissing<C>
where
    C: Convert,
    C::Output: Clone,
{
    type Input = C::Input;
    type Output = C::Output;

    fn name(&self) -> String {
        format!("{} default {}", self.inner.name(), self.label)
    }

    fn try_convert_node(&self, node: Node<Self::Input>) -> Result<Node<Self::Output>, Issues> {
        let result = self.inner.try_convert_node(node)?;
        if result.is_missing() {
            Ok(result.set_value(self.value.clone()))
        } else {
            Ok(result)
        }
    }
}
