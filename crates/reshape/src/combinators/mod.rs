//! The converter combinator algebra.
//!
//! Combinators wrap converters into new converters: [`Pipe`] sequences,
//! [`Or`] tries alternatives with failure ranking, the default family fills
//! absent values, [`Optional`] and [`Required`] settle what absence means,
//! [`Compose`] fans one node out over several converters, and
//! [`FnConverter`] lifts plain functions. They are reached through the
//! [`ConvertExt`] builder methods or the free constructors re-exported here.

mod compose;
mod default;
mod func;
mod named;
mod optional;
mod or;
mod pipe;
mod required;

use serde::Serialize;

use crate::foundation::traits::{BoxedConverter, Convert};

pub use compose::{Compose, compose};
pub use default::{DefaultFrom, DefaultIfMissing, DefaultTo, DefaultWith};
pub use func::{FnConverter, from_fn};
pub use named::Named;
pub use optional::{Optional, optional};
pub use or::Or;
pub use pipe::Pipe;
pub use required::Required;

/// Builder methods available on every converter.
pub trait ConvertExt: Convert + Sized {
    /// Feeds this converter's output into `next`.
    #[must_use]
    fn pipe<B>(self, next: B) -> Pipe<Self, B>
    where
        B: Convert<Input = Self::Output>,
    {
        Pipe::new(self, next)
    }

    /// Falls back to `other` when this converter fails.
    #[must_use]
    fn or<R>(self, other: R) -> Or<Self, R>
    where
        R: Convert<Input = Self::Input, Output = Self::Output>,
    {
        Or::new(self, other)
    }

    /// Converts `value` in place of a missing input.
    #[must_use]
    fn default_to(self, value: Self::Input) -> DefaultTo<Self>
    where
        Self::Input: Serialize,
    {
        DefaultTo::new(self, value)
    }

    /// Converts the result of `make` in place of a missing input.
    #[must_use]
    fn default_with<F>(self, make: F) -> DefaultWith<Self, F>
    where
        F: Fn() -> Self::Input,
    {
        DefaultWith::new(self, make)
    }

    /// Lets `fallback` produce the missing input, then converts its result.
    #[must_use]
    fn default_from<D>(self, fallback: D) -> DefaultFrom<Self, D>
    where
        D: Convert<Input = Self::Input, Output = Self::Input>,
    {
        DefaultFrom::new(self, fallback)
    }

    /// Replaces a missing *result* with `value`, without re-converting.
    #[must_use]
    fn default_if_missing(self, value: Self::Output) -> DefaultIfMissing<Self>
    where
        Self::Output: Serialize,
    {
        DefaultIfMissing::new(self, value)
    }

    /// Lets missing inputs pass through as missing results.
    #[must_use]
    fn optional(self) -> Optional<Self> {
        Optional::new(self)
    }

    /// Fails when the result of this converter is missing.
    #[must_use]
    fn required(self) -> Required<Self> {
        Required::new(self)
    }

    /// Overrides the display name.
    #[must_use]
    fn named(self, name: impl Into<String>) -> Named<Self> {
        Named::new(self, name)
    }

    /// Erases the implementation type for dynamic composition.
    #[must_use]
    fn boxed(self) -> BoxedConverter<Self::Input, Self::Output>
    where
        Self: Send + Sync + 'static,
    {
        Box::new(self)
    }
}

impl<C: Convert> ConvertExt for C {}
