//! Lifting plain functions into converters.

use std::fmt;
use std::marker::PhantomData;

use crate::foundation::error::{Issue, Issues, Unexpected};
use crate::foundation::node::Node;
use crate::foundation::traits::Convert;

/// A converter backed by a fallible function.
pub struct FnConverter<In, Out, F> {
    name: String,
    convert: F,
    _types: PhantomData<fn(&In) -> Out>,
}

/// Lifts `convert` into a named converter.
///
/// The function reports failure as an [`Unexpected`]; the engine positions it
/// at the node being converted. A missing input never reaches the function
/// and fails naming the converter.
///
/// ```
/// use reshape::prelude::*;
/// use serde_json::json;
///
/// let upper = string().pipe(from_fn("uppercase", |s: &String| Ok(s.to_uppercase())));
/// assert_eq!(upper.convert(json!("abc"))?, "ABC");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn from_fn<In, Out, F>(name: impl Into<String>, convert: F) -> FnConverter<In, Out, F>
where
    F: Fn(&In) -> Result<Out, Unexpected>,
{
    FnConverter {
        name: name.into(),
        convert,
        _types: PhantomData,
    }
}

impl<In, Out, F> fmt::Debug for FnConverter<In, Out, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnConverter")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<In, Out, F> Convert for FnConverter<In, Out, F>
where
    F: Fn(&In) -> Result<Out, Unexpected>,
{
    type Input = In;
    type Output = Out;

    fn name(&self) -> String {
        self.name.clone()
    }

    fn try_convert_node(&self, node: Node<In>) -> Result<Node<Out>, Issues> {
        let Some(value) = node.value() else {
            return Err(Issues::of(Issue::new(node.path(), self.name.clone())));
        };
        match (self.convert)(value) {
            Ok(output) => Ok(node.set_value(output)),
            Err(unexpected) => Err(Issues::of(unexpected.into_issue(node.path()))),
        }
    }
}
