//! Combining several converters over one node.

use std::fmt;

use crate::foundation::error::{Issue, Issues};
use crate::foundation::node::Node;
use crate::foundation::traits::Convert;

/// Runs every converter of a tuple against the same node and combines their
/// outputs with a function.
///
/// All branches run even after one fails, so the returned issues cover every
/// problem at once. A branch that succeeds with a missing result counts as a
/// failure naming that branch: the combine function only ever sees present
/// values.
pub struct Compose<T, F> {
    converters: T,
    combine: F,
}

impl<T, F> fmt::Debug for Compose<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compose").finish_non_exhaustive()
    }
}

/// Combines the outputs of a tuple of converters, all run on the same node.
///
/// ```
/// use reshape::prelude::*;
/// use serde_json::json;
///
/// let sum = compose(
///     (path("$.a")?.pipe(number()), path("$.b")?.pipe(number())),
///     |a: f64, b: f64| a + b,
/// );
/// assert_eq!(sum.convert(json!({"a": 2, "b": 3}))?, 5.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn compose<T, F>(converters: T, combine: F) -> Compose<T, F> {
    Compose {
        converters,
        combine,
    }
}

macro_rules! impl_compose {
    ($($c:ident $v:ident),+) => {
        impl<In, Out, F, $($c),+> Convert for Compose<($($c,)+), F>
        where
            $($c: Convert<Input = In>,)+
            $($c::Output: Clone,)+
            F: Fn($($c::Output),+) -> Out,
        {
            type Input = In;
            type Output = Out;

            fn name(&self) -> String {
                let ($($v,)+) = &self.converters;
                let names = [$($v.name()),+];
                format!("({}) => _", names.join(", "))
            }

            fn try_convert_node(&self, node: Node<In>) -> Result<Node<Out>, Issues> {
                let ($($v,)+) = &self.converters;
                let mut issues: Vec<Issue> = Vec::new();
                $(
                    let $v = match $v.try_convert_node(node.clone()) {
                        Ok(result) => {
                            if result.is_missing() {
                                issues.push(Issue::new(result.path(), $v.name()));
                                None
                            } else {
                                result.into_value()
                            }
                        }
                        Err(failure) => {
                            issues.extend(failure);
                            None
                        }
                    };
                )+
                if let Some(issues) = Issues::from_vec(issues) {
                    return Err(issues);
                }
                match ($($v,)+) {
                    ($(Some($v),)+) => Ok(node.set_value((self.combine)($($v),+))),
                    _ => Err(Issues::of(Issue::new(node.path(), self.name()))),
                }
            }
        }
    };
}

impl_compose!(C1 c1, C2 c2);
impl_compose!(C1 c1, C2 c2, C3 c3);
impl_compose!(C1 c1, C2 c2, C3 c3, C4 c4);
impl_compose!(C1 c1, C2 c2, C3 c3, C4 c4, C5 c5);
impl_compose!(C1 c1, C2 c2, C3 c3, C4 c4, C5 c5, C6 c6);
impl_compose!(C1 c1, C2 c2, C3 c3, C4 c4, C5 c5, C6 c6, C7 c7);
impl_compose!(C1 c1, C2 c2, C3 c3, C4 c4, C5 c5, C6 c6, C7 c7, C8 c8);

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::combinators::ConvertExt;
    use crate::foundation::traits::Convert;
    use crate::leaf::{number, string};
    use crate::path::path;

    use super::*;

    #[test]
    fn test_compose_combines_branch_results() {
        let full_name = compose(
            (
                path("$.first").unwrap().pipe(string()),
                path("$.last").unwrap().pipe(string()),
            ),
            |first: String, last: String| format!("{first} {last}"),
        );
        assert_eq!(
            full_name.name(),
            "(path $.first -> string, path $.last -> string) => _"
        );
        assert_eq!(
            full_name.convert(json!({"first": "Ada", "last": "Lovelace"})),
            Ok(String::from("Ada Lovelace"))
        );
    }

    #[test]
    fn test_compose_aggregates_all_branch_failures() {
        let sum = compose(
            (
                path("$.a").unwrap().pipe(number()),
                path("$.b").unwrap().pipe(number()),
            ),
            |a: f64, b: f64| a + b,
        );
        let issues = sum.convert(json!({"a": "x"})).unwrap_err();
        assert_eq!(issues.len(), 2);
        assert_eq!(
            issues.first().to_string(),
            "At Path $.a, expected number but was \"x\""
        );
        assert_eq!(
            issues.iter().nth(1).map(ToString::to_string),
            Some(String::from(
                "At Path $.b, expected number but was MISSING_VALUE"
            ))
        );
    }

    #[test]
    fn test_compose_counts_missing_branch_as_failure() {
        let pair = compose(
            (path("$.a").unwrap(), path("$.b").unwrap()),
            |a: serde_json::Value, b: serde_json::Value| json!([a, b]),
        );
        let issues = pair.convert(json!({"a": 1})).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues.first().to_string(),
            "At Path $.b, expected path $.b but was MISSING_VALUE"
        );
    }
}
