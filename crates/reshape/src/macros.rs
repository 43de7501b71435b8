//! Template macro for path expressions.

/// Compiles a path expression template with interpolated arguments.
///
/// Literal text is written as string literals and arguments in braces. An
/// argument is anything with a [`PathArg`](crate::path::PathArg) conversion:
/// integers and strings insert as identifiers, indexes, or slice bounds
/// depending on position, key lists spread inside brackets, and a
/// [`Predicate`](crate::path::Predicate) forms a filter step that plain text
/// cannot express.
///
/// ```
/// use reshape::prelude::*;
/// use serde_json::json;
///
/// let index = 1;
/// let id = path!("$.items[" {index} "].id")?;
/// assert_eq!(id.convert(json!({"items": [{"id": 4}, {"id": 7}]}))?, json!(7));
///
/// let big = Predicate::named("big", |value, _, _| {
///     value.as_i64().is_some_and(|n| n > 10)
/// });
/// let hits = path!("$.counts[" {big} "]")?;
/// assert_eq!(hits.convert(json!({"counts": [3, 30, 7, 70]}))?, json!([30, 70]));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[macro_export]
macro_rules! path {
    (@piece $text:literal) => {
        $crate::path::Piece::Text(::std::string::String::from($text))
    };
    (@piece { $arg:expr }) => {
        $crate::path::Piece::Arg($crate::path::PathArg::from($arg))
    };
    ($($piece:tt)*) => {
        $crate::path::compile_template(::std::vec![
            $($crate::path!(@piece $piece)),*
        ])
    };
}
