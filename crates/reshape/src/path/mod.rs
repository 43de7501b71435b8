//! Path expressions over JSON values.
//!
//! An expression such as `$.users[0].name` compiles once into a
//! [`PathConverter`] and can then be run against any value. Navigation never
//! fails: steps that select nothing produce a missing node that remembers
//! where the walk ended, so later converters can report the full path.
//!
//! The [`path`] function compiles plain text; the [`path!`](crate::path!)
//! macro additionally interpolates runtime arguments, including predicate
//! closures.

pub mod parser;
pub mod step;
pub mod tree;

pub use parser::{PathArg, Piece, SyntaxError, compile_template};
pub use step::{Key, Predicate, Step, ValueKey};
pub use tree::{PathConverter, Tree};

/// Compiles a path expression from plain text.
///
/// ```
/// use reshape::{Convert, Node};
/// use reshape::path::path;
/// use serde_json::json;
///
/// let ids = path("$.items[*].id")?;
/// let node = ids.try_convert_node(Node::root(json!({
///     "items": [{"id": 1}, {"id": 2}],
/// })))?;
/// assert_eq!(node.value(), Some(&json!([1, 2])));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn path(expression: &str) -> Result<PathConverter, SyntaxError> {
    compile_template(vec![Piece::Text(expression.to_owned())])
}
