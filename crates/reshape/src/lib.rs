//! # Reshape
//!
//! Path-addressed conversion and validation for loosely-typed values.
//!
//! Reshape turns external data, typically parsed JSON, into well-defined
//! values, reporting every problem it finds with the exact path of the
//! offending value. Two pieces work together: a small path expression
//! language (`$.users[0].name`, wildcards, slices, deep scans, predicates)
//! that locates values inside nested documents, and a converter algebra
//! (pipe, alternation with failure ranking, defaults, containers) that
//! validates and transforms what the paths find.
//!
//! ## Quick Start
//!
//! ```rust
//! use reshape::prelude::*;
//! use serde_json::{Value, json};
//!
//! let event = strict()
//!     .field("id", number())
//!     .field("tags", array(string()))
//!     .field("note", string().optional());
//!
//! let converted = event.convert(json!({"id": 7, "tags": ["a", "b"]}))?;
//! assert_eq!(Value::Object(converted), json!({"id": 7.0, "tags": ["a", "b"]}));
//!
//! let issues = event
//!     .convert(json!({"id": "x", "tags": ["a", 1]}))
//!     .unwrap_err();
//! assert_eq!(
//!     issues.to_string(),
//!     "At Path $.id, expected number but was \"x\", \
//!      At Path $.tags[1], expected string but was 1"
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Conversion never panics and never stops at the first problem a container
//! can see past: failures are values ([`Issues`]) until the crate boundary.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod combinators;
pub mod containers;
pub mod foundation;
pub mod leaf;
mod macros;
pub mod path;

pub use foundation::{
    BoxedConverter, Conversion, Convert, DisplayValue, Issue, Issues, Node, Unexpected,
    display_value,
};
pub use path::path;

/// Prelude for common imports
pub mod prelude {
    pub use crate::combinators::{
        Compose, ConvertExt, DefaultFrom, DefaultIfMissing, DefaultTo, DefaultWith, FnConverter,
        Named, Optional, Or, Pipe, Required, compose, from_fn, optional,
    };
    pub use crate::containers::{
        ArrayOf, ObjectShape, RecordOf, TaggedUnion, array, record, shape, strict, union,
        union_by,
    };
    pub use crate::foundation::{
        BoxedConverter, Conversion, Convert, Issue, Issues, Node, Unexpected,
    };
    pub use crate::leaf::{boolean, literal, never, null, number, one_of, string, unknown};
    pub use crate::path;
    pub use crate::path::{PathArg, PathConverter, Piece, Predicate, SyntaxError};

    pub use serde_json::json;
}
