//! Core building blocks: issue records, the node model, and the converter
//! trait everything else composes on.

pub mod display;
pub mod error;
pub mod node;
pub mod traits;

pub use display::{display_value, DisplayValue};
pub use error::{Issue, Issues, Unexpected};
pub use node::Node;
pub use traits::{BoxedConverter, Conversion, Convert};
