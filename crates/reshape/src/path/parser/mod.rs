//! Template-to-steps compiler for path expressions.
//!
//! A template is a sequence of literal text pieces and interpolated
//! arguments. Text is split into single-character tokens, arguments ride
//! along as opaque literal tokens, and the lexer folds the stream into
//! [`Step`](crate::path::Step) values. Splitting interpolation from lexing is
//! what lets an argument carry things no text can, such as a predicate
//! closure or a pre-built key list.

mod lexer;
mod tokenize;
mod tokens;

use thiserror::Error;

use crate::path::PathConverter;
use crate::path::tree::Tree;

pub use tokens::PathArg;

// ============================================================================
// TEMPLATE PIECES
// ============================================================================

/// One piece of a path template: literal text or an interpolated argument.
#[derive(Debug, Clone)]
pub enum Piece {
    /// Literal expression text, lexed character by character.
    Text(String),
    /// An interpolated argument inserted as a single token.
    Arg(PathArg),
}

// ============================================================================
// ERRORS
// ============================================================================

/// A token the grammar has no rule for, reported with its position in the
/// template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unexpected token {kind}:{value} at position {position}")]
pub struct SyntaxError {
    /// Kind of the offending token.
    pub kind: &'static str,
    /// Source text of the token, empty for the end marker.
    pub value: String,
    /// Character offset within the template, arguments counting as one.
    pub position: usize,
}

// ============================================================================
// COMPILATION
// ============================================================================

/// Compiles template pieces into a ready-to-run path converter.
pub fn compile_template(pieces: Vec<Piece>) -> Result<PathConverter, SyntaxError> {
    let steps = lexer::lex(tokenize::tokenize(pieces))?;
    Ok(PathConverter::new(Tree::new(steps)))
}
