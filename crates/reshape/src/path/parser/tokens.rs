//! Token model shared by the tokenizer and the lexer.

use std::fmt;

use crate::path::parser::SyntaxError;
use crate::path::step::{Key, Predicate};

/// Classification of one template character or interpolated argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Root,
    Current,
    Parent,
    Star,
    Dot,
    Colon,
    Comma,
    Open,
    Close,
    Quote,
    DblQuote,
    Whitespace,
    Raw,
    Literal,
    End,
}

impl TokenKind {
    /// Name used in syntax error messages.
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Current => "current",
            Self::Parent => "parent",
            Self::Star => "star",
            Self::Dot => "dot",
            Self::Colon => "colon",
            Self::Comma => "comma",
            Self::Open => "open",
            Self::Close => "close",
            Self::Quote => "quote",
            Self::DblQuote => "dblQuote",
            Self::Whitespace => "whitespace",
            Self::Raw => "raw",
            Self::Literal => "literal",
            Self::End => "end",
        }
    }
}

/// Interpolated argument of a [`crate::path!`] template.
///
/// Arguments substitute literally, with no re-parsing: a string interpolated
/// as an identifier contributes its exact characters, a predicate keeps its
/// function identity.
#[derive(Debug, Clone)]
pub enum PathArg {
    /// An integer index or slice bound.
    Int(i64),
    /// An identifier piece, object key, or quoted string content.
    Str(String),
    /// Several bracket keys at once.
    Keys(Vec<Key>),
    /// A programmatic filter.
    Predicate(Predicate),
}

impl fmt::Display for PathArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Str(value) => f.write_str(value),
            Self::Keys(keys) => {
                for (index, key) in keys.iter().enumerate() {
                    if index > 0 {
                        f.write_str(",")?;
                    }
                    match key {
                        Key::Index(i) => write!(f, "{i}")?,
                        Key::Name(name) => f.write_str(name)?,
                    }
                }
                Ok(())
            }
            Self::Predicate(predicate) => f.write_str(predicate.label()),
        }
    }
}

impl From<i64> for PathArg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for PathArg {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<usize> for PathArg {
    fn from(value: usize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<&str> for PathArg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for PathArg {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for PathArg {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<Predicate> for PathArg {
    fn from(value: Predicate) -> Self {
        Self::Predicate(value)
    }
}

impl From<Vec<Key>> for PathArg {
    fn from(keys: Vec<Key>) -> Self {
        Self::Keys(keys)
    }
}

impl From<Vec<i64>> for PathArg {
    fn from(keys: Vec<i64>) -> Self {
        Self::Keys(keys.into_iter().map(Key::Index).collect())
    }
}

impl From<Vec<&str>> for PathArg {
    fn from(keys: Vec<&str>) -> Self {
        Self::Keys(keys.into_iter().map(Key::from).collect())
    }
}

impl From<Vec<String>> for PathArg {
    fn from(keys: Vec<String>) -> Self {
        Self::Keys(keys.into_iter().map(Key::Name).collect())
    }
}

/// One token with its character position in the template.
#[derive(Debug, Clone)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) value: TokenValue,
    pub(crate) position: usize,
}

#[derive(Debug, Clone)]
pub(crate) enum TokenValue {
    Char(char),
    Literal(PathArg),
    None,
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(ch) => write!(f, "{ch}"),
            Self::Literal(arg) => write!(f, "{arg}"),
            Self::None => Ok(()),
        }
    }
}

impl Token {
    /// Syntax error pointing at this token.
    pub(crate) fn error(&self) -> SyntaxError {
        SyntaxError {
            kind: self.kind.as_str(),
            value: self.value.to_string(),
            position: self.position,
        }
    }
}
