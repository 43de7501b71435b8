//! Lexing of the token list into navigation steps.
//!
//! The grammar is small and committed: the first token decides the base
//! (root, current, or a parent chain), then every following step opens with
//! `.` or `[`. The first token that fits nothing aborts with a
//! [`SyntaxError`]; expressions are compiled once, so there is no recovery.

use crate::path::parser::tokens::{PathArg, Token, TokenKind, TokenValue};
use crate::path::parser::SyntaxError;
use crate::path::step::{Key, Step};

/// Shift/unshift view over the token list.
///
/// The end token is never consumed past, so peeking is always valid.
struct TokenStream {
    tokens: Vec<Token>,
    index: usize,
}

impl TokenStream {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, index: 0 }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.index.min(self.tokens.len() - 1)]
    }

    fn shift(&mut self) -> Token {
        let token = self.peek().clone();
        if self.index < self.tokens.len() - 1 {
            self.index += 1;
        }
        token
    }

    fn unshift(&mut self) {
        if self.index > 0 {
            self.index -= 1;
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().kind == TokenKind::Whitespace {
            self.index += 1;
        }
    }
}

/// Lexes a tokenized template into ordered navigation steps.
pub(crate) fn lex(tokens: Vec<Token>) -> Result<Vec<Step>, SyntaxError> {
    let mut stream = TokenStream::new(tokens);
    let mut steps = lex_base(&mut stream)?;
    loop {
        match stream.peek().kind {
            TokenKind::Dot => {
                stream.shift();
                steps.push(lex_dot(&mut stream)?);
            }
            TokenKind::Open => {
                stream.shift();
                steps.push(lex_bracket(&mut stream)?);
            }
            TokenKind::End => return Ok(steps),
            _ => return Err(stream.peek().error()),
        }
    }
}

/// First step: `$`, `@`, or a chain of `^` hops joined by dots.
fn lex_base(stream: &mut TokenStream) -> Result<Vec<Step>, SyntaxError> {
    let token = stream.shift();
    match token.kind {
        TokenKind::Root => Ok(vec![Step::Root]),
        TokenKind::Current => Ok(vec![Step::Current]),
        TokenKind::Parent => {
            let mut steps = vec![Step::Parent];
            loop {
                let dot = stream.shift();
                if dot.kind == TokenKind::Dot {
                    let next = stream.shift();
                    if next.kind == TokenKind::Parent {
                        steps.push(Step::Parent);
                        continue;
                    }
                    stream.unshift();
                    stream.unshift();
                } else {
                    stream.unshift();
                }
                return Ok(steps);
            }
        }
        _ => Err(token.error()),
    }
}

/// After a consumed `.`: deep scan, wildcard, or plain field.
fn lex_dot(stream: &mut TokenStream) -> Result<Step, SyntaxError> {
    match stream.peek().kind {
        TokenKind::Dot => {
            stream.shift();
            Ok(Step::DeepScan(lex_identifier(stream)?))
        }
        TokenKind::Star => {
            stream.shift();
            Ok(Step::DotWildcard)
        }
        _ => Ok(Step::Dot(lex_identifier(stream)?)),
    }
}

/// Identifier: a run of raw characters, `$`, `:`, and interpolated string or
/// integer arguments. The first character may not be a digit, and an empty
/// identifier is an error.
fn lex_identifier(stream: &mut TokenStream) -> Result<String, SyntaxError> {
    let mut name = String::new();
    loop {
        let token = stream.shift();
        match token.kind {
            TokenKind::Raw | TokenKind::Root | TokenKind::Colon => {
                if let TokenValue::Char(ch) = token.value {
                    if token.kind == TokenKind::Raw && name.is_empty() && ch.is_ascii_digit() {
                        return Err(token.error());
                    }
                    name.push(ch);
                }
            }
            TokenKind::Literal => match &token.value {
                TokenValue::Literal(PathArg::Int(value)) => name.push_str(&value.to_string()),
                TokenValue::Literal(PathArg::Str(value)) => name.push_str(value),
                _ => return Err(token.error()),
            },
            _ => {
                stream.unshift();
                if name.is_empty() {
                    return Err(stream.peek().error());
                }
                return Ok(name);
            }
        }
    }
}

/// Integer from raw characters. At most one embedded dot is consumed, but a
/// fractional result still fails: indexes and slice bounds are whole numbers.
fn lex_number(stream: &mut TokenStream) -> Result<i64, SyntaxError> {
    let first = stream.peek().clone();
    let mut text = String::new();
    let mut seen_dot = false;
    loop {
        let token = stream.shift();
        match token.kind {
            TokenKind::Raw => {
                if let TokenValue::Char(ch) = token.value {
                    text.push(ch);
                }
            }
            TokenKind::Dot if !seen_dot => {
                seen_dot = true;
                text.push('.');
            }
            _ => {
                stream.unshift();
                break;
            }
        }
    }
    text.parse::<i64>().map_err(|_| first.error())
}

/// String content between two matching quote tokens. There are no escapes;
/// interpolated arguments contribute their display form.
fn lex_string(stream: &mut TokenStream, quote: TokenKind) -> Result<String, SyntaxError> {
    let mut text = String::new();
    loop {
        let token = stream.shift();
        if token.kind == quote {
            return Ok(text);
        }
        match &token.value {
            TokenValue::Char(ch) => text.push(*ch),
            TokenValue::Literal(arg) => text.push_str(&arg.to_string()),
            TokenValue::None => return Err(token.error()),
        }
    }
}

/// After a consumed `[`: wildcard, predicate, slice, or key list.
fn lex_bracket(stream: &mut TokenStream) -> Result<Step, SyntaxError> {
    stream.skip_whitespace();
    let token = stream.shift();
    match token.kind {
        TokenKind::Close => Ok(Step::Bracket(Vec::new())),
        TokenKind::Star => {
            let close = stream.shift();
            if close.kind == TokenKind::Close {
                Ok(Step::BracketWildcard)
            } else {
                Err(close.error())
            }
        }
        TokenKind::Literal => match &token.value {
            TokenValue::Literal(PathArg::Predicate(predicate)) => {
                let predicate = predicate.clone();
                let close = stream.shift();
                if close.kind == TokenKind::Close {
                    Ok(Step::Predicate(predicate))
                } else {
                    Err(close.error())
                }
            }
            TokenValue::Literal(PathArg::Str(name)) => {
                lex_indexes(stream, vec![Key::Name(name.clone())])
            }
            TokenValue::Literal(PathArg::Keys(keys)) => lex_indexes(stream, keys.clone()),
            TokenValue::Literal(PathArg::Int(value)) => lex_bracket_value(stream, *value),
            TokenValue::Char(_) | TokenValue::None => Err(token.error()),
        },
        TokenKind::Colon => lex_slice(stream, None),
        TokenKind::Raw => {
            stream.unshift();
            let value = lex_number(stream)?;
            lex_bracket_value(stream, value)
        }
        TokenKind::Quote | TokenKind::DblQuote => {
            let text = lex_string(stream, token.kind)?;
            lex_indexes(stream, vec![Key::Name(text)])
        }
        _ => Err(token.error()),
    }
}

/// An integer was read first: a following `:` turns it into a slice start,
/// anything else continues as an index list.
fn lex_bracket_value(stream: &mut TokenStream, value: i64) -> Result<Step, SyntaxError> {
    stream.skip_whitespace();
    let token = stream.shift();
    match token.kind {
        TokenKind::Colon => lex_slice(stream, Some(value)),
        TokenKind::Comma | TokenKind::Close => {
            stream.unshift();
            lex_indexes(stream, vec![Key::Index(value)])
        }
        _ => Err(token.error()),
    }
}

/// Comma-separated keys until the closing bracket. Interpolated key arrays
/// spread in place.
fn lex_indexes(stream: &mut TokenStream, mut keys: Vec<Key>) -> Result<Step, SyntaxError> {
    loop {
        stream.skip_whitespace();
        if stream.peek().kind == TokenKind::Close {
            stream.shift();
            return Ok(Step::Bracket(keys));
        }
        let comma = stream.shift();
        if comma.kind != TokenKind::Comma {
            return Err(comma.error());
        }
        stream.skip_whitespace();
        let token = stream.shift();
        match token.kind {
            TokenKind::Raw => {
                stream.unshift();
                keys.push(Key::Index(lex_number(stream)?));
            }
            TokenKind::Quote | TokenKind::DblQuote => {
                keys.push(Key::Name(lex_string(stream, token.kind)?));
            }
            TokenKind::Literal => match &token.value {
                TokenValue::Literal(PathArg::Int(value)) => keys.push(Key::Index(*value)),
                TokenValue::Literal(PathArg::Str(name)) => keys.push(Key::Name(name.clone())),
                TokenValue::Literal(PathArg::Keys(more)) => keys.extend(more.iter().cloned()),
                _ => return Err(token.error()),
            },
            _ => return Err(token.error()),
        }
    }
}

/// Slice bounds after the first `:`. Each slot takes at most one value and
/// whitespace is not allowed inside.
fn lex_slice(stream: &mut TokenStream, start: Option<i64>) -> Result<Step, SyntaxError> {
    let mut end = None;
    let mut step = None;
    let mut in_step = false;
    loop {
        let token = stream.shift();
        match token.kind {
            TokenKind::Close => return Ok(Step::Slice { start, end, step }),
            TokenKind::Colon if !in_step => in_step = true,
            TokenKind::Raw => {
                if (in_step && step.is_some()) || (!in_step && end.is_some()) {
                    return Err(token.error());
                }
                stream.unshift();
                let value = lex_number(stream)?;
                if in_step {
                    step = Some(value);
                } else {
                    end = Some(value);
                }
            }
            TokenKind::Literal => match &token.value {
                TokenValue::Literal(PathArg::Int(value)) => {
                    if (in_step && step.is_some()) || (!in_step && end.is_some()) {
                        return Err(token.error());
                    }
                    if in_step {
                        step = Some(*value);
                    } else {
                        end = Some(*value);
                    }
                }
                _ => return Err(token.error()),
            },
            _ => return Err(token.error()),
        }
    }
}
