//! Character classification of path templates.

use crate::path::parser::tokens::{Token, TokenKind, TokenValue};
use crate::path::parser::Piece;

/// Splits the template pieces into a flat token list. Each character and
/// each interpolated argument occupies one position, and a trailing end
/// token marks exhaustion.
pub(crate) fn tokenize(pieces: Vec<Piece>) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut position = 0;
    for piece in pieces {
        match piece {
            Piece::Text(text) => {
                for ch in text.chars() {
                    tokens.push(Token {
                        kind: classify(ch),
                        value: TokenValue::Char(ch),
                        position,
                    });
                    position += 1;
                }
            }
            Piece::Arg(arg) => {
                tokens.push(Token {
                    kind: TokenKind::Literal,
                    value: TokenValue::Literal(arg),
                    position,
                });
                position += 1;
            }
        }
    }
    tokens.push(Token {
        kind: TokenKind::End,
        value: TokenValue::None,
        position,
    });
    tokens
}

fn classify(ch: char) -> TokenKind {
    match ch {
        '$' => TokenKind::Root,
        '@' => TokenKind::Current,
        '^' => TokenKind::Parent,
        '*' => TokenKind::Star,
        '.' => TokenKind::Dot,
        ':' => TokenKind::Colon,
        ',' => TokenKind::Comma,
        '[' => TokenKind::Open,
        ']' => TokenKind::Close,
        '\'' => TokenKind::Quote,
        '"' => TokenKind::DblQuote,
        ' ' | '\t' | '\n' | '\r' => TokenKind::Whitespace,
        _ => TokenKind::Raw,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::path::parser::tokens::PathArg;

    fn kinds(pieces: Vec<Piece>) -> Vec<TokenKind> {
        tokenize(pieces).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_classifies_special_characters() {
        assert_eq!(
            kinds(vec![Piece::Text("$.a[*]".to_owned())]),
            vec![
                TokenKind::Root,
                TokenKind::Dot,
                TokenKind::Raw,
                TokenKind::Open,
                TokenKind::Star,
                TokenKind::Close,
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn test_interpolations_are_single_literal_tokens() {
        let tokens = tokenize(vec![
            Piece::Text("$[".to_owned()),
            Piece::Arg(PathArg::Int(3)),
            Piece::Text("]".to_owned()),
        ]);
        let literal = &tokens[2];
        assert_eq!(literal.kind, TokenKind::Literal);
        assert_eq!(literal.position, 2);
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::End));
    }

    #[test]
    fn test_positions_count_every_character() {
        let tokens = tokenize(vec![Piece::Text("$.ab".to_owned())]);
        let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 1, 2, 3, 4]);
    }
}
