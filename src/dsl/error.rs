//! Error types for the lingo front end.

use std::fmt;

use thiserror::Error;

use super::token::{Token, TokenKind};

/// What the parser was looking for when it failed.
#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
    /// A specific token kind, e.g. the closing `]` of a body.
    Token(TokenKind),
    /// Any token able to start the named production.
    Production(&'static str),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "{kind}"),
            Expected::Production(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A component matched no token pattern.
    Lexical,
    Syntax,
}

/// A parse failure at the first token that does not fit the grammar.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("[{line}:{col}] {production}: expected {expected}, found {found}{}", quoted(.raw))]
pub struct SyntaxError {
    /// The production being parsed.
    pub production: &'static str,
    pub expected: Expected,
    pub found: TokenKind,
    pub raw: String,
    pub line: usize,
    pub col: usize,
}

fn quoted(raw: &str) -> String {
    if raw.is_empty() {
        String::new()
    } else {
        format!(" '{raw}'")
    }
}

impl SyntaxError {
    pub fn new(production: &'static str, expected: Expected, found: &Token) -> Self {
        Self {
            production,
            expected,
            found: found.kind,
            raw: found.raw.clone(),
            line: found.line,
            col: found.col,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        if self.found == TokenKind::NotFound {
            ErrorKind::Lexical
        } else {
            ErrorKind::Syntax
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: TokenKind, raw: &str) -> Token {
        Token {
            kind,
            raw: raw.to_string(),
            value: None,
            matched: kind != TokenKind::NotFound && kind != TokenKind::NoMore,
            line: 3,
            col: 7,
        }
    }

    #[test]
    fn display_names_production_and_raw_text() {
        let err = SyntaxError::new(
            "body",
            Expected::Token(TokenKind::RightBracket),
            &token(TokenKind::RightBrace, "}"),
        );
        assert_eq!(
            err.to_string(),
            "[3:7] body: expected RIGHT_BRACKET, found RIGHT_BRACE '}'"
        );
    }

    #[test]
    fn display_omits_empty_raw_text() {
        let err = SyntaxError::new(
            "group",
            Expected::Token(TokenKind::RightParenthesis),
            &token(TokenKind::NoMore, ""),
        );
        assert_eq!(
            err.to_string(),
            "[3:7] group: expected RIGHT_PARENTHESIS, found NO_MORE"
        );
    }

    #[test]
    fn not_found_is_lexical() {
        let err = SyntaxError::new(
            "item",
            Expected::Production("item"),
            &token(TokenKind::NotFound, "1.2.3"),
        );
        assert_eq!(err.kind(), ErrorKind::Lexical);

        let err = SyntaxError::new(
            "item",
            Expected::Production("item"),
            &token(TokenKind::Stop, "STOP"),
        );
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }
}
