//! Token types for the lingo lexer.

use std::fmt;

use serde::Serialize;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source component, empty for synthetic markers.
    pub raw: String,
    pub value: Option<String>,
    /// False on lexical failure or when the input is exhausted.
    pub matched: bool,
    pub line: usize,
    pub col: usize,
}

impl Token {
    pub(crate) fn marker(kind: TokenKind, matched: bool, line: usize, col: usize) -> Self {
        Self {
            kind,
            raw: String::new(),
            value: None,
            matched,
            line,
            col,
        }
    }
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    // Markers
    NoMore,
    NotFound,
    EndOfLine,

    // Named
    Procedure,
    Variable,
    Word,
    Number,

    // Delimiters
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    LeftParenthesis,
    RightParenthesis,

    // Signs
    SignPlus,
    SignMinus,
    SignStar,
    SignSlash,
    SignPercent,
    SignCaret,

    // Keywords
    Run,
    If,
    IfElse,
    Repeat,
    DoWhile,
    While,
    DoUntil,
    Until,
    Output,
    Stop,
    Bye,
}

/// Keyword spellings, matched exactly and case-sensitively.
pub const KEYWORDS: &[(&str, TokenKind)] = &[
    ("RUN", TokenKind::Run),
    ("IF", TokenKind::If),
    ("IFELSE", TokenKind::IfElse),
    ("REPEAT", TokenKind::Repeat),
    ("DOWHILE", TokenKind::DoWhile),
    ("WHILE", TokenKind::While),
    ("DOUNTIL", TokenKind::DoUntil),
    ("UNTIL", TokenKind::Until),
    ("OUTPUT", TokenKind::Output),
    ("STOP", TokenKind::Stop),
    ("BYE", TokenKind::Bye),
];

/// Look up a control keyword by its exact spelling.
pub fn keyword(text: &str) -> Option<TokenKind> {
    KEYWORDS
        .iter()
        .find(|(spelling, _)| *spelling == text)
        .map(|&(_, kind)| kind)
}

impl TokenKind {
    /// Upper snake case name, as shown in dumps and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::NoMore => "NO_MORE",
            TokenKind::NotFound => "NOT_FOUND",
            TokenKind::EndOfLine => "END_OF_LINE",
            TokenKind::Procedure => "PROCEDURE",
            TokenKind::Variable => "VARIABLE",
            TokenKind::Word => "WORD",
            TokenKind::Number => "NUMBER",
            TokenKind::LeftBracket => "LEFT_BRACKET",
            TokenKind::RightBracket => "RIGHT_BRACKET",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::LeftParenthesis => "LEFT_PARENTHESIS",
            TokenKind::RightParenthesis => "RIGHT_PARENTHESIS",
            TokenKind::SignPlus => "SIGN_PLUS",
            TokenKind::SignMinus => "SIGN_MINUS",
            TokenKind::SignStar => "SIGN_STAR",
            TokenKind::SignSlash => "SIGN_SLASH",
            TokenKind::SignPercent => "SIGN_PERCENT",
            TokenKind::SignCaret => "SIGN_CARET",
            TokenKind::Run => "RUN",
            TokenKind::If => "IF",
            TokenKind::IfElse => "IFELSE",
            TokenKind::Repeat => "REPEAT",
            TokenKind::DoWhile => "DOWHILE",
            TokenKind::While => "WHILE",
            TokenKind::DoUntil => "DOUNTIL",
            TokenKind::Until => "UNTIL",
            TokenKind::Output => "OUTPUT",
            TokenKind::Stop => "STOP",
            TokenKind::Bye => "BYE",
        }
    }

    /// Whether a matched token of this kind carries a value.
    pub fn has_value(self) -> bool {
        matches!(
            self,
            TokenKind::Procedure | TokenKind::Variable | TokenKind::Word | TokenKind::Number
        )
    }

    pub fn is_keyword(self) -> bool {
        KEYWORDS.iter().any(|&(_, kind)| kind == self)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup_is_case_sensitive() {
        assert_eq!(keyword("IFELSE"), Some(TokenKind::IfElse));
        assert_eq!(keyword("ifelse"), None);
        assert_eq!(keyword("REPEATS"), None);
    }

    #[test]
    fn every_keyword_is_flagged() {
        for &(spelling, kind) in KEYWORDS {
            assert!(kind.is_keyword());
            assert_eq!(kind.name(), spelling);
            assert!(!kind.has_value());
        }
    }

    #[test]
    fn named_kinds_carry_values() {
        assert!(TokenKind::Procedure.has_value());
        assert!(TokenKind::Number.has_value());
        assert!(!TokenKind::LeftBracket.has_value());
        assert!(!TokenKind::EndOfLine.has_value());
    }

    #[test]
    fn display_uses_snake_case_name() {
        assert_eq!(TokenKind::RightBracket.to_string(), "RIGHT_BRACKET");
        assert_eq!(TokenKind::NoMore.to_string(), "NO_MORE");
    }
}
