//! Lexer for the lingo dialect.
//!
//! Scans the source one line at a time. Each line is split into
//! whitespace-delimited components and every component is classified
//! against an ordered pattern table.

use std::sync::LazyLock;

use log::{debug, trace};
use regex::Regex;

use super::token::{keyword, Token, TokenKind};

/// How a pattern match produces the token value.
#[derive(Debug, Clone, Copy)]
enum Value {
    None,
    /// The first capture group.
    Capture,
}

struct Pattern {
    kind: TokenKind,
    value: Value,
    regex: Regex,
}

/// Pattern table in match-priority order. The first entry is the generic
/// identifier shape; its matches go through keyword remapping and default
/// to `PROCEDURE`.
const PATTERN_TABLE: &[(TokenKind, Value, &str)] = &[
    (TokenKind::Procedure, Value::Capture, r"^([_A-Za-z][_A-Za-z0-9]*\??)$"),
    (TokenKind::Variable, Value::Capture, r"^:([_A-Za-z][_A-Za-z0-9]*)$"),
    (TokenKind::Word, Value::Capture, r#"^["']([_A-Za-z][_A-Za-z0-9]*)$"#),
    (
        TokenKind::Number,
        Value::Capture,
        r"^([-+]?(?:[0-9]*\.[0-9]+|[0-9]+)(?:[eE][-+]?[0-9]+)?)$",
    ),
    (TokenKind::LeftBracket, Value::None, r"^\[$"),
    (TokenKind::RightBracket, Value::None, r"^\]$"),
    (TokenKind::LeftBrace, Value::None, r"^\{$"),
    (TokenKind::RightBrace, Value::None, r"^\}$"),
    (TokenKind::LeftParenthesis, Value::None, r"^\($"),
    (TokenKind::RightParenthesis, Value::None, r"^\)$"),
    (TokenKind::SignPlus, Value::None, r"^\+$"),
    (TokenKind::SignMinus, Value::None, r"^-$"),
    (TokenKind::SignStar, Value::None, r"^\*$"),
    (TokenKind::SignSlash, Value::None, r"^/$"),
    (TokenKind::SignPercent, Value::None, r"^%$"),
    (TokenKind::SignCaret, Value::None, r"^\^$"),
];

static PATTERNS: LazyLock<Vec<Pattern>> = LazyLock::new(|| {
    PATTERN_TABLE
        .iter()
        .filter_map(|&(kind, value, source)| match Regex::new(source) {
            Ok(regex) => Some(Pattern { kind, value, regex }),
            Err(err) => {
                log::error!("invalid {kind} pattern {source:?}: {err}");
                None
            }
        })
        .collect()
});

/// Classify a single component. Returns `None` when nothing matches.
fn classify(text: &str) -> Option<(TokenKind, Option<String>)> {
    PATTERNS.iter().find_map(|pattern| {
        let caps = pattern.regex.captures(text)?;
        if pattern.kind == TokenKind::Procedure {
            if let Some(kind) = keyword(text) {
                return Some((kind, None));
            }
        }
        let value = match pattern.value {
            Value::None => None,
            Value::Capture => caps.get(1).map(|m| m.as_str().to_string()),
        };
        Some((pattern.kind, value))
    })
}

/// A whitespace-delimited piece of a line.
#[derive(Debug, Clone)]
struct Component {
    col: usize,
    text: String,
}

fn split_components(line: &str) -> Vec<Component> {
    let mut components = Vec::new();
    let mut start: Option<(usize, usize)> = None;

    for (col, (offset, ch)) in line.char_indices().enumerate() {
        if ch.is_whitespace() {
            if let Some((from, from_col)) = start.take() {
                components.push(Component {
                    col: from_col + 1,
                    text: line[from..offset].to_string(),
                });
            }
        } else if start.is_none() {
            start = Some((offset, col));
        }
    }

    if let Some((from, from_col)) = start {
        components.push(Component {
            col: from_col + 1,
            text: line[from..].to_string(),
        });
    }

    components
}

pub struct Lexer {
    lines: Vec<String>,
    line: usize,
    components: Vec<Component>,
    index: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        let mut lines: Vec<String> = source.trim().lines().map(str::to_string).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        let components = split_components(&lines[0]);
        Self {
            lines,
            line: 0,
            components,
            index: 0,
        }
    }

    /// Produce the next token.
    ///
    /// Never fails: exhaustion is reported as an unmatched `NO_MORE` and
    /// unrecognized text as an unmatched `NOT_FOUND`. Neither advances the
    /// cursor, so calling again returns the same token.
    pub fn next_token(&mut self) -> Token {
        if self.index == self.components.len() {
            let line = self.line + 1;
            let col = self.line_end_col();

            if line == self.lines.len() {
                return Token::marker(TokenKind::NoMore, false, line, col);
            }

            self.line += 1;
            self.components = split_components(&self.lines[self.line]);
            self.index = 0;
            debug!(
                "line {}: {} component(s)",
                self.line + 1,
                self.components.len()
            );
            return Token::marker(TokenKind::EndOfLine, true, line, col);
        }

        let component = &self.components[self.index];
        let line = self.line + 1;

        match classify(&component.text) {
            Some((kind, value)) => {
                self.index += 1;
                trace!("{line}:{} {kind} {:?}", component.col, component.text);
                Token {
                    kind,
                    raw: component.text.clone(),
                    value,
                    matched: true,
                    line,
                    col: component.col,
                }
            }
            None => {
                debug!("{line}:{} no pattern matches {:?}", component.col, component.text);
                Token {
                    kind: TokenKind::NotFound,
                    raw: component.text.clone(),
                    value: None,
                    matched: false,
                    line,
                    col: component.col,
                }
            }
        }
    }

    /// Collect tokens up to and including the first unmatched one.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = !token.matched;
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    }

    /// 1-based line and column of the next component.
    pub fn position(&self) -> (usize, usize) {
        let col = match self.components.get(self.index) {
            Some(component) => component.col,
            None => self.line_end_col(),
        };
        (self.line + 1, col)
    }

    fn line_end_col(&self) -> usize {
        self.lines[self.line].chars().count() + 1
    }
}

impl Iterator for Lexer {
    type Item = Token;

    /// Yields matched tokens, stopping at the first unmatched one.
    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        token.matched.then_some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(src: &str) -> Token {
        Lexer::new(src).next_token()
    }

    #[test]
    fn lex_punctuation_without_value() {
        let cases = [
            ("[", TokenKind::LeftBracket),
            ("]", TokenKind::RightBracket),
            ("{", TokenKind::LeftBrace),
            ("}", TokenKind::RightBrace),
            ("(", TokenKind::LeftParenthesis),
            (")", TokenKind::RightParenthesis),
            ("+", TokenKind::SignPlus),
            ("-", TokenKind::SignMinus),
            ("*", TokenKind::SignStar),
            ("/", TokenKind::SignSlash),
            ("%", TokenKind::SignPercent),
            ("^", TokenKind::SignCaret),
        ];
        for (src, kind) in cases {
            let mut lexer = Lexer::new(src);
            let tokens = lexer.tokenize();
            assert_eq!(tokens.len(), 2, "{src}");
            assert_eq!(tokens[0].kind, kind);
            assert!(tokens[0].matched);
            assert_eq!(tokens[0].raw, src);
            assert_eq!(tokens[0].value, None);
            assert_eq!(tokens[1].kind, TokenKind::NoMore);
        }
    }

    #[test]
    fn lex_numbers_keep_literal_text() {
        for src in ["123", "-4.5", "3.0e10", "+7", ".5", "2E-3"] {
            let token = single(src);
            assert_eq!(token.kind, TokenKind::Number, "{src}");
            assert_eq!(token.value.as_deref(), Some(src));
        }
        let value: f64 = single("-4.5").value.unwrap().parse().unwrap();
        assert_eq!(value, -4.5);
    }

    #[test]
    fn lex_variable_and_word() {
        let var = single(":foo");
        assert_eq!(var.kind, TokenKind::Variable);
        assert_eq!(var.value.as_deref(), Some("foo"));
        assert_eq!(var.raw, ":foo");

        let word = single("\"bar");
        assert_eq!(word.kind, TokenKind::Word);
        assert_eq!(word.value.as_deref(), Some("bar"));

        let quoted = single("'baz_2");
        assert_eq!(quoted.kind, TokenKind::Word);
        assert_eq!(quoted.value.as_deref(), Some("baz_2"));
    }

    #[test]
    fn lex_keywords_and_procedures() {
        let token = single("IF");
        assert_eq!(token.kind, TokenKind::If);
        assert_eq!(token.value, None);

        let token = single("myproc");
        assert_eq!(token.kind, TokenKind::Procedure);
        assert_eq!(token.value.as_deref(), Some("myproc"));

        let token = single("empty?");
        assert_eq!(token.kind, TokenKind::Procedure);
        assert_eq!(token.value.as_deref(), Some("empty?"));

        // remapping is exact and case-sensitive
        assert_eq!(single("if").kind, TokenKind::Procedure);
        assert_eq!(single("STOP?").kind, TokenKind::Procedure);
    }

    #[test]
    fn lex_every_keyword() {
        let mut lexer = Lexer::new("RUN IF IFELSE REPEAT DOWHILE WHILE DOUNTIL UNTIL OUTPUT STOP BYE");
        let kinds: Vec<TokenKind> = lexer.by_ref().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Run,
                TokenKind::If,
                TokenKind::IfElse,
                TokenKind::Repeat,
                TokenKind::DoWhile,
                TokenKind::While,
                TokenKind::DoUntil,
                TokenKind::Until,
                TokenKind::Output,
                TokenKind::Stop,
                TokenKind::Bye,
            ]
        );
    }

    #[test]
    fn lex_not_found_does_not_advance() {
        let mut lexer = Lexer::new("1.2.3 ok");
        let first = lexer.next_token();
        assert!(!first.matched);
        assert_eq!(first.kind, TokenKind::NotFound);
        assert_eq!(first.raw, "1.2.3");

        let again = lexer.next_token();
        assert_eq!(first, again);
        assert_eq!(lexer.position(), (1, 1));
    }

    #[test]
    fn lex_rejects_malformed_components() {
        for src in ["(1", ":", "\"", "9abc", "a-b", "::x", "1e"] {
            assert_eq!(single(src).kind, TokenKind::NotFound, "{src}");
        }
    }

    #[test]
    fn lex_end_of_line_between_lines() {
        let mut lexer = Lexer::new("fd 10\nrt 90");
        let tokens = lexer.tokenize();
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Procedure,
                TokenKind::Number,
                TokenKind::EndOfLine,
                TokenKind::Procedure,
                TokenKind::Number,
                TokenKind::NoMore,
            ]
        );
        assert!(tokens[2].matched);
        assert!(tokens[2].raw.is_empty());
        assert!(!tokens[5].matched);
    }

    #[test]
    fn lex_no_more_is_repeatable() {
        let mut lexer = Lexer::new("BYE");
        assert_eq!(lexer.next_token().kind, TokenKind::Bye);
        assert_eq!(lexer.next_token().kind, TokenKind::NoMore);
        assert_eq!(lexer.next_token().kind, TokenKind::NoMore);
    }

    #[test]
    fn lex_empty_input() {
        let mut lexer = Lexer::new("   \n  ");
        let tokens = lexer.tokenize();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::NoMore);
    }

    #[test]
    fn lex_line_and_column_tracking() {
        let mut lexer = Lexer::new("fd   10\r\n  rt\t90");
        let tokens = lexer.tokenize();
        assert_eq!((tokens[0].line, tokens[0].col), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].col), (1, 6));
        assert_eq!((tokens[2].line, tokens[2].col), (1, 8)); // end of line
        assert_eq!((tokens[3].line, tokens[3].col), (2, 3));
        assert_eq!((tokens[4].line, tokens[4].col), (2, 6));
    }

    #[test]
    fn lex_blank_line_yields_consecutive_markers() {
        let mut lexer = Lexer::new("a\n\nb");
        let kinds: Vec<TokenKind> = lexer.tokenize().iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Procedure,
                TokenKind::EndOfLine,
                TokenKind::EndOfLine,
                TokenKind::Procedure,
                TokenKind::NoMore,
            ]
        );
    }

    #[test]
    fn pattern_table_compiles_in_order() {
        assert_eq!(PATTERNS.len(), PATTERN_TABLE.len());
        for (pattern, &(kind, _, _)) in PATTERNS.iter().zip(PATTERN_TABLE) {
            assert_eq!(pattern.kind, kind);
        }
    }

    #[test]
    fn split_skips_whitespace_runs() {
        let parts = split_components("  a \t bb  ");
        assert_eq!(parts.len(), 2);
        assert_eq!((parts[0].col, parts[0].text.as_str()), (3, "a"));
        assert_eq!((parts[1].col, parts[1].text.as_str()), (7, "bb"));
    }
}
