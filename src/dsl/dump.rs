//! Diagnostic token dump — renders a token stream for inspection and
//! rebuilds source text from it.

use serde::Serialize;

use super::token::{Token, TokenKind};

/// One line per token: position, kind, raw text and value.
pub fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let mark = if token.matched { ' ' } else { '!' };
        out.push_str(&format!(
            "{mark}{:>4}:{:<4} {:<18}",
            token.line,
            token.col,
            token.kind.name()
        ));
        if !token.raw.is_empty() {
            out.push_str(&format!(" {:?}", token.raw));
        }
        if let Some(value) = &token.value {
            out.push_str(&format!(" = {value}"));
        }
        // keep lines free of trailing padding
        let trimmed = out.trim_end_matches(' ').len();
        out.truncate(trimmed);
        out.push('\n');
    }
    out
}

/// Raw texts joined with single spaces, with `END_OF_LINE` as a line break.
/// Tokenizing the result reproduces the same kinds, raw texts and values.
pub fn join_raw(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut line_start = true;
    for token in tokens {
        match token.kind {
            TokenKind::EndOfLine => {
                out.push('\n');
                line_start = true;
            }
            _ if token.raw.is_empty() => {}
            _ => {
                if !line_start {
                    out.push(' ');
                }
                out.push_str(&token.raw);
                line_start = false;
            }
        }
    }
    out
}

/// YAML through an intermediate JSON value, so nested enums come out as
/// plain maps rather than YAML tags.
pub fn to_yaml<T: Serialize>(value: &T) -> Result<String, serde_yaml::Error> {
    let value = serde_json::to_value(value)
        .map_err(<serde_yaml::Error as serde::ser::Error>::custom)?;
    serde_yaml::to_string(&value)
}
