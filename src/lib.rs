//! lingo — lexer and recursive-descent parser for a small Logo-family
//! scripting dialect.

pub mod config;
pub mod dsl;
pub mod logging;

pub use dsl::{parse, tokenize, FrontEnd, Program, SyntaxError, Token, TokenKind};
