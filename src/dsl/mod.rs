//! Front end — source text → token stream → AST.

pub mod ast;
pub mod dump;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::*;
pub use error::{ErrorKind, Expected, SyntaxError};
pub use token::{Token, TokenKind};

use lexer::Lexer;
use parser::Parser;

/// The lingo front end.
///
/// Owns no state between calls; every call builds a fresh lexer.
pub struct FrontEnd;

impl FrontEnd {
    /// Tokenize source text, stopping after the first unmatched token
    /// (`NO_MORE` at the end of a clean scan, `NOT_FOUND` otherwise).
    pub fn tokenize(source: &str) -> Vec<Token> {
        Lexer::new(source).tokenize()
    }

    /// Parse source text into a Program AST.
    pub fn parse(source: &str) -> Result<Program, SyntaxError> {
        Parser::new(Lexer::new(source)).parse()
    }
}

pub fn tokenize(source: &str) -> Vec<Token> {
    FrontEnd::tokenize(source)
}

pub fn parse(source: &str) -> Result<Program, SyntaxError> {
    FrontEnd::parse(source)
}
