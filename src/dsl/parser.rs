//! Recursive-descent parser for the lingo dialect.
//!
//! One function per grammar production:
//!
//! ```text
//! Program        = Block*
//! Block          = ControlBlock | StatementBlock
//! ControlBlock   = RUN Body | IF Expr Body | IFELSE Expr Body Body
//!                | REPEAT Expr Body | DOWHILE Body Expr | WHILE Expr Body
//!                | DOUNTIL Body Expr | UNTIL Expr Body | OUTPUT Expr
//!                | STOP | BYE
//! Body           = '[' Block* ']'
//! StatementBlock = PROCEDURE Item+ | '(' PROCEDURE Item* ')'
//! Item           = Group | List | Array | WORD | NUMBER | VARIABLE
//! List           = '[' Item* ']'
//! Array          = '{' Item* '}'
//! Group          = '(' Expr ')'
//! Expr           = Operand (Op Operand)*
//! Operand        = '-'? (Group | NUMBER | VARIABLE)
//! ```
//!
//! All binary operators share one precedence level and associate to the
//! left. `END_OF_LINE` tokens are skipped wherever a token is expected.

use std::collections::VecDeque;

use log::{debug, trace};

use super::ast::*;
use super::error::{Expected, SyntaxError};
use super::lexer::Lexer;
use super::token::{Token, TokenKind};

pub struct Parser {
    lexer: Lexer,
    lookahead: VecDeque<Token>,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        Self {
            lexer,
            lookahead: VecDeque::new(),
        }
    }

    pub fn parse(&mut self) -> Result<Program, SyntaxError> {
        let mut blocks = Vec::new();

        while !self.check(TokenKind::NoMore) {
            blocks.push(self.parse_block()?);
        }

        debug!("parsed {} top-level block(s)", blocks.len());
        Ok(Program { blocks })
    }

    fn parse_block(&mut self) -> Result<Block, SyntaxError> {
        let kind = self.peek().kind;
        if kind.is_keyword() {
            return self.parse_control().map(Block::Control);
        }
        match kind {
            TokenKind::Procedure | TokenKind::LeftParenthesis => {
                self.parse_statement().map(Block::Statement)
            }
            _ => Err(self.unexpected("block", Expected::Production("block"))),
        }
    }

    fn parse_control(&mut self) -> Result<ControlBlock, SyntaxError> {
        let keyword = self.advance();
        trace!("{}:{} {}", keyword.line, keyword.col, keyword.kind);

        let block = match keyword.kind {
            TokenKind::Run => ControlBlock::Run(self.parse_body()?),
            TokenKind::If => {
                let condition = self.parse_expr()?;
                ControlBlock::If(condition, self.parse_body()?)
            }
            TokenKind::IfElse => {
                let condition = self.parse_expr()?;
                let then_body = self.parse_body()?;
                ControlBlock::IfElse(condition, then_body, self.parse_body()?)
            }
            TokenKind::Repeat => {
                let count = self.parse_expr()?;
                ControlBlock::Repeat(count, self.parse_body()?)
            }
            TokenKind::DoWhile => {
                let body = self.parse_body()?;
                ControlBlock::DoWhile(body, self.parse_expr()?)
            }
            TokenKind::While => {
                let condition = self.parse_expr()?;
                ControlBlock::While(condition, self.parse_body()?)
            }
            TokenKind::DoUntil => {
                let body = self.parse_body()?;
                ControlBlock::DoUntil(body, self.parse_expr()?)
            }
            TokenKind::Until => {
                let condition = self.parse_expr()?;
                ControlBlock::Until(condition, self.parse_body()?)
            }
            TokenKind::Output => ControlBlock::Output(self.parse_expr()?),
            TokenKind::Stop => ControlBlock::Stop,
            TokenKind::Bye => ControlBlock::Bye,
            _ => {
                return Err(SyntaxError::new(
                    "control block",
                    Expected::Production("control keyword"),
                    &keyword,
                ));
            }
        };

        Ok(block)
    }

    fn parse_body(&mut self) -> Result<Body, SyntaxError> {
        self.expect(TokenKind::LeftBracket, "body")?;

        let mut blocks = Vec::new();
        while !self.check(TokenKind::RightBracket) {
            if self.check(TokenKind::NoMore) {
                return Err(self.unexpected("body", Expected::Token(TokenKind::RightBracket)));
            }
            blocks.push(self.parse_block()?);
        }
        self.advance();

        Ok(blocks)
    }

    fn parse_statement(&mut self) -> Result<StatementBlock, SyntaxError> {
        if self.check(TokenKind::LeftParenthesis) {
            self.advance();
            let procedure = self.expect_procedure()?;

            let mut items = Vec::new();
            while !self.check(TokenKind::RightParenthesis) {
                if self.check(TokenKind::NoMore) {
                    return Err(self.unexpected(
                        "statement",
                        Expected::Token(TokenKind::RightParenthesis),
                    ));
                }
                items.push(self.parse_item()?);
            }
            self.advance();

            return Ok(StatementBlock {
                procedure,
                items,
                parenthesized: true,
            });
        }

        let procedure = self.expect_procedure()?;
        let mut items = vec![self.parse_item()?];
        while self.starts_item() {
            items.push(self.parse_item()?);
        }

        Ok(StatementBlock {
            procedure,
            items,
            parenthesized: false,
        })
    }

    /// Whether the next token can begin an item. A `(` directly followed by
    /// a procedure name opens a statement, not a group.
    fn starts_item(&mut self) -> bool {
        let kind = self.peek().kind;
        match kind {
            TokenKind::LeftParenthesis => self.peek_nth(1).kind != TokenKind::Procedure,
            TokenKind::LeftBracket
            | TokenKind::LeftBrace
            | TokenKind::Word
            | TokenKind::Number
            | TokenKind::Variable => true,
            _ => false,
        }
    }

    fn parse_item(&mut self) -> Result<Item, SyntaxError> {
        let kind = self.peek().kind;
        let item = match kind {
            TokenKind::LeftParenthesis => Item::Group(self.parse_group()?),
            TokenKind::LeftBracket => Item::List(self.parse_sequence(
                TokenKind::LeftBracket,
                TokenKind::RightBracket,
                "list",
            )?),
            TokenKind::LeftBrace => Item::Array(self.parse_sequence(
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                "array",
            )?),
            TokenKind::Word => Item::Word(value_of(self.advance())),
            TokenKind::Number => Item::Number(value_of(self.advance())),
            TokenKind::Variable => Item::Variable(value_of(self.advance())),
            _ => return Err(self.unexpected("item", Expected::Production("item"))),
        };
        Ok(item)
    }

    /// Items between a pair of delimiters, shared by lists and arrays.
    fn parse_sequence(
        &mut self,
        open: TokenKind,
        close: TokenKind,
        production: &'static str,
    ) -> Result<Vec<Item>, SyntaxError> {
        self.expect(open, production)?;

        let mut items = Vec::new();
        while !self.check(close) {
            if self.check(TokenKind::NoMore) {
                return Err(self.unexpected(production, Expected::Token(close)));
            }
            items.push(self.parse_item()?);
        }
        self.advance();

        Ok(items)
    }

    fn parse_group(&mut self) -> Result<Expr, SyntaxError> {
        self.expect(TokenKind::LeftParenthesis, "group")?;
        let expr = self.parse_expr()?;
        self.expect(TokenKind::RightParenthesis, "group")?;
        Ok(expr)
    }

    fn parse_expr(&mut self) -> Result<Expr, SyntaxError> {
        let mut lhs = self.parse_operand()?;

        while let Some(op) = binary_op(self.peek().kind) {
            self.advance();
            let rhs = self.parse_operand()?;
            lhs = Expr::binary(op, lhs, rhs);
        }

        Ok(lhs)
    }

    fn parse_operand(&mut self) -> Result<Expr, SyntaxError> {
        if self.check(TokenKind::SignMinus) {
            self.advance();
            let inner = self.parse_primary()?;
            return Ok(Expr::Negate(Box::new(inner)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, SyntaxError> {
        let kind = self.peek().kind;
        match kind {
            TokenKind::LeftParenthesis => self.parse_group(),
            TokenKind::Number => Ok(Expr::Number(value_of(self.advance()))),
            TokenKind::Variable => Ok(Expr::Variable(value_of(self.advance()))),
            _ => Err(self.unexpected("operand", Expected::Production("operand"))),
        }
    }

    // --- Utility methods ---

    /// Look `n` significant tokens ahead, skipping line ends. Stops
    /// buffering at the first unmatched token since the lexer repeats it.
    fn peek_nth(&mut self, n: usize) -> &Token {
        while self.lookahead.len() <= n {
            if self.lookahead.back().is_some_and(|t| !t.matched) {
                break;
            }
            let token = self.lexer.next_token();
            if token.kind != TokenKind::EndOfLine {
                self.lookahead.push_back(token);
            }
        }
        let index = n.min(self.lookahead.len() - 1);
        &self.lookahead[index]
    }

    fn peek(&mut self) -> &Token {
        self.peek_nth(0)
    }

    fn advance(&mut self) -> Token {
        self.peek();
        match self.lookahead.pop_front() {
            Some(token) => token,
            None => self.lexer.next_token(),
        }
    }

    fn check(&mut self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn expect(&mut self, kind: TokenKind, production: &'static str) -> Result<Token, SyntaxError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(production, Expected::Token(kind)))
        }
    }

    fn expect_procedure(&mut self) -> Result<String, SyntaxError> {
        let token = self.expect(TokenKind::Procedure, "statement")?;
        Ok(value_of(token))
    }

    fn unexpected(&mut self, production: &'static str, expected: Expected) -> SyntaxError {
        let err = SyntaxError::new(production, expected, self.peek());
        debug!("{err}");
        err
    }
}

fn value_of(token: Token) -> String {
    token.value.unwrap_or(token.raw)
}

fn binary_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::SignPlus => Some(BinaryOp::Add),
        TokenKind::SignMinus => Some(BinaryOp::Sub),
        TokenKind::SignStar => Some(BinaryOp::Mul),
        TokenKind::SignSlash => Some(BinaryOp::Div),
        TokenKind::SignPercent => Some(BinaryOp::Rem),
        TokenKind::SignCaret => Some(BinaryOp::Pow),
        _ => None,
    }
}
