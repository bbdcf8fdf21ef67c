//! Abstract Syntax Tree for the lingo dialect.
//!
//! Every node is an owned value built once by the parser. The evaluator
//! consumes these types as-is.

use std::fmt;

use serde::Serialize;

/// A complete program: blocks in source order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Program {
    pub blocks: Vec<Block>,
}

/// A bracketed sequence of blocks executed as a unit.
pub type Body = Vec<Block>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Block {
    Control(ControlBlock),
    Statement(StatementBlock),
}

/// A keyword-driven control construct.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ControlBlock {
    Run(Body),
    If(Expr, Body),
    IfElse(Expr, Body, Body),
    Repeat(Expr, Body),
    DoWhile(Body, Expr),
    While(Expr, Body),
    DoUntil(Body, Expr),
    Until(Expr, Body),
    Output(Expr),
    Stop,
    Bye,
}

/// A procedure call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementBlock {
    pub procedure: String,
    pub items: Vec<Item>,
    /// `(name args...)` form with arbitrary arity, as opposed to the bare
    /// default-arity form.
    pub parenthesized: bool,
}

/// A procedure argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Item {
    Group(Expr),
    /// `[ ... ]`, immutable.
    List(Vec<Item>),
    /// `{ ... }`, mutable.
    Array(Vec<Item>),
    Word(String),
    Number(String),
    Variable(String),
}

/// An arithmetic expression. Parenthesized groups are folded into the
/// tree shape, so there is no separate group node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Negate(Box<Expr>),
    /// Literal text exactly as written.
    Number(String),
    Variable(String),
}

impl Expr {
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn number(text: impl Into<String>) -> Self {
        Expr::Number(text.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Pow => "^",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Renders the expression back to whitespace-separated source form.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Binary { op, lhs, rhs } => write!(f, "( {lhs} {op} {rhs} )"),
            Expr::Negate(inner) => write!(f, "- {inner}"),
            Expr::Number(text) => f.write_str(text),
            Expr::Variable(name) => write!(f, ":{name}"),
        }
    }
}
