//! Core AST types for Minuet programs, with source location tracking.
//!
//! All nodes are constructed once, bottom-up, during a single parse pass and
//! never mutated afterwards. Every node carries a [`Span`] into the source
//! buffer it was parsed from.

use serde::{Deserialize, Serialize};

/// A half-open byte range in the source code.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// The smallest span covering both `self` and `other`.
    pub fn join(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Wrapper carrying source span information with any node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(value: T, span: Span) -> Self {
        Spanned { value, span }
    }
}

/// A literal value. Exactly one variant is active at a time.
///
/// `String` is part of the data model but not yet reachable through the
/// grammar; a string expression in source is reported as an unsupported
/// construct rather than silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Literal {
    Nil,
    Bool(bool),
    Number(i64),
    String(String),
}

impl Literal {
    pub fn pretty(&self) -> String {
        match self {
            Literal::Nil => "nil".to_string(),
            Literal::Bool(true) => "true".to_string(),
            Literal::Bool(false) => "false".to_string(),
            Literal::Number(n) => n.to_string(),
            Literal::String(s) => format!("{:?}", s),
        }
    }
}

/// An expression usable as a function-call argument: a literal, or a nested
/// call whose result feeds the enclosing call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Literal(Literal),
    Call(FunctionCall),
}

impl Value {
    pub fn pretty(&self) -> String {
        match self {
            Value::Literal(lit) => lit.pretty(),
            Value::Call(call) => call.pretty(),
        }
    }
}

/// A call of the form `name(arg0, arg1, …)`. The argument order matches
/// source order; the sequence may be empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: Vec<Spanned<Value>>,
}

impl FunctionCall {
    pub fn pretty(&self) -> String {
        let args = self
            .arguments
            .iter()
            .map(|a| a.value.pretty())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", self.name, args)
    }
}

/// A single statement. Currently only call statements exist; the enum leaves
/// room for future statement kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Call(FunctionCall),
}

impl Statement {
    pub fn pretty(&self) -> String {
        match self {
            Statement::Call(call) => call.pretty(),
        }
    }
}

/// An ordered sequence of statements, in source order. The empty program is
/// valid: empty input parses to it with zero diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Program {
    pub statements: Vec<Spanned<Statement>>,
}

impl Program {
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn pretty(&self) -> String {
        self.statements
            .iter()
            .map(|s| s.value.pretty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
