//! The construction layer: pure mapping functions from a successful rule's
//! captured values to AST nodes.
//!
//! Stateless and span-preserving. Grammar rules invoke these only on
//! success, so a node is built exactly once, bottom-up, and never revisited.

use crate::ast::{FunctionCall, Literal, Program, Span, Spanned, Statement, Value};

pub fn nil(span: Span) -> Spanned<Literal> {
    Spanned::new(Literal::Nil, span)
}

pub fn boolean(flag: bool, span: Span) -> Spanned<Literal> {
    Spanned::new(Literal::Bool(flag), span)
}

pub fn number(value: i64, span: Span) -> Spanned<Literal> {
    Spanned::new(Literal::Number(value), span)
}

pub fn literal_value(literal: Spanned<Literal>) -> Spanned<Value> {
    Spanned::new(Value::Literal(literal.value), literal.span)
}

pub fn call_value(call: Spanned<FunctionCall>) -> Spanned<Value> {
    Spanned::new(Value::Call(call.value), call.span)
}

/// Builds a call node spanning from the name to the closing parenthesis.
pub fn function_call(
    name: String,
    name_span: Span,
    arguments: Vec<Spanned<Value>>,
    close_span: Span,
) -> Spanned<FunctionCall> {
    Spanned::new(
        FunctionCall { name, arguments },
        name_span.join(close_span),
    )
}

pub fn call_statement(call: Spanned<FunctionCall>) -> Spanned<Statement> {
    Spanned::new(Statement::Call(call.value), call.span)
}

/// Aggregates repeated statement constructions in source order.
pub fn program(statements: Vec<Spanned<Statement>>) -> Program {
    Program { statements }
}
