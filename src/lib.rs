//! Minuet: a recursive-descent parser for a minimal call-scripting language.
//!
//! Source text goes in; a typed [`Program`] plus structured diagnostics come
//! out. The parser is purely syntactic: no evaluation, no scoping, no name
//! resolution. Reading source from files and presenting diagnostics belong to
//! the caller.
//!
//! The pipeline is layered bottom-up: scanner primitives recognize single
//! lexemes and backtrack cleanly on a miss, combinators compose them into
//! alternation / list / guarded-repetition shapes, per-construct grammar
//! rules map recognized input onto AST nodes, and a depth-guarded driver
//! assembles whitespace-separated statements into a [`Program`].

pub use crate::ast::{FunctionCall, Literal, Program, Span, Spanned, Statement, Value};
pub use crate::errors::{ParseError, Position, SourceContext};
pub use crate::syntax::parser::{
    parse_literal, parse_program, parse_program_in, parse_statement, parse_value, ParseOutcome,
    Parser, DEFAULT_MAX_DEPTH,
};

pub mod ast;
pub mod errors;
pub mod syntax;
