//! The Minuet syntax pipeline.
//!
//! Layered bottom-up: [`scanner`] holds the cursor and atomic lexeme
//! recognizers, [`combinators`] the generic rule-composition shapes,
//! [`grammar`] the per-construct rules, [`builder`] the pure mapping from
//! recognized input to AST nodes, and [`parser`] the depth-guarded driver
//! plus the public parse API.

pub mod builder;
pub mod combinators;
pub mod grammar;
pub mod parser;
pub mod scanner;

pub use parser::{
    parse_literal, parse_program, parse_program_in, parse_statement, parse_value, ParseOutcome,
    Parser, DEFAULT_MAX_DEPTH,
};
pub use scanner::{Cursor, Expectation, RuleError, RuleResult};
