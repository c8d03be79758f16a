//! Minuet diagnostics: the unified `miette`-based error type for the parse
//! pipeline.
//!
//! Every failure the parser can surface is a [`ParseError`]. Each variant
//! carries the 1-based line/column [`Position`] of the failure, the named
//! source buffer it occurred in, and a labeled span, so callers can render a
//! full miette report or inspect the error structurally.

use std::fmt;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::ast::Span;

/// A 1-based line/column position in a source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Computes the position of a byte offset by walking the source.
    /// Columns count characters, not bytes.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let mut line = 1;
        let mut column = 1;
        for (index, ch) in source.char_indices() {
            if index >= offset {
                break;
            }
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Names the source buffer for error reporting.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Context for a buffer with no meaningful name (tests, snippets).
    pub fn anonymous(content: impl Into<String>) -> Self {
        Self::new("<input>", content)
    }

    pub fn to_named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.name.clone(), self.content.clone())
    }

    pub fn position_of(&self, offset: usize) -> Position {
        Position::from_offset(&self.content, offset)
    }
}

/// Convert an AST span to a miette source span.
pub fn to_source_span(span: Span) -> SourceSpan {
    (span.start, span.len()).into()
}

fn expected_one_of(expected: &[String]) -> String {
    match expected {
        [] => "nothing".to_string(),
        [one] => one.clone(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}

/// All parse failure modes. The parser never panics past its own boundary:
/// it returns these as values, either directly or in a diagnostic list.
#[derive(Debug, Error, Diagnostic)]
pub enum ParseError {
    /// No grammar rule matched where one was required. Recoverable while an
    /// alternation still has untried alternatives; fatal once it escapes the
    /// outermost rule.
    #[error("syntax error at {position}: expected {}", expected_one_of(.expected))]
    #[diagnostic(code(minuet::parse::syntax_error))]
    Syntax {
        expected: Vec<String>,
        position: Position,
        #[source_code]
        src: NamedSource<String>,
        #[label("expected something else here")]
        span: SourceSpan,
    },

    /// A digit run does not fit the target integer width.
    #[error("numeric literal at {position} overflows a signed 64-bit integer")]
    #[diagnostic(
        code(minuet::parse::numeric_overflow),
        help("number literals must fit in the range of an i64")
    )]
    NumericOverflow {
        position: Position,
        #[source_code]
        src: NamedSource<String>,
        #[label("this number is too large")]
        span: SourceSpan,
    },

    /// The nesting guard tripped. Bounds stack usage against adversarial
    /// input regardless of whether the input is otherwise valid.
    #[error("nesting at {position} exceeds the maximum depth of {limit}")]
    #[diagnostic(
        code(minuet::parse::recursion_limit),
        help("flatten the expression or raise the parser's depth limit")
    )]
    RecursionLimitExceeded {
        limit: usize,
        position: Position,
        #[source_code]
        src: NamedSource<String>,
        #[label("nesting becomes too deep here")]
        span: SourceSpan,
    },

    /// A recognized-but-not-yet-modeled syntactic form, reported rather than
    /// silently dropped.
    #[error("unsupported construct at {position}: {construct} is not part of the language yet")]
    #[diagnostic(code(minuet::parse::unsupported_construct))]
    UnsupportedConstruct {
        construct: String,
        position: Position,
        #[source_code]
        src: NamedSource<String>,
        #[label("recognized but unsupported")]
        span: SourceSpan,
    },
}

impl ParseError {
    /// The line/column position the failure was recorded at.
    pub fn position(&self) -> Position {
        match self {
            ParseError::Syntax { position, .. }
            | ParseError::NumericOverflow { position, .. }
            | ParseError::RecursionLimitExceeded { position, .. }
            | ParseError::UnsupportedConstruct { position, .. } => *position,
        }
    }

    /// Stable short name for test assertions and logs.
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            ParseError::Syntax { .. } => "syntax_error",
            ParseError::NumericOverflow { .. } => "numeric_overflow",
            ParseError::RecursionLimitExceeded { .. } => "recursion_limit",
            ParseError::UnsupportedConstruct { .. } => "unsupported_construct",
        }
    }
}
