//! The depth-guarded parse driver and the public parse API.
//!
//! A [`Parser`] owns the cursor over one immutable input buffer, the source
//! context used for diagnostics, and the nesting counter. Parsing is
//! single-threaded and synchronous; independent buffers can be parsed
//! concurrently with no shared state.
//!
//! Error policy: the driver aborts at the first failure that escapes the
//! grammar and does not resynchronize. The statements parsed before the
//! failure are still returned, so the outcome is always either a complete
//! program with zero diagnostics or a possibly-partial program with a
//! non-empty diagnostic list.

use crate::ast::{Literal, Program, Span, Spanned, Statement, Value};
use crate::errors::{to_source_span, ParseError, Position, SourceContext};
use crate::syntax::builder;
use crate::syntax::combinators::RuleFn;
use crate::syntax::grammar;
use crate::syntax::scanner::{Cursor, Expectation, RuleError};

/// Default bound on nesting-capable rule invocations. Chosen small: the
/// guard exists to cap stack usage on adversarial input, not to accommodate
/// deeply nested programs.
pub const DEFAULT_MAX_DEPTH: usize = 19;

/// Parser state for a single pass over one source buffer.
pub struct Parser<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) context: SourceContext,
    pub(crate) depth: usize,
    pub(crate) max_depth: usize,
}

/// What a whole-program parse hands back: the program (possibly partial) and
/// every diagnostic recorded before the driver stopped.
#[derive(Debug)]
pub struct ParseOutcome {
    pub program: Program,
    pub diagnostics: Vec<ParseError>,
}

impl ParseOutcome {
    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// The program, provided the parse was clean.
    pub fn into_result(self) -> Result<Program, Vec<ParseError>> {
        if self.diagnostics.is_empty() {
            Ok(self.program)
        } else {
            Err(self.diagnostics)
        }
    }
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, context: SourceContext) -> Self {
        Parser {
            cursor: Cursor::new(source),
            context,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    // -----------------------------------------------------------------------
    // Depth guard
    // -----------------------------------------------------------------------

    /// Enter a nesting-capable rule. Trips once the counter passes the
    /// configured maximum, independent of whether the input would otherwise
    /// be valid.
    pub(crate) fn descend(&mut self) -> Result<(), RuleError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            let at = self.cursor.pos();
            return Err(RuleError::Fatal(self.recursion_limit(at)));
        }
        Ok(())
    }

    pub(crate) fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    // -----------------------------------------------------------------------
    // Driver
    // -----------------------------------------------------------------------

    /// Parses the whole buffer as a whitespace-separated statement list.
    pub fn parse_program(&mut self) -> ParseOutcome {
        let mut statements = Vec::new();
        let mut diagnostics = Vec::new();

        match self.repeat_guarded(grammar::statement_start, grammar::statement, &mut statements) {
            Ok(()) => {
                self.cursor.skip_whitespace();
                if !self.cursor.at_end() {
                    let at = self.cursor.pos();
                    diagnostics.push(self.syntax_error(Expectation::one("a statement", at)));
                }
            }
            Err(RuleError::NoMatch(miss)) => diagnostics.push(self.syntax_error(miss)),
            Err(RuleError::Fatal(error)) => diagnostics.push(error),
        }

        ParseOutcome {
            program: builder::program(statements),
            diagnostics,
        }
    }

    /// Parses a single construct and requires it to span the whole buffer.
    fn single<T>(&mut self, rule: RuleFn<T>) -> Result<T, ParseError> {
        let value = match rule(self) {
            Ok(value) => value,
            Err(RuleError::NoMatch(miss)) => return Err(self.syntax_error(miss)),
            Err(RuleError::Fatal(error)) => return Err(error),
        };
        self.cursor.skip_whitespace();
        if !self.cursor.at_end() {
            let at = self.cursor.pos();
            return Err(self.syntax_error(Expectation::one("end of input", at)));
        }
        Ok(value)
    }

    pub fn parse_literal(&mut self) -> Result<Spanned<Literal>, ParseError> {
        self.single(grammar::literal)
    }

    pub fn parse_value(&mut self) -> Result<Spanned<Value>, ParseError> {
        self.single(grammar::value)
    }

    pub fn parse_statement(&mut self) -> Result<Spanned<Statement>, ParseError> {
        self.single(grammar::statement)
    }

    // -----------------------------------------------------------------------
    // Error builders
    // -----------------------------------------------------------------------

    fn position_of(&self, offset: usize) -> Position {
        Position::from_offset(self.cursor.source(), offset)
    }

    /// Span of the offending character at `offset`, zero-width at end of
    /// input.
    fn span_at(&self, offset: usize) -> Span {
        let width = self.cursor.source()[offset.min(self.cursor.source().len())..]
            .chars()
            .next()
            .map_or(0, char::len_utf8);
        Span::new(offset, offset + width)
    }

    pub(crate) fn syntax_error(&self, miss: Expectation) -> ParseError {
        ParseError::Syntax {
            expected: miss.expected.iter().map(|s| s.to_string()).collect(),
            position: self.position_of(miss.at),
            src: self.context.to_named_source(),
            span: to_source_span(self.span_at(miss.at)),
        }
    }

    pub(crate) fn numeric_overflow(&self, span: Span) -> ParseError {
        ParseError::NumericOverflow {
            position: self.position_of(span.start),
            src: self.context.to_named_source(),
            span: to_source_span(span),
        }
    }

    pub(crate) fn recursion_limit(&self, at: usize) -> ParseError {
        ParseError::RecursionLimitExceeded {
            limit: self.max_depth,
            position: self.position_of(at),
            src: self.context.to_named_source(),
            span: to_source_span(self.span_at(at)),
        }
    }

    pub(crate) fn unsupported_construct(&self, construct: &str, span: Span) -> ParseError {
        ParseError::UnsupportedConstruct {
            construct: construct.to_string(),
            position: self.position_of(span.start),
            src: self.context.to_named_source(),
            span: to_source_span(span),
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Parses source text as a program: zero or more whitespace-separated call
/// statements. Never panics; malformed input is reported in the outcome's
/// diagnostic list alongside the statements parsed before the error.
pub fn parse_program(source: &str) -> ParseOutcome {
    parse_program_in(source, SourceContext::anonymous(source))
}

/// Like [`parse_program`], with a caller-supplied source name for
/// diagnostics.
pub fn parse_program_in(source: &str, context: SourceContext) -> ParseOutcome {
    Parser::new(source, context).parse_program()
}

/// Parses source text as exactly one literal.
pub fn parse_literal(source: &str) -> Result<Literal, ParseError> {
    Parser::new(source, SourceContext::anonymous(source))
        .parse_literal()
        .map(|lit| lit.value)
}

/// Parses source text as exactly one value (a literal or a call).
pub fn parse_value(source: &str) -> Result<Value, ParseError> {
    Parser::new(source, SourceContext::anonymous(source))
        .parse_value()
        .map(|value| value.value)
}

/// Parses source text as exactly one call statement.
pub fn parse_statement(source: &str) -> Result<Statement, ParseError> {
    Parser::new(source, SourceContext::anonymous(source))
        .parse_statement()
        .map(|stmt| stmt.value)
}
