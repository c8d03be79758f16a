//! Per-construct grammar rules for the Minuet surface syntax.
//!
//! ```text
//! program   := statement*                      (whitespace separated)
//! statement := call
//! call      := identifier '(' value (',' value)* ')'
//!            | identifier '(' ')'
//! value     := literal | call
//! literal   := 'nil' | boolean | digits
//! boolean   := 'true' | 'TRUE' | 'false' | 'FALSE'
//! ```
//!
//! String literals and the `...` variadic tail are recognized so they can be
//! reported as unsupported constructs, but they are transparent productions:
//! when they do not match they contribute nothing to the expected set.

use crate::ast::{FunctionCall, Literal, Span, Spanned, Statement, Value};
use crate::syntax::builder;
use crate::syntax::parser::Parser;
use crate::syntax::scanner::{Expectation, RuleError, RuleResult};

// ---------------------------------------------------------------------------
// Literals
// ---------------------------------------------------------------------------

pub fn literal(p: &mut Parser<'_>) -> RuleResult<Spanned<Literal>> {
    p.alternation(&[
        nil_literal,
        bool_literal,
        number_literal,
        string_literal,
        tail_literal,
    ])
}

fn nil_literal(p: &mut Parser<'_>) -> RuleResult<Spanned<Literal>> {
    p.keyword("nil", "`nil`").map(builder::nil)
}

fn bool_literal(p: &mut Parser<'_>) -> RuleResult<Spanned<Literal>> {
    p.alternation(&[bool_true, bool_false])
}

// Booleans are case-alternative, not case-insensitive: only the two exact
// spellings per value are accepted.

fn bool_true(p: &mut Parser<'_>) -> RuleResult<Spanned<Literal>> {
    p.alternation(&[kw_true, kw_true_upper])
        .map(|span| builder::boolean(true, span))
}

fn bool_false(p: &mut Parser<'_>) -> RuleResult<Spanned<Literal>> {
    p.alternation(&[kw_false, kw_false_upper])
        .map(|span| builder::boolean(false, span))
}

fn kw_true(p: &mut Parser<'_>) -> RuleResult<Span> {
    p.keyword("true", "`true`")
}

fn kw_true_upper(p: &mut Parser<'_>) -> RuleResult<Span> {
    p.keyword("TRUE", "`TRUE`")
}

fn kw_false(p: &mut Parser<'_>) -> RuleResult<Span> {
    p.keyword("false", "`false`")
}

fn kw_false_upper(p: &mut Parser<'_>) -> RuleResult<Span> {
    p.keyword("FALSE", "`FALSE`")
}

fn number_literal(p: &mut Parser<'_>) -> RuleResult<Spanned<Literal>> {
    p.number("a number")
        .map(|(value, span)| builder::number(value, span))
}

/// Recognized but not yet modeled: reported, never silently dropped.
fn string_literal(p: &mut Parser<'_>) -> RuleResult<Spanned<Literal>> {
    unsupported(p, "\"", "string literal")
}

/// Recognized but not yet modeled: reported, never silently dropped.
fn tail_literal(p: &mut Parser<'_>) -> RuleResult<Spanned<Literal>> {
    unsupported(p, "...", "variadic tail")
}

/// A transparent recognizer for a known-but-unsupported form: a match is a
/// fatal `UnsupportedConstruct`, a miss adds nothing to the expected set.
fn unsupported(
    p: &mut Parser<'_>,
    marker: &'static str,
    construct: &'static str,
) -> RuleResult<Spanned<Literal>> {
    match p.lexeme(marker, construct) {
        Ok(span) => Err(RuleError::Fatal(p.unsupported_construct(construct, span))),
        Err(RuleError::NoMatch(miss)) => Err(RuleError::NoMatch(Expectation {
            expected: Vec::new(),
            at: miss.at,
        })),
        Err(fatal) => Err(fatal),
    }
}

// ---------------------------------------------------------------------------
// Values, calls, statements
// ---------------------------------------------------------------------------

/// A function-call argument. This is the nesting-capable rule: the depth
/// guard brackets it so adversarial nesting cannot grow the stack unbounded.
pub fn value(p: &mut Parser<'_>) -> RuleResult<Spanned<Value>> {
    p.descend()?;
    let result = p.alternation(&[literal_value, call_value]);
    p.ascend();
    result
}

fn literal_value(p: &mut Parser<'_>) -> RuleResult<Spanned<Value>> {
    literal(p).map(builder::literal_value)
}

fn call_value(p: &mut Parser<'_>) -> RuleResult<Spanned<Value>> {
    function_call(p).map(builder::call_value)
}

/// `identifier(arg0, arg1, …)`; parentheses are required even when empty.
///
/// The sequence commits after the identifier: a missing `(` afterwards is an
/// error in terms of this rule, not an invitation to reinterpret the name.
pub fn function_call(p: &mut Parser<'_>) -> RuleResult<Spanned<FunctionCall>> {
    let (name, name_span) = p.identifier("an identifier")?;
    p.punct('(', "`(`")?;
    let arguments = p.separated_list(value, comma)?;
    let close = match p.punct(')', "`)`") {
        Ok(span) => span,
        Err(RuleError::NoMatch(mut miss)) => {
            // after an argument, a separator would also have been accepted
            if !arguments.is_empty() {
                miss.expected.insert(0, "`,`");
            }
            return Err(RuleError::NoMatch(miss));
        }
        Err(fatal) => return Err(fatal),
    };
    Ok(builder::function_call(name, name_span, arguments, close))
}

pub fn statement(p: &mut Parser<'_>) -> RuleResult<Spanned<Statement>> {
    function_call(p).map(builder::call_statement)
}

/// Probe for the statement driver: does a statement start here?
pub fn statement_start(p: &mut Parser<'_>) -> RuleResult<()> {
    p.identifier("a statement").map(|_| ())
}

fn comma(p: &mut Parser<'_>) -> RuleResult<Span> {
    p.punct(',', "`,`")
}
