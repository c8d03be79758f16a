//! Tests for diagnostic structure: positions, expected sets, messages, and
//! miette codes. These pin down the error-reporting contract rather than the
//! shape of the AST.

use miette::Diagnostic;
use minuet::{parse_literal, parse_program, parse_program_in, ParseError, Position, SourceContext};

#[test]
fn test_unclosed_call_points_at_the_missing_paren() {
    let outcome = parse_program("f(");
    assert_eq!(outcome.error_count(), 1);
    match &outcome.diagnostics[0] {
        ParseError::Syntax {
            expected, position, ..
        } => {
            assert!(expected.contains(&"`)`".to_string()));
            assert_eq!(*position, Position { line: 1, column: 3 });
        }
        other => panic!("expected a syntax error, got {:?}", other),
    }
}

#[test]
fn test_positions_are_line_and_column_aware() {
    let outcome = parse_program("f()\ng(");
    assert_eq!(outcome.error_count(), 1);
    assert_eq!(
        outcome.diagnostics[0].position(),
        Position { line: 2, column: 3 }
    );
}

#[test]
fn test_expected_set_unions_all_alternatives() {
    let err = parse_literal("@").unwrap_err();
    match err {
        ParseError::Syntax { expected, .. } => {
            assert_eq!(
                expected,
                vec!["`nil`", "`true`", "`TRUE`", "`false`", "`FALSE`", "a number"]
            );
        }
        other => panic!("expected a syntax error, got {:?}", other),
    }
}

#[test]
fn test_syntax_error_message_reads_naturally() {
    let err = parse_literal("@").unwrap_err();
    assert_eq!(
        err.to_string(),
        "syntax error at line 1, column 1: expected `nil`, `true`, `TRUE`, `false`, `FALSE` or a number"
    );
}

#[test]
fn test_after_an_argument_a_comma_is_also_expected() {
    let outcome = parse_program("f(1");
    match &outcome.diagnostics[0] {
        ParseError::Syntax { expected, .. } => {
            assert_eq!(expected, &vec!["`,`".to_string(), "`)`".to_string()]);
        }
        other => panic!("expected a syntax error, got {:?}", other),
    }
}

#[test]
fn test_overflow_message_names_the_width() {
    let err = parse_literal("99999999999999999999").unwrap_err();
    assert_eq!(
        err.to_string(),
        "numeric literal at line 1, column 1 overflows a signed 64-bit integer"
    );
}

#[test]
fn test_diagnostic_codes_are_stable() {
    let syntax = parse_literal("@").unwrap_err();
    assert_eq!(
        syntax.code().unwrap().to_string(),
        "minuet::parse::syntax_error"
    );
    assert_eq!(syntax.code_suffix(), "syntax_error");

    let overflow = parse_literal("99999999999999999999").unwrap_err();
    assert_eq!(
        overflow.code().unwrap().to_string(),
        "minuet::parse::numeric_overflow"
    );
    assert_eq!(overflow.code_suffix(), "numeric_overflow");
}

#[test]
fn test_recursion_limit_message_names_the_limit() {
    let source = format!("{}1{}", "f(".repeat(25), ")".repeat(25));
    let outcome = parse_program(&source);
    assert_eq!(outcome.error_count(), 1);
    let err = &outcome.diagnostics[0];
    assert!(matches!(err, ParseError::RecursionLimitExceeded { limit: 19, .. }));
    assert!(err.to_string().contains("maximum depth of 19"));
}

#[test]
fn test_named_source_context_flows_into_reports() {
    let context = SourceContext::new("scripts/boot.mn", "f(");
    let outcome = parse_program_in("f(", context);
    assert_eq!(outcome.error_count(), 1);
    // rendering with the fancy handler should mention the buffer name
    let err = outcome.diagnostics.into_iter().next().unwrap();
    let rendered = format!("{:?}", miette::Report::new(err));
    assert!(rendered.contains("scripts/boot.mn"));
}

#[test]
fn test_unsupported_construct_position() {
    let outcome = parse_program(r#"log("x")"#);
    assert_eq!(outcome.error_count(), 1);
    match &outcome.diagnostics[0] {
        ParseError::UnsupportedConstruct {
            construct,
            position,
            ..
        } => {
            assert_eq!(construct, "string literal");
            assert_eq!(*position, Position { line: 1, column: 5 });
        }
        other => panic!("expected an unsupported construct, got {:?}", other),
    }
}
