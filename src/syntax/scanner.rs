//! Scanner primitives: atomic lexeme recognizers over a byte-offset cursor.
//!
//! Every primitive either consumes its matched span and returns a value, or
//! consumes nothing and reports a [`RuleError::NoMatch`], so callers can try
//! an alternative from the same position with no rollback bookkeeping.
//! Leading whitespace is skipped before each attempt and restored on a miss.

use crate::ast::Span;
use crate::errors::ParseError;
use crate::syntax::parser::Parser;

/// What a failed rule was looking for, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    /// Human-readable token descriptions, deduplicated, in trial order.
    pub expected: Vec<&'static str>,
    /// Byte offset of the failure (after any skipped whitespace).
    pub at: usize,
}

impl Expectation {
    pub fn one(token: &'static str, at: usize) -> Self {
        Expectation {
            expected: vec![token],
            at,
        }
    }

    /// Union of two expected sets, keeping first-seen order.
    pub fn merge(&mut self, other: Expectation) {
        for token in other.expected {
            if !self.expected.contains(&token) {
                self.expected.push(token);
            }
        }
    }
}

/// The failure signal threaded through every rule.
#[derive(Debug)]
pub enum RuleError {
    /// Backtrackable miss: nothing was consumed, an alternation may try the
    /// next alternative.
    NoMatch(Expectation),
    /// Unrecoverable failure: aborts the current parse attempt outright.
    Fatal(ParseError),
}

impl From<ParseError> for RuleError {
    fn from(error: ParseError) -> Self {
        RuleError::Fatal(error)
    }
}

pub type RuleResult<T> = Result<T, RuleError>;

/// Read-only cursor over an in-memory source buffer.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Cursor { source, pos: 0 }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The unconsumed remainder of the buffer.
    pub fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn advance(&mut self, bytes: usize) {
        self.pos = (self.pos + bytes).min(self.source.len());
    }

    /// Rewind to an earlier position saved by the caller.
    pub fn backtrack(&mut self, to: usize) {
        debug_assert!(to <= self.pos, "cursor may only backtrack");
        self.pos = to;
    }

    pub fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() {
                self.advance(c.len_utf8());
            } else {
                break;
            }
        }
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

impl<'a> Parser<'a> {
    /// True when the byte at `offset` cannot continue a word, i.e. a keyword
    /// ending there is not a prefix of a longer identifier.
    fn word_boundary_at(&self, offset: usize) -> bool {
        self.cursor
            .source()
            .as_bytes()
            .get(offset)
            .map_or(true, |b| !is_word_byte(*b))
    }

    /// Matches `text` exactly, with no boundary requirement afterwards.
    pub fn lexeme(&mut self, text: &'static str, describe: &'static str) -> RuleResult<Span> {
        let save = self.cursor.pos();
        self.cursor.skip_whitespace();
        let start = self.cursor.pos();
        if self.cursor.rest().starts_with(text) {
            self.cursor.advance(text.len());
            return Ok(Span::new(start, start + text.len()));
        }
        self.cursor.backtrack(save);
        Err(RuleError::NoMatch(Expectation::one(describe, start)))
    }

    /// Matches `text` as a whole word: the next byte must not be able to
    /// continue an identifier, so `true` does not match inside `truex`.
    pub fn keyword(&mut self, text: &'static str, describe: &'static str) -> RuleResult<Span> {
        let save = self.cursor.pos();
        self.cursor.skip_whitespace();
        let start = self.cursor.pos();
        if self.cursor.rest().starts_with(text) && self.word_boundary_at(start + text.len()) {
            self.cursor.advance(text.len());
            return Ok(Span::new(start, start + text.len()));
        }
        self.cursor.backtrack(save);
        Err(RuleError::NoMatch(Expectation::one(describe, start)))
    }

    /// Matches a single punctuation character.
    pub fn punct(&mut self, ch: char, describe: &'static str) -> RuleResult<Span> {
        let save = self.cursor.pos();
        self.cursor.skip_whitespace();
        let start = self.cursor.pos();
        if self.cursor.peek() == Some(ch) {
            self.cursor.advance(ch.len_utf8());
            return Ok(Span::new(start, self.cursor.pos()));
        }
        self.cursor.backtrack(save);
        Err(RuleError::NoMatch(Expectation::one(describe, start)))
    }

    /// Matches a maximal run of decimal digits decoded as an `i64`.
    ///
    /// A run that does not fit is a fatal [`ParseError::NumericOverflow`]; a
    /// run glued to word characters (`123abc`) is a clean no-match so the
    /// caller can try reading an identifier instead.
    pub fn number(&mut self, describe: &'static str) -> RuleResult<(i64, Span)> {
        let save = self.cursor.pos();
        self.cursor.skip_whitespace();
        let start = self.cursor.pos();
        let rest = self.cursor.rest();
        let len = rest.bytes().take_while(u8::is_ascii_digit).count();
        if len == 0 || !self.word_boundary_at(start + len) {
            self.cursor.backtrack(save);
            return Err(RuleError::NoMatch(Expectation::one(describe, start)));
        }
        let span = Span::new(start, start + len);
        match rest[..len].parse::<i64>() {
            Ok(value) => {
                self.cursor.advance(len);
                Ok((value, span))
            }
            Err(_) => {
                self.cursor.backtrack(save);
                Err(RuleError::Fatal(self.numeric_overflow(span)))
            }
        }
    }

    /// Matches an ASCII identifier: `[A-Za-z_][A-Za-z0-9_]*`.
    pub fn identifier(&mut self, describe: &'static str) -> RuleResult<(String, Span)> {
        let save = self.cursor.pos();
        self.cursor.skip_whitespace();
        let start = self.cursor.pos();
        let rest = self.cursor.rest();
        if !rest.starts_with(is_identifier_start) {
            self.cursor.backtrack(save);
            return Err(RuleError::NoMatch(Expectation::one(describe, start)));
        }
        let len = rest.bytes().take_while(|b| is_word_byte(*b)).count();
        self.cursor.advance(len);
        Ok((rest[..len].to_string(), Span::new(start, start + len)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SourceContext;

    fn parser(source: &str) -> Parser<'_> {
        Parser::new(source, SourceContext::anonymous(source))
    }

    #[test]
    fn keyword_consumes_exact_spelling() {
        let mut p = parser("nil rest");
        let span = p.keyword("nil", "`nil`").unwrap();
        assert_eq!(span, Span::new(0, 3));
        assert_eq!(p.cursor.pos(), 3);
    }

    #[test]
    fn keyword_respects_word_boundary() {
        let mut p = parser("truex");
        assert!(matches!(
            p.keyword("true", "`true`"),
            Err(RuleError::NoMatch(_))
        ));
        // zero consumption on a miss
        assert_eq!(p.cursor.pos(), 0);
    }

    #[test]
    fn miss_restores_skipped_whitespace() {
        let mut p = parser("   (");
        assert!(p.keyword("nil", "`nil`").is_err());
        assert_eq!(p.cursor.pos(), 0);
        let span = p.punct('(', "`(`").unwrap();
        assert_eq!(span, Span::new(3, 4));
    }

    #[test]
    fn number_decodes_maximal_digit_run() {
        let mut p = parser("123)");
        let (value, span) = p.number("a number").unwrap();
        assert_eq!(value, 123);
        assert_eq!(span, Span::new(0, 3));
    }

    #[test]
    fn number_overflow_is_fatal() {
        let mut p = parser("99999999999999999999");
        match p.number("a number") {
            Err(RuleError::Fatal(ParseError::NumericOverflow { .. })) => {}
            other => panic!("expected a fatal overflow, got {:?}", other.map(|v| v.0)),
        }
    }

    #[test]
    fn number_glued_to_letters_is_a_clean_miss() {
        let mut p = parser("123abc");
        assert!(matches!(p.number("a number"), Err(RuleError::NoMatch(_))));
        assert_eq!(p.cursor.pos(), 0);
    }

    #[test]
    fn identifier_rejects_leading_digit() {
        let mut p = parser("9lives");
        assert!(matches!(
            p.identifier("an identifier"),
            Err(RuleError::NoMatch(_))
        ));
        let mut p = parser("_under9score rest");
        let (name, span) = p.identifier("an identifier").unwrap();
        assert_eq!(name, "_under9score");
        assert_eq!(span, Span::new(0, 12));
    }

    #[test]
    fn expectation_merge_deduplicates() {
        let mut exp = Expectation::one("`nil`", 0);
        exp.merge(Expectation::one("a number", 0));
        exp.merge(Expectation::one("`nil`", 0));
        assert_eq!(exp.expected, vec!["`nil`", "a number"]);
    }
}
