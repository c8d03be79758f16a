//! Generic rule-composition shapes over the scanner contract.
//!
//! Rules are first-class functions with a uniform signature: attempt a match
//! at the cursor, return a value and the advanced cursor on success, or a
//! [`RuleError`] on failure. Sequencing is expressed with plain `?`-chaining
//! inside grammar rules and commits incrementally: once a sub-rule of a
//! sequence has consumed input, the sequence as a whole no longer backtracks.
//! Ambiguous prefixes must therefore be resolved by [`alternation`] before
//! being sequenced.
//!
//! [`alternation`]: Parser::alternation

use crate::ast::Span;
use crate::syntax::parser::Parser;
use crate::syntax::scanner::{Expectation, RuleError, RuleResult};

/// The uniform rule contract all combinators compose over.
pub type RuleFn<T> = fn(&mut Parser<'_>) -> RuleResult<T>;

impl<'a> Parser<'a> {
    /// Ordered alternation: tries each rule in declaration order and returns
    /// the first success. If all miss, fails with the union of their
    /// expected sets, having consumed nothing.
    ///
    /// A sub-rule that misses after consuming input is a committed sequence
    /// failing mid-way; that miss is propagated immediately instead of
    /// letting later alternatives run from a corrupted position.
    pub fn alternation<T>(&mut self, rules: &[RuleFn<T>]) -> RuleResult<T> {
        let start = self.cursor.pos();
        let mut union: Option<Expectation> = None;
        for rule in rules {
            match rule(self) {
                Ok(value) => return Ok(value),
                Err(RuleError::NoMatch(miss)) => {
                    if self.cursor.pos() != start {
                        return Err(RuleError::NoMatch(miss));
                    }
                    match union.as_mut() {
                        Some(acc) => acc.merge(miss),
                        None => union = Some(miss),
                    }
                }
                Err(fatal) => return Err(fatal),
            }
        }
        Err(RuleError::NoMatch(
            union.unwrap_or_else(|| Expectation::one("nothing", start)),
        ))
    }

    /// Repeatedly parses `element`, consuming one `separator` between
    /// successive elements, and stops cleanly when no separator follows.
    /// The empty list is allowed. An element missing after a committed
    /// separator propagates to the caller.
    pub fn separated_list<T>(
        &mut self,
        element: RuleFn<T>,
        separator: RuleFn<Span>,
    ) -> RuleResult<Vec<T>> {
        let mut items = Vec::new();
        let start = self.cursor.pos();
        match element(self) {
            Ok(first) => items.push(first),
            Err(RuleError::NoMatch(_)) if self.cursor.pos() == start => return Ok(items),
            Err(other) => return Err(other),
        }
        loop {
            let before_sep = self.cursor.pos();
            match separator(self) {
                Ok(_) => {}
                Err(RuleError::NoMatch(_)) if self.cursor.pos() == before_sep => break,
                Err(other) => return Err(other),
            }
            items.push(element(self)?);
        }
        Ok(items)
    }

    /// Attempts `rule` without consuming input: cursor and nesting depth are
    /// restored regardless of the outcome.
    pub fn peek<T>(&mut self, rule: RuleFn<T>) -> bool {
        let pos = self.cursor.pos();
        let depth = self.depth;
        let matched = rule(self).is_ok();
        self.cursor.backtrack(pos);
        self.depth = depth;
        matched
    }

    /// Peek-guarded repetition: before each iteration `probe` is attempted
    /// non-consumingly; when it misses, the repetition ends successfully
    /// with the elements collected so far. Collecting into `out` means a
    /// mid-loop failure still leaves the already-parsed prefix with the
    /// caller. The probe is what keeps the statement driver from looping
    /// forever on malformed trailing input.
    pub fn repeat_guarded<T>(
        &mut self,
        probe: RuleFn<()>,
        element: RuleFn<T>,
        out: &mut Vec<T>,
    ) -> RuleResult<()> {
        while self.peek(probe) {
            out.push(element(self)?);
        }
        Ok(())
    }
}
