//! Regex tokenizer
//!
//!     The tokenizer is a bundle of compiled regular expressions. The parser never asks for a
//!     stream of tokens: at each step it tries the expressions that are legal at the current
//!     position and keeps the first one that matches. Every expression is anchored at the
//!     start of the slice it is run on, so `match_at(re, source, pos)` means "does `re` match
//!     right at `pos`".
//!
//!     Expressions that do not depend on the switch character are compiled once for the whole
//!     process. The ones that do (switch, operator, global break) are compiled when the
//!     tokenizer is built. Break expressions are parameterized by a right pattern and are
//!     memoized per tokenizer:
//!
//!         non-recursive break    (?s)^(?P<inner>.*?)(?P<break>RIGHT)
//!         recursive break        (?s)^(?P<inner>.*?)(?P<break>SWITCH|RIGHT)
//!         global break           (?s)^(?P<inner>.*?)(?P<break>SWITCH|\z)
//!
//!     The memo tables are owned by the tokenizer, which is owned by a single parser, so they
//!     need no synchronization.

use crate::paxter::error::{PaxterError, PaxterResult};
use crate::paxter::lexing::character_classes::{
    is_op_char, is_reserved, op_class, ID_CONT, ID_START, SYMBOL,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::trace;

pub const DEFAULT_SWITCH: char = '@';

pub static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*").unwrap());

pub static LEFT_BRACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#*\{").unwrap());

pub static LEFT_QUOTE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^#*""#).unwrap());

pub static LEFT_BAR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#*\|").unwrap());

pub static LEFT_BRACKET_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[").unwrap());

pub static RIGHT_BRACKET_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\]").unwrap());

pub static IDENTIFIER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^[{ID_START}][{ID_CONT}]*")).unwrap());

pub static NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?").unwrap()
});

pub static SYMBOL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^[{SYMBOL}]")).unwrap());

/// A piece of source matched by an anchored expression, in absolute offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme<'s> {
    pub text: &'s str,
    pub start: usize,
    pub end: usize,
}

/// A match of a break expression: the text before the break, then the break itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakMatch<'s> {
    pub inner: &'s str,
    pub inner_start: usize,
    pub brk: &'s str,
    pub break_start: usize,
    pub end: usize,
}

/// Try `re` right at `pos`.
pub fn match_at<'s>(re: &Regex, source: &'s str, pos: usize) -> Option<Lexeme<'s>> {
    let found = re.find(source.get(pos..)?)?;
    Some(Lexeme {
        text: found.as_str(),
        start: pos + found.start(),
        end: pos + found.end(),
    })
}

/// Run a break expression right at `pos`.
pub fn break_at<'s>(re: &Regex, source: &'s str, pos: usize) -> Option<BreakMatch<'s>> {
    let captures = re.captures(source.get(pos..)?)?;
    let inner = captures.name("inner")?;
    let brk = captures.name("break")?;
    Some(BreakMatch {
        inner: inner.as_str(),
        inner_start: pos + inner.start(),
        brk: brk.as_str(),
        break_start: pos + brk.start(),
        end: pos + brk.end(),
    })
}

/// Compiled expressions for one switch character
#[derive(Debug, Clone)]
pub struct Tokenizer {
    switch: char,
    switch_regex: Regex,
    operator_regex: Regex,
    global_break_regex: Regex,
    non_rec_break_memo: HashMap<String, Regex>,
    rec_break_memo: HashMap<String, Regex>,
}

impl Tokenizer {
    /// Build a tokenizer for `switch`, which must be a punctuation or symbol character outside
    /// of the reserved set.
    pub fn new(switch: char) -> PaxterResult<Self> {
        if is_reserved(switch) {
            return Err(PaxterError::config(switch, "character is reserved"));
        }
        if !is_op_char(switch) {
            return Err(PaxterError::config(
                switch,
                "switch must be a punctuation or symbol character",
            ));
        }

        let escaped = regex::escape(&switch.to_string());
        let switch_regex = compile(&format!("^{escaped}"));
        let operator_regex = compile(&format!("^(?:{}+|,|;)", op_class(switch)));
        let global_break_regex = compile(&format!(r"(?s)^(?P<inner>.*?)(?P<break>{escaped}|\z)"));

        Ok(Self {
            switch,
            switch_regex,
            operator_regex,
            global_break_regex,
            non_rec_break_memo: HashMap::new(),
            rec_break_memo: HashMap::new(),
        })
    }

    pub fn switch(&self) -> char {
        self.switch
    }

    pub fn switch_re(&self) -> &Regex {
        &self.switch_regex
    }

    pub fn operator_re(&self) -> &Regex {
        &self.operator_regex
    }

    pub fn global_break_re(&self) -> &Regex {
        &self.global_break_regex
    }

    /// Break expression stopping at `right` only.
    pub fn non_rec_break_re(&mut self, right: &str) -> Regex {
        self.non_rec_break_memo
            .entry(right.to_string())
            .or_insert_with(|| {
                trace!(right, "compiling non-recursive break regex");
                compile(&format!(
                    r"(?s)^(?P<inner>.*?)(?P<break>{})",
                    regex::escape(right)
                ))
            })
            .clone()
    }

    /// Break expression stopping at the switch character or at `right`.
    pub fn rec_break_re(&mut self, right: &str) -> Regex {
        let switch = regex::escape(&self.switch.to_string());
        self.rec_break_memo
            .entry(right.to_string())
            .or_insert_with(|| {
                trace!(right, "compiling recursive break regex");
                compile(&format!(
                    r"(?s)^(?P<inner>.*?)(?P<break>{}|{})",
                    switch,
                    regex::escape(right)
                ))
            })
            .clone()
    }

    /// Whether a break expression stopped on the switch character rather than on a right pattern.
    pub fn is_switch(&self, brk: &str) -> bool {
        let mut chars = brk.chars();
        chars.next() == Some(self.switch) && chars.next().is_none()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_SWITCH).unwrap()
    }
}

// Every pattern compiled here is built from escaped input and fixed class bodies.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}
