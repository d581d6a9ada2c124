//! Command grammar
//!
//!     After a switch character, the first of these that matches decides what follows:
//!
//!         identifier        @name           phrase is the identifier
//!         #*|               @|a + b|        phrase is the bar-enclosed text, taken verbatim
//!         #*{               @{...}          a nested fragment sequence
//!         #*"               @"..."          a verbatim text
//!         symbol            @! @@ @%        a single-symbol command
//!
//!     Anything else after the switch is a syntax error.
//!
//!     A phrase may then be followed by options (`[...]`), then by a main argument (`#*{...}`
//!     or `#*"..."`), both optional. A single-symbol command, or a command whose bar-enclosed
//!     phrase is empty, takes neither.

use super::fragments::unclosed_pattern;
use super::parser::ParseContext;
use crate::paxter::ast::{Command, Fragment, MainArg, Span};
use crate::paxter::error::{ParserResult, PaxterError};
use crate::paxter::lexing::tokenizer::{
    break_at, match_at, IDENTIFIER_REGEX, LEFT_BAR_REGEX, LEFT_BRACE_REGEX, LEFT_BRACKET_REGEX,
    LEFT_QUOTE_REGEX, SYMBOL_REGEX,
};
use crate::paxter::lexing::EnclosingPattern;
use tracing::trace;

impl ParseContext<'_, '_> {
    /// Parse whatever follows a switch character found at `switch_pos`; `pos` is the offset
    /// right after the switch.
    pub(crate) fn parse_switch_expression(
        &mut self,
        switch_pos: usize,
        pos: usize,
    ) -> ParserResult<(Fragment, usize)> {
        if let Some(id) = match_at(&IDENTIFIER_REGEX, self.source, pos) {
            trace!(offset = switch_pos, phrase = id.text, "identifier command");
            let (command, next) =
                self.parse_after_phrase(switch_pos, id.text, EnclosingPattern::global(), id.end)?;
            return Ok((Fragment::Command(command), next));
        }

        if let Some(bar) = match_at(&LEFT_BAR_REGEX, self.source, pos) {
            let enclosing = EnclosingPattern::new(bar.text, bar.start)?;
            let break_re = enclosing.non_rec_break_re(self.tokenizer);
            let found = break_at(&break_re, self.source, bar.end)
                .ok_or_else(|| unclosed_pattern(&enclosing, bar.start))?;
            trace!(offset = switch_pos, phrase = found.inner, "bar command");
            let (command, next) =
                self.parse_after_phrase(switch_pos, found.inner, enclosing, found.end)?;
            return Ok((Fragment::Command(command), next));
        }

        if let Some(brace) = match_at(&LEFT_BRACE_REGEX, self.source, pos) {
            let enclosing = EnclosingPattern::new(brace.text, brace.start)?;
            let (seq, next) = self.parse_fragment_seq(brace.end, enclosing, brace.start)?;
            return Ok((Fragment::FragmentSeq(seq), next));
        }

        if let Some(quote) = match_at(&LEFT_QUOTE_REGEX, self.source, pos) {
            let enclosing = EnclosingPattern::new(quote.text, quote.start)?;
            let (text, next) = self.parse_text(quote.end, enclosing, quote.start)?;
            return Ok((Fragment::Text(text), next));
        }

        if let Some(symbol) = match_at(&SYMBOL_REGEX, self.source, pos) {
            trace!(offset = switch_pos, phrase = symbol.text, "symbol command");
            let span = Span::new(switch_pos, symbol.end);
            let command = Command::bare(symbol.text, EnclosingPattern::global(), span);
            return Ok((Fragment::Command(command), symbol.end));
        }

        Err(PaxterError::syntax(
            format!("invalid expression after `{}`", self.tokenizer.switch()),
            switch_pos,
        ))
    }

    /// Parse the optional options and main argument of a command whose phrase ends at `pos`.
    fn parse_after_phrase(
        &mut self,
        switch_pos: usize,
        phrase: &str,
        phrase_enclosing: EnclosingPattern,
        pos: usize,
    ) -> ParserResult<(Command, usize)> {
        if phrase.is_empty() {
            let span = Span::new(switch_pos, pos);
            return Ok((Command::bare(phrase, phrase_enclosing, span), pos));
        }

        let mut pos = pos;
        let mut options = None;
        if let Some(bracket) = match_at(&LEFT_BRACKET_REGEX, self.source, pos) {
            let (seq, next) = self.parse_token_seq(bracket.start, bracket.end)?;
            options = Some(seq);
            pos = next;
        }

        let main_arg = if let Some(brace) = match_at(&LEFT_BRACE_REGEX, self.source, pos) {
            let enclosing = EnclosingPattern::new(brace.text, brace.start)?;
            let (seq, next) = self.parse_fragment_seq(brace.end, enclosing, brace.start)?;
            pos = next;
            Some(MainArg::FragmentSeq(seq))
        } else if let Some(quote) = match_at(&LEFT_QUOTE_REGEX, self.source, pos) {
            let enclosing = EnclosingPattern::new(quote.text, quote.start)?;
            let (text, next) = self.parse_text(quote.end, enclosing, quote.start)?;
            pos = next;
            Some(MainArg::Text(text))
        } else {
            None
        };

        let command = Command {
            span: Span::new(switch_pos, pos),
            phrase: phrase.to_string(),
            phrase_enclosing,
            options,
            main_arg,
        };
        Ok((command, pos))
    }
}
