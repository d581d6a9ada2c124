//! Fragment grammar
//!
//!     fragments := ( text | command )*
//!
//!     Inside a scope enclosed by `E`, the recursive break expression of `E` is matched over
//!     and over. Each match yields the prose before the break, then either the switch
//!     character (a command follows) or the right pattern of `E` (the scope ends there). When
//!     no match is possible the right pattern is missing and the scope is unclosed.
//!
//!     Quoted texts use the non-recursive break instead: the switch character means nothing
//!     between quotes.
//!
//!     At the top level, a padded right pattern must not run into more `#`: `@hi#{x}##` is
//!     unbalanced, not a command followed by a `#`. Inside an enclosed scope the extra `#` is
//!     prose of that scope, as in `@a##{@b#{x}##}##`.

use super::parser::ParseContext;
use crate::paxter::ast::{Fragment, FragmentSeq, Span, Text};
use crate::paxter::error::{ParserResult, PaxterError};
use crate::paxter::lexing::tokenizer::break_at;
use crate::paxter::lexing::EnclosingPattern;

impl ParseContext<'_, '_> {
    /// Parse fragments starting at `start` until the right pattern of `enclosing`.
    ///
    /// `opener` is the offset of the left pattern, reported if the right one never shows up.
    /// Returns the sequence, whose span ends where the right pattern starts, and the offset
    /// right after the right pattern.
    pub(crate) fn parse_fragment_seq(
        &mut self,
        start: usize,
        enclosing: EnclosingPattern,
        opener: usize,
    ) -> ParserResult<(FragmentSeq, usize)> {
        let break_re = enclosing.rec_break_re(self.tokenizer);
        let nested = !enclosing.is_global();
        let mut children = Vec::new();
        let mut pos = start;
        if nested {
            self.depth += 1;
        }

        loop {
            let found = break_at(&break_re, self.source, pos)
                .ok_or_else(|| unclosed_pattern(&enclosing, opener))?;

            if !found.inner.is_empty() {
                children.push(Fragment::Text(Text::new(
                    found.inner,
                    EnclosingPattern::global(),
                    Span::new(found.inner_start, found.break_start),
                )));
            }

            if !found.brk.is_empty() && self.tokenizer.is_switch(found.brk) {
                let (fragment, next) = self.parse_switch_expression(found.break_start, found.end)?;
                children.push(fragment);
                pos = next;
            } else {
                if nested {
                    self.depth -= 1;
                }
                let span = Span::new(start, found.break_start);
                let end = self.check_closing_hashes(&enclosing, found.end, opener)?;
                return Ok((FragmentSeq::new(children, enclosing, span), end));
            }
        }
    }

    /// Parse a verbatim text starting at `start` until the right pattern of `enclosing`.
    pub(crate) fn parse_text(
        &mut self,
        start: usize,
        enclosing: EnclosingPattern,
        opener: usize,
    ) -> ParserResult<(Text, usize)> {
        let break_re = enclosing.non_rec_break_re(self.tokenizer);
        let found = break_at(&break_re, self.source, start)
            .ok_or_else(|| unclosed_pattern(&enclosing, opener))?;
        let span = Span::new(start, found.break_start);
        let end = self.check_closing_hashes(&enclosing, found.end, opener)?;
        Ok((Text::new(found.inner, enclosing, span), end))
    }

    /// Reject a padded right pattern ending at `end` that is directly followed by another `#`,
    /// unless an enclosing scope takes that `#` as prose.
    fn check_closing_hashes(
        &self,
        enclosing: &EnclosingPattern,
        end: usize,
        opener: usize,
    ) -> ParserResult<usize> {
        if self.depth == 0
            && enclosing.right.ends_with('#')
            && self.source[end..].starts_with('#')
        {
            return Err(PaxterError::syntax(
                format!(
                    "unbalanced `{}`: `{}` is followed by another `#`",
                    enclosing.left, enclosing.right
                ),
                opener,
            ));
        }
        Ok(end)
    }
}

pub(crate) fn unclosed_pattern(enclosing: &EnclosingPattern, opener: usize) -> PaxterError {
    PaxterError::syntax(
        format!(
            "unclosed `{}`: cannot match `{}`",
            enclosing.left, enclosing.right
        ),
        opener,
    )
}
