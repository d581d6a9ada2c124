//! Options grammar
//!
//!     options := "[" ( ws token )* ws "]"
//!
//!     At each position, after skipping whitespace, the alternatives are tried in this order
//!     and the first match wins:
//!
//!         identifier → operator → number → #*{ fragments → #*" text → switch expression
//!             → nested [ → closing ]
//!
//!     Nothing here gives `,` or `=` a meaning; they come out as operators and it is up to the
//!     call-wrapper consuming the options to make sense of them.

use super::parser::ParseContext;
use crate::paxter::ast::{
    Fragment, Identifier, Number, NumberValue, Operator, Span, Token, TokenSeq,
};
use crate::paxter::error::{ParserResult, PaxterError};
use crate::paxter::lexing::tokenizer::{
    match_at, IDENTIFIER_REGEX, LEFT_BRACE_REGEX, LEFT_BRACKET_REGEX, LEFT_QUOTE_REGEX,
    NUMBER_REGEX, RIGHT_BRACKET_REGEX, WHITESPACE_REGEX,
};
use crate::paxter::lexing::EnclosingPattern;

impl ParseContext<'_, '_> {
    /// Parse a token sequence whose `[` sits at `open`; `start` is right after it.
    ///
    /// Returns the sequence, spanning the content between the brackets, and the offset right
    /// after the closing `]`.
    pub(crate) fn parse_token_seq(
        &mut self,
        open: usize,
        start: usize,
    ) -> ParserResult<(TokenSeq, usize)> {
        let mut children = Vec::new();
        let mut pos = start;

        loop {
            pos = match_at(&WHITESPACE_REGEX, self.source, pos).map_or(pos, |ws| ws.end);

            if let Some(id) = match_at(&IDENTIFIER_REGEX, self.source, pos) {
                let span = Span::new(id.start, id.end);
                children.push(Token::Identifier(Identifier::new(id.text, span)));
                pos = id.end;
                continue;
            }

            if let Some(op) = match_at(self.tokenizer.operator_re(), self.source, pos) {
                let span = Span::new(op.start, op.end);
                children.push(Token::Operator(Operator::new(op.text, span)));
                pos = op.end;
                continue;
            }

            if let Some(number) = match_at(&NUMBER_REGEX, self.source, pos) {
                let value = parse_number(number.text, number.start)?;
                let span = Span::new(number.start, number.end);
                children.push(Token::Number(Number::new(value, span)));
                pos = number.end;
                continue;
            }

            if let Some(brace) = match_at(&LEFT_BRACE_REGEX, self.source, pos) {
                let enclosing = EnclosingPattern::new(brace.text, brace.start)?;
                let (seq, next) = self.parse_fragment_seq(brace.end, enclosing, brace.start)?;
                children.push(Token::FragmentSeq(seq));
                pos = next;
                continue;
            }

            if let Some(quote) = match_at(&LEFT_QUOTE_REGEX, self.source, pos) {
                let enclosing = EnclosingPattern::new(quote.text, quote.start)?;
                let (text, next) = self.parse_text(quote.end, enclosing, quote.start)?;
                children.push(Token::Text(text));
                pos = next;
                continue;
            }

            if let Some(switch) = match_at(self.tokenizer.switch_re(), self.source, pos) {
                let (fragment, next) = self.parse_switch_expression(switch.start, switch.end)?;
                children.push(match fragment {
                    Fragment::Command(command) => Token::Command(command),
                    Fragment::FragmentSeq(seq) => Token::FragmentSeq(seq),
                    Fragment::Text(text) => Token::Text(text),
                });
                pos = next;
                continue;
            }

            if let Some(bracket) = match_at(&LEFT_BRACKET_REGEX, self.source, pos) {
                let (seq, next) = self.parse_token_seq(bracket.start, bracket.end)?;
                children.push(Token::TokenSeq(seq));
                pos = next;
                continue;
            }

            if let Some(bracket) = match_at(&RIGHT_BRACKET_REGEX, self.source, pos) {
                let span = Span::new(start, bracket.start);
                return Ok((TokenSeq::new(children, span), bracket.end));
            }

            return Err(PaxterError::syntax("unclosed `[`: cannot match `]`", open));
        }
    }
}

/// Numbers follow JSON: integers fitting in 64 bits stay integers, anything else is a float.
fn parse_number(text: &str, offset: usize) -> ParserResult<NumberValue> {
    let number: serde_json::Number = serde_json::from_str(text)
        .map_err(|err| PaxterError::syntax(format!("invalid number `{text}`: {err}"), offset))?;
    if let Some(value) = number.as_i64() {
        return Ok(NumberValue::Int(value));
    }
    number
        .as_f64()
        .map(NumberValue::Float)
        .ok_or_else(|| PaxterError::syntax(format!("invalid number `{text}`"), offset))
}
