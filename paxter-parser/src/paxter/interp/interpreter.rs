//! Tree interpreter
//!
//!     The interpreter walks a parsed tree depth first, left to right, and turns every node
//!     into a [`Value`]:
//!
//!         Text           its string; in prose, `\` + newline (with surrounding blanks) is elided
//!         FragmentSeq    a fragment list of its interpreted children, `None` results dropped
//!         Number         its numeric value
//!         Command        see below
//!         Identifier, Operator, TokenSeq
//!                        errors: only a call-wrapper consuming options gives these a meaning
//!
//!     A command first resolves its phrase through the environment's phrase evaluator. A bare
//!     command yields that value as is. Otherwise the value is called through its call-wrapper;
//!     a plain function gets the Normal Apply wrapper.
//!
//!     Errors raised by user code are pinned to the start of the command that called it. Errors
//!     that already are paxter errors go through untouched.

use super::environment::{Environment, PHRASE_EVAL_KEY};
use super::fragments::FragmentList;
use super::value::Value;
use super::wrappers::CallWrapper;
use crate::paxter::ast::{Command, Fragment, FragmentSeq, MainArg, Text, Token};
use crate::paxter::error::{PaxterError, PaxterResult, RenderResult};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

static LINE_CONTINUATION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\[ \t\r\x0C\x0B]*\n[ \t\r\x0C\x0B]*").unwrap());

/// Interpret `tree` parsed from `source` against `env`.
///
/// Render errors come back with their line and column resolved against `source`.
pub fn interpret(
    source: &str,
    env: &mut Environment,
    tree: &FragmentSeq,
) -> PaxterResult<FragmentList> {
    debug!(fragments = tree.children.len(), "interpreting tree");
    Interpreter::new(source, env)
        .transform_fragment_seq(tree)
        .map_err(|err| err.locate(source))
}

pub struct Interpreter<'a> {
    source: &'a str,
    env: &'a mut Environment,
}

impl<'a> Interpreter<'a> {
    pub fn new(source: &'a str, env: &'a mut Environment) -> Self {
        Self { source, env }
    }

    pub fn source(&self) -> &str {
        self.source
    }

    pub fn env(&self) -> &Environment {
        self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        self.env
    }

    pub fn transform_fragment_seq(&mut self, seq: &FragmentSeq) -> RenderResult<FragmentList> {
        let mut list = FragmentList::new();
        for fragment in &seq.children {
            let value = self.transform_fragment(fragment)?;
            if !value.is_none() {
                list.push(value);
            }
        }
        Ok(list)
    }

    pub fn transform_fragment(&mut self, fragment: &Fragment) -> RenderResult<Value> {
        match fragment {
            Fragment::Text(text) => Ok(self.transform_text(text)),
            Fragment::Command(command) => self.transform_command(command),
            Fragment::FragmentSeq(seq) => Ok(Value::Fragments(self.transform_fragment_seq(seq)?)),
        }
    }

    pub fn transform_token(&mut self, token: &Token) -> RenderResult<Value> {
        match token {
            Token::Text(text) => Ok(self.transform_text(text)),
            Token::FragmentSeq(seq) => Ok(Value::Fragments(self.transform_fragment_seq(seq)?)),
            Token::Number(number) => Ok(Value::from(number.value)),
            Token::Command(command) => self.transform_command(command),
            Token::Identifier(id) => Err(PaxterError::render(
                format!("identifier not expected: `{}`", id.name),
                id.span.start,
            )),
            Token::Operator(op) => Err(PaxterError::render(
                format!("operator not expected: `{}`", op.symbols),
                op.span.start,
            )),
            Token::TokenSeq(seq) => Err(PaxterError::render(
                "token list not expected",
                seq.span.start,
            )),
        }
    }

    pub fn transform_main_arg(&mut self, main_arg: &MainArg) -> RenderResult<Value> {
        match main_arg {
            MainArg::FragmentSeq(seq) => Ok(Value::Fragments(self.transform_fragment_seq(seq)?)),
            MainArg::Text(text) => Ok(self.transform_text(text)),
        }
    }

    pub fn transform_text(&self, text: &Text) -> Value {
        if text.is_prose() {
            Value::Str(LINE_CONTINUATION_REGEX.replace_all(&text.inner, "").into_owned())
        } else {
            Value::Str(text.inner.clone())
        }
    }

    pub fn transform_command(&mut self, command: &Command) -> RenderResult<Value> {
        trace!(phrase = %command.phrase, offset = command.span.start, "dispatching command");
        let phrase_value = self.evaluate_phrase(&command.phrase, command.span.start)?;
        if command.is_bare() {
            return Ok(phrase_value);
        }

        let wrapper = match phrase_value {
            Value::Wrapper(wrapper) => wrapper,
            Value::Function(f) => CallWrapper::Normal(f),
            other => {
                return Err(PaxterError::render(
                    format!(
                        "`{}` is not callable: found {}",
                        command.phrase,
                        other.type_name()
                    ),
                    command.span.start,
                ))
            }
        };
        trace!(kind = wrapper.kind(), phrase = %command.phrase, "calling through wrapper");
        wrapper
            .call(self, command)
            .map_err(|err| PaxterError::from_call_error(err, command.span.start))
    }

    /// Resolve `phrase` through the environment's phrase evaluator.
    ///
    /// Without an evaluator only the empty phrase resolves, to `None`. `offset` pins errors.
    pub fn evaluate_phrase(&self, phrase: &str, offset: usize) -> RenderResult<Value> {
        let evaluator = match self.env.get(PHRASE_EVAL_KEY) {
            Some(Value::PhraseEvaluator(f)) => f.clone(),
            Some(other) => {
                return Err(PaxterError::render(
                    format!(
                        "`{PHRASE_EVAL_KEY}` must be a phrase evaluator, found {}",
                        other.type_name()
                    ),
                    offset,
                ))
            }
            None if phrase.is_empty() => return Ok(Value::None),
            None => {
                return Err(PaxterError::render(
                    format!("phrase evaluator `{PHRASE_EVAL_KEY}` not found in environment"),
                    offset,
                ))
            }
        };
        evaluator(phrase, self.env).map_err(|err| PaxterError::from_call_error(err, offset))
    }
}
