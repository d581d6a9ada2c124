//! Call-wrappers
//!
//!     A call-wrapper decides how a command reaches the function behind its phrase:
//!
//!         Direct           f(interpreter, command)
//!                          The function sees the raw command and interprets what it wants,
//!                          when it wants. Control flow is built this way.
//!         Normal           f(arguments)
//!         NormalWithEnv    f(environment, arguments)
//!                          The options are interpreted into positional and keyword arguments,
//!                          the main argument (if any) becoming the first positional one.
//!
//!     Options are read as a comma separated list of values and `name = value` pairs:
//!
//!         [1, "two", three=@f{4}]      positional: main argument?, 1, "two"
//!                                      keywords:   three
//!
//!     Reading is a two state machine. It starts out positional and switches to keyword at the
//!     first `name =`; from then on a positional value is an error.

use super::environment::Environment;
use super::interpreter::Interpreter;
use super::value::{Arguments, CallResult, DirectFn, NativeEnvFn, NativeFn};
use crate::paxter::ast::{Command, Token, TokenSeq};
use crate::paxter::error::{PaxterError, RenderResult};
use std::fmt;
use std::rc::Rc;
use tracing::trace;

#[derive(Clone)]
pub enum CallWrapper {
    Direct(DirectFn),
    Normal(NativeFn),
    NormalWithEnv(NativeEnvFn),
}

impl CallWrapper {
    pub fn direct(f: impl Fn(&mut Interpreter<'_>, &Command) -> CallResult + 'static) -> Self {
        CallWrapper::Direct(Rc::new(f))
    }

    pub fn normal(f: impl Fn(Arguments) -> CallResult + 'static) -> Self {
        CallWrapper::Normal(Rc::new(f))
    }

    pub fn normal_with_env(
        f: impl Fn(&mut Environment, Arguments) -> CallResult + 'static,
    ) -> Self {
        CallWrapper::NormalWithEnv(Rc::new(f))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            CallWrapper::Direct(_) => "direct",
            CallWrapper::Normal(_) => "normal",
            CallWrapper::NormalWithEnv(_) => "normal-with-env",
        }
    }

    pub fn call(&self, interpreter: &mut Interpreter<'_>, command: &Command) -> CallResult {
        match self {
            CallWrapper::Direct(f) => f(interpreter, command),
            CallWrapper::Normal(f) => {
                let args = extract_arguments(interpreter, command)?;
                f(args)
            }
            CallWrapper::NormalWithEnv(f) => {
                let args = extract_arguments(interpreter, command)?;
                f(interpreter.env_mut(), args)
            }
        }
    }
}

impl PartialEq for CallWrapper {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CallWrapper::Direct(a), CallWrapper::Direct(b)) => Rc::ptr_eq(a, b),
            (CallWrapper::Normal(a), CallWrapper::Normal(b)) => Rc::ptr_eq(a, b),
            (CallWrapper::NormalWithEnv(a), CallWrapper::NormalWithEnv(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for CallWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CallWrapper::{}", self.kind())
    }
}

/// Interpret the main argument and options of `command` into Normal Apply arguments.
pub fn extract_arguments(
    interpreter: &mut Interpreter<'_>,
    command: &Command,
) -> RenderResult<Arguments> {
    let mut args = Arguments::new();
    if let Some(main_arg) = &command.main_arg {
        args.positional.push(interpreter.transform_main_arg(main_arg)?);
    }
    if let Some(options) = &command.options {
        collect_options(interpreter, options, &mut args)?;
    }
    trace!(
        positional = args.positional.len(),
        keywords = args.keywords.len(),
        "extracted arguments"
    );
    Ok(args)
}

fn collect_options(
    interpreter: &mut Interpreter<'_>,
    options: &TokenSeq,
    args: &mut Arguments,
) -> RenderResult<()> {
    let tokens = &options.children;
    let mut in_keywords = false;
    let mut index = 0;

    while index < tokens.len() {
        let token = &tokens[index];
        let keyword = match (token, tokens.get(index + 1)) {
            (Token::Identifier(id), Some(next)) if next.is_operator("=") => Some(id),
            _ => None,
        };

        if let Some(id) = keyword {
            let equals = &tokens[index + 1];
            let value_token = tokens
                .get(index + 2)
                .filter(|token| !token.is_operator(","))
                .ok_or_else(|| {
                    PaxterError::render(
                        format!("expected a value after `{} =`", id.name),
                        equals.span().start,
                    )
                })?;
            if args.has_keyword(&id.name) {
                return Err(PaxterError::render(
                    format!("duplicated keyword {}", id.name),
                    id.span.start,
                ));
            }
            let value = interpreter.transform_token(value_token)?;
            args.keywords.push((id.name.clone(), value));
            in_keywords = true;
            index += 3;
        } else {
            if token.is_operator("=") {
                return Err(PaxterError::render(
                    "misplaced `=`: expected a keyword before it",
                    token.span().start,
                ));
            }
            if in_keywords {
                return Err(PaxterError::render(
                    "positional argument after keyword argument",
                    options.span.start,
                ));
            }
            args.positional.push(interpreter.transform_token(token)?);
            index += 1;
        }

        if let Some(separator) = tokens.get(index) {
            if !separator.is_operator(",") {
                return Err(PaxterError::render(
                    "expected comma after value",
                    separator.span().start,
                ));
            }
            index += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paxter::error::PaxterResult;
    use crate::paxter::interp::{interpret, Value};
    use crate::paxter::parsing::parse;
    use crate::paxter::presets::default_environment;

    fn env_with(entries: Vec<(&str, Value)>) -> Environment {
        let mut env = default_environment().with("g", "gee");
        for (name, value) in entries {
            env.insert(name, value);
        }
        env
    }

    fn collect_args(source: &str) -> PaxterResult<Arguments> {
        let captured = Rc::new(std::cell::RefCell::new(None));
        let sink = Rc::clone(&captured);
        let mut env = env_with(vec![(
            "f",
            Value::function(move |args| {
                *sink.borrow_mut() = Some(args);
                Ok(Value::None)
            }),
        )]);
        let tree = parse(source)?;
        interpret(source, &mut env, &tree)?;
        let args = captured.borrow_mut().take();
        Ok(args.unwrap_or_default())
    }

    #[test]
    fn test_positional_and_keywords() {
        let args = collect_args(r#"@f[1, "two", c=@g, d=2.5]{main}"#).unwrap();
        assert_eq!(args.positional.len(), 3);
        assert_eq!(args.positional[0].to_string(), "main");
        assert_eq!(args.positional[1], Value::Int(1));
        assert_eq!(args.positional[2], Value::from("two"));
        assert_eq!(args.keyword("c"), Some(&Value::from("gee")));
        assert_eq!(args.keyword("d"), Some(&Value::Float(2.5)));
    }

    #[test]
    fn test_empty_options_and_trailing_comma() {
        assert!(collect_args("@f[]").unwrap().is_empty());
        assert_eq!(collect_args("@f[1,]").unwrap().positional, [Value::Int(1)]);
    }

    #[test]
    fn test_positional_after_keyword() {
        let err = collect_args("@f[1,x=2,3]").unwrap_err();
        assert_eq!(err.message(), "positional argument after keyword argument");
        assert_eq!(err.offset(), Some(3));
    }

    #[test]
    fn test_duplicated_keyword() {
        let err = collect_args("@f[x=1,x=2]").unwrap_err();
        assert_eq!(err.message(), "duplicated keyword x");
        assert_eq!(err.offset(), Some(7));
    }

    #[test]
    fn test_missing_comma() {
        let err = collect_args("@f[1 2]").unwrap_err();
        assert_eq!(err.message(), "expected comma after value");
        assert_eq!(err.offset(), Some(5));
    }

    #[test]
    fn test_missing_keyword_value() {
        let err = collect_args("@f[x=]").unwrap_err();
        assert!(err.message().contains("expected a value after `x =`"));
        assert_eq!(err.offset(), Some(4));

        let err = collect_args("@f[x=,1]").unwrap_err();
        assert_eq!(err.offset(), Some(4));
    }

    #[test]
    fn test_misplaced_equals() {
        let err = collect_args("@f[=1]").unwrap_err();
        assert!(err.message().starts_with("misplaced `=`"));
        assert_eq!(err.offset(), Some(3));
    }

    #[test]
    fn test_normal_with_env_sees_environment() {
        let source = "@count[1, 2]@count[3]";
        let mut env = env_with(vec![(
            "count",
            Value::Wrapper(CallWrapper::normal_with_env(|env, args| {
                let seen = env.get("seen").and_then(Value::as_int).unwrap_or(0);
                env.insert("seen", seen + args.len() as i64);
                Ok(Value::None)
            })),
        )]);
        let tree = parse(source).unwrap();
        interpret(source, &mut env, &tree).unwrap();
        assert_eq!(env.get("seen"), Some(&Value::Int(3)));
    }

    #[test]
    fn test_direct_receives_raw_command() {
        let source = "@raw[anything, goes = here]";
        let mut env = env_with(vec![(
            "raw",
            Value::Wrapper(CallWrapper::direct(|_, command| {
                let options = command.options.as_ref().map_or(0, |o| o.children.len());
                Ok(Value::Int(options as i64))
            })),
        )]);
        let tree = parse(source).unwrap();
        let list = interpret(source, &mut env, &tree).unwrap();
        assert_eq!(list.items(), [Value::Int(5)]);
    }
}
