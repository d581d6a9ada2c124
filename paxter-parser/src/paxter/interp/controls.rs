//! Control flow commands
//!
//! Both are Direct Apply functions: they receive the raw command and decide what to interpret.
//!
//!     @if[cond]{...}          @if[not cond]{...}
//!     @for[name in iterable]{...}
//!
//! Identifiers in these options are resolved through the phrase evaluator, any other token is
//! interpreted as usual.

use super::fragments::FragmentList;
use super::interpreter::Interpreter;
use super::value::{CallResult, Value};
use crate::paxter::ast::{Command, MainArg, Token};
use crate::paxter::error::{PaxterError, RenderResult};
use tracing::trace;

/// Interpret the main argument when the condition holds, yield `None` otherwise.
pub fn if_statement(interpreter: &mut Interpreter<'_>, command: &Command) -> CallResult {
    let options = command.options.as_ref().ok_or_else(|| {
        PaxterError::render("`if` expects options [cond] or [not cond]", command.span.start)
    })?;
    let main_arg = required_main_arg(command, "if")?;

    let (negated, cond) = match options.children.as_slice() {
        [cond] => (false, cond),
        [not, cond] if not.as_identifier() == Some("not") => (true, cond),
        _ => {
            return Err(PaxterError::render(
                "`if` expects options [cond] or [not cond]",
                options.span.start,
            )
            .into())
        }
    };

    let holds = evaluate_operand(interpreter, cond)?.is_truthy() != negated;
    trace!(holds, negated, "if statement");
    if holds {
        Ok(interpreter.transform_main_arg(main_arg)?)
    } else {
        Ok(Value::None)
    }
}

/// Interpret the main argument once per element, with `name` bound to the element.
///
/// Lists and fragment lists yield their items, maps their keys, strings their characters.
/// The binding stays in the environment once the loop is over.
pub fn for_statement(interpreter: &mut Interpreter<'_>, command: &Command) -> CallResult {
    let usage = "`for` expects options [name in iterable]";
    let options = command
        .options
        .as_ref()
        .ok_or_else(|| PaxterError::render(usage, command.span.start))?;
    let main_arg = required_main_arg(command, "for")?;

    let (name, iterable) = match options.children.as_slice() {
        [Token::Identifier(name), keyword, iterable] if keyword.as_identifier() == Some("in") => {
            (name, iterable)
        }
        _ => return Err(PaxterError::render(usage, options.span.start).into()),
    };

    let items = match evaluate_operand(interpreter, iterable)? {
        Value::List(items) => items,
        Value::Fragments(list) => list.into_inner(),
        Value::Map(entries) => entries.into_keys().map(Value::Str).collect(),
        Value::Str(text) => text.chars().map(|ch| Value::Str(ch.to_string())).collect(),
        other => {
            return Err(PaxterError::render(
                format!("cannot iterate over {}", other.type_name()),
                iterable.span().start,
            )
            .into())
        }
    };

    trace!(name = %name.name, count = items.len(), "for statement");
    let mut results = FragmentList::new();
    for item in items {
        interpreter.env_mut().insert(name.name.clone(), item);
        results.push(interpreter.transform_main_arg(main_arg)?);
    }
    Ok(Value::Fragments(results))
}

fn required_main_arg<'c>(command: &'c Command, name: &str) -> RenderResult<&'c MainArg> {
    command.main_arg.as_ref().ok_or_else(|| {
        PaxterError::render(
            format!("`{name}` expects a main argument"),
            command.span.start,
        )
    })
}

fn evaluate_operand(interpreter: &mut Interpreter<'_>, token: &Token) -> RenderResult<Value> {
    match token {
        Token::Identifier(id) => interpreter.evaluate_phrase(&id.name, id.span.start),
        other => interpreter.transform_token(other),
    }
}

#[cfg(test)]
mod tests {
    use crate::paxter::interp::{Environment, Value};
    use crate::paxter::presets::{default_environment, run, run_simple};

    fn render(source: &str, env: &mut Environment) -> String {
        run_simple(source, env).unwrap()
    }

    #[test]
    fn test_if_branches() {
        let mut env = default_environment().with("x", true).with("y", 0);
        assert_eq!(render("@if[x]{yes}", &mut env), "yes");
        assert_eq!(render("@if[y]{yes}", &mut env), "");
        assert_eq!(render("@if[not y]{no}", &mut env), "no");
        assert_eq!(render("@if[not x]{no}", &mut env), "");
        assert_eq!(render("@if[true]\"lit\"", &mut env), "lit");
        assert_eq!(render("@if[\"\"]{empty}", &mut env), "");
    }

    #[test]
    fn test_if_is_lazy() {
        let mut env = default_environment()
            .with("x", false)
            .with("boom", Value::function(|_| Err("should not run".into())));
        assert_eq!(render("@if[x]{@boom{}}", &mut env), "");
    }

    #[test]
    fn test_if_usage_errors() {
        let mut env = default_environment().with("x", true);
        let err = run_simple("@if{body}", &mut env).unwrap_err();
        assert!(err.message().contains("[cond]"));
        let err = run_simple("@if[x]", &mut env).unwrap_err();
        assert!(err.message().contains("main argument"));
        let err = run_simple("@if[a b c]{x}", &mut env).unwrap_err();
        assert_eq!(err.offset(), Some(4));
    }

    #[test]
    fn test_for_over_list() {
        let mut env = default_environment().with(
            "xs",
            Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)]),
        );
        assert_eq!(render("@for[i in xs]{@|i|-}", &mut env), "1-2-3-");
        assert_eq!(env.get("i"), Some(&Value::Int(3)));
    }

    #[test]
    fn test_for_yields_one_list_per_iteration() {
        let mut env = default_environment().with(
            "xs",
            Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)]),
        );
        let list = run("@for[i in xs]{@|i|-}", &mut env).unwrap();
        let [Value::Fragments(iterations)] = list.items() else {
            panic!("expected a single fragment list, got {list:?}");
        };
        let rendered: Vec<String> = iterations.iter().map(Value::to_string).collect();
        assert_eq!(rendered, ["1-", "2-", "3-"]);
        assert_eq!(
            list.flatten(),
            [
                Value::Int(1),
                Value::from("-"),
                Value::Int(2),
                Value::from("-"),
                Value::Int(3),
                Value::from("-"),
            ]
        );
    }

    #[test]
    fn test_for_over_string_and_literal() {
        let mut env = default_environment().with("word", "abc");
        assert_eq!(render("@for[c in word]{<@c>}", &mut env), "<a><b><c>");
        assert_eq!(render("@for[n in @|[4, 5]|]{@n;}", &mut env), "4;5;");
    }

    #[test]
    fn test_for_over_number_fails() {
        let mut env = default_environment().with("n", 3);
        let err = run_simple("@for[i in n]{x}", &mut env).unwrap_err();
        assert_eq!(err.message(), "cannot iterate over int");
        assert_eq!(err.offset(), Some(10));
    }
}
