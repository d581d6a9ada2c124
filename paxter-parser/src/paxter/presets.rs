//! Ready-made parse and interpret pipelines

use crate::paxter::error::PaxterResult;
use crate::paxter::interp::controls::{for_statement, if_statement};
use crate::paxter::interp::{interpret, CallWrapper, Environment, FragmentList, Value};
use crate::paxter::interp::PHRASE_EVAL_KEY;
use crate::paxter::parsing::Parser;

pub use crate::paxter::interp::phrase::default_phrase_eval;

/// An environment with the default phrase evaluator and the `if` and `for` commands.
pub fn default_environment() -> Environment {
    Environment::new()
        .with(PHRASE_EVAL_KEY, Value::phrase_evaluator(default_phrase_eval))
        .with("if", CallWrapper::direct(if_statement))
        .with("for", CallWrapper::direct(for_statement))
}

/// Parse `source` and interpret it against `env`.
pub fn run(source: &str, env: &mut Environment) -> PaxterResult<FragmentList> {
    run_with(&mut Parser::new(), source, env)
}

/// Same as [`run`] with a caller supplied parser, e.g. one using another switch character.
pub fn run_with(
    parser: &mut Parser,
    source: &str,
    env: &mut Environment,
) -> PaxterResult<FragmentList> {
    let tree = parser.parse(source)?;
    interpret(source, env, &tree)
}

/// Parse, interpret and render `source` into a string.
pub fn run_simple(source: &str, env: &mut Environment) -> PaxterResult<String> {
    Ok(run(source, env)?.render())
}

pub fn run_simple_default(source: &str) -> PaxterResult<String> {
    run_simple(source, &mut default_environment())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_simple_default() {
        assert_eq!(
            run_simple_default("mail me @@ home@!").unwrap(),
            "mail me @ home"
        );
    }

    #[test]
    fn test_run_with_custom_switch() {
        let mut parser = Parser::with_switch('$').unwrap();
        let mut env = default_environment().with("who", "you");
        let list = run_with(&mut parser, "hi $who @who", &mut env).unwrap();
        assert_eq!(list.render(), "hi you @who");
    }

    #[test]
    fn test_errors_are_located() {
        let err = run_simple_default("line\n@missing").unwrap_err();
        assert_eq!(err.message(), "unknown phrase `missing`");
        assert_eq!(err.to_string(), "render error: unknown phrase `missing` at line 2, col 1");
    }
}
