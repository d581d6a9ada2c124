//! Default phrase evaluator
//!
//! Lookup order for a phrase:
//!
//! 1. the `_extras_` map, when the environment has one
//! 2. the environment itself
//! 3. for a single symbol character, the `_symbols_` map; without one, `@` stands for a literal
//!    `@` and `!` for nothing
//! 4. the phrase read as a JSON literal (`true`, `3.5`, `"text"`, `[1, 2]`, ...)
//!
//! The empty phrase, as in `@||`, always evaluates to `None`.

use super::environment::{Environment, EXTRAS_KEY, SYMBOLS_KEY};
use super::value::{CallResult, Value};
use crate::paxter::lexing::character_classes::is_symbol_char;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhraseError {
    #[error("unknown phrase `{0}`")]
    UnknownPhrase(String),

    #[error("unknown symbol `{0}`")]
    UnknownSymbol(String),
}

pub fn default_phrase_eval(phrase: &str, env: &Environment) -> CallResult {
    if phrase.is_empty() {
        return Ok(Value::None);
    }

    if let Some(value) = env
        .get(EXTRAS_KEY)
        .and_then(Value::as_map)
        .and_then(|extras| extras.get(phrase))
    {
        return Ok(value.clone());
    }

    if let Some(value) = env.get(phrase) {
        return Ok(value.clone());
    }

    if let Some(symbol) = single_symbol(phrase) {
        return match env.get(SYMBOLS_KEY) {
            Some(symbols) => symbols
                .as_map()
                .and_then(|symbols| symbols.get(phrase))
                .cloned()
                .ok_or_else(|| PhraseError::UnknownSymbol(phrase.to_string()).into()),
            None => match symbol {
                '@' => Ok(Value::from("@")),
                '!' => Ok(Value::from("")),
                _ => Err(PhraseError::UnknownSymbol(phrase.to_string()).into()),
            },
        };
    }

    serde_json::from_str::<serde_json::Value>(phrase)
        .map(Value::from)
        .map_err(|_| PhraseError::UnknownPhrase(phrase.to_string()).into())
}

fn single_symbol(phrase: &str) -> Option<char> {
    let mut chars = phrase.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if is_symbol_char(ch) => Some(ch),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn eval(phrase: &str, env: &Environment) -> Result<Value, String> {
        default_phrase_eval(phrase, env).map_err(|err| err.to_string())
    }

    #[test]
    fn test_extras_shadow_environment() {
        let mut extras = BTreeMap::new();
        extras.insert("name".to_string(), Value::from("extra"));
        let env = Environment::new()
            .with("name", "plain")
            .with(EXTRAS_KEY, extras);
        assert_eq!(eval("name", &env), Ok(Value::from("extra")));

        let env = Environment::new().with("name", "plain");
        assert_eq!(eval("name", &env), Ok(Value::from("plain")));
    }

    #[test]
    fn test_symbol_fallbacks() {
        let env = Environment::new();
        assert_eq!(eval("@", &env), Ok(Value::from("@")));
        assert_eq!(eval("!", &env), Ok(Value::from("")));
        assert_eq!(eval("%", &env), Err("unknown symbol `%`".to_string()));
    }

    #[test]
    fn test_symbols_map_disables_fallbacks() {
        let mut symbols = BTreeMap::new();
        symbols.insert("%".to_string(), Value::from("percent"));
        let env = Environment::new().with(SYMBOLS_KEY, symbols);
        assert_eq!(eval("%", &env), Ok(Value::from("percent")));
        assert!(eval("@", &env).is_err());
    }

    #[test]
    fn test_json_literals() {
        let env = Environment::new();
        assert_eq!(eval("true", &env), Ok(Value::Bool(true)));
        assert_eq!(eval("null", &env), Ok(Value::None));
        assert_eq!(eval("-2.5", &env), Ok(Value::Float(-2.5)));
        assert_eq!(eval(r#""quoted""#, &env), Ok(Value::from("quoted")));
        assert_eq!(
            eval("[1, 2]", &env),
            Ok(Value::List(vec![Value::Int(1), Value::Int(2)]))
        );
    }

    #[test]
    fn test_unknown_phrase() {
        let env = Environment::new();
        assert_eq!(eval("nope", &env), Err("unknown phrase `nope`".to_string()));
        assert_eq!(eval("", &env), Ok(Value::None));
    }
}
