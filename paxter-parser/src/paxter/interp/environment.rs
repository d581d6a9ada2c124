//! Interpretation environment
//!
//! A mutable map from names to values, shared by reference across a whole interpretation.
//! Control-flow wrappers bind loop variables into it, user functions may read and write it.
//! A few keys are reserved for configuration:
//!
//! - `_phrase_eval_`: the hook turning a phrase into a value
//! - `_extras_`: a map consulted by the default phrase evaluator before the environment itself
//! - `_symbols_`: a map giving single-symbol commands their value

use super::value::{PhraseEvalFn, Value};
use std::collections::HashMap;
use std::rc::Rc;

pub const PHRASE_EVAL_KEY: &str = "_phrase_eval_";
pub const EXTRAS_KEY: &str = "_extras_";
pub const SYMBOLS_KEY: &str = "_symbols_";

#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.vars.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Bind `name`, returning the value it was bound to before.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.vars.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.vars.remove(name)
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// The configured phrase evaluator, if `_phrase_eval_` holds one.
    pub fn phrase_evaluator(&self) -> Option<PhraseEvalFn> {
        match self.get(PHRASE_EVAL_KEY) {
            Some(Value::PhraseEvaluator(f)) => Some(Rc::clone(f)),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = Environment::new();
        for (name, value) in iter {
            env.insert(name, value);
        }
        env
    }
}
