//! Runtime values
//!
//!     Everything the interpreter produces, and everything an environment can hold, is a
//!     [`Value`]. Plain data (strings, numbers, lists, maps) sits next to the callables that
//!     give commands their meaning:
//!
//!         Function           a native function, called through Normal Apply
//!         Wrapper            a function already bound to a call-wrapper variant
//!         PhraseEvaluator    the hook resolving phrases into values
//!
//!     Callables are reference counted closures: cloning a value never clones the code, and
//!     two callables are equal only when they are the same closure.

use super::environment::Environment;
use super::fragments::FragmentList;
use super::interpreter::Interpreter;
use super::wrappers::CallWrapper;
use crate::paxter::ast::{Command, NumberValue};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::rc::Rc;

/// What user callables return. Any error type is accepted; the interpreter pins it to the
/// command that raised it.
pub type CallResult = Result<Value, Box<dyn Error>>;

/// A function receiving its interpreted arguments
pub type NativeFn = Rc<dyn Fn(Arguments) -> CallResult>;

/// A function receiving the environment before its interpreted arguments
pub type NativeEnvFn = Rc<dyn Fn(&mut Environment, Arguments) -> CallResult>;

/// A function receiving the interpreter and the raw command
pub type DirectFn = Rc<dyn Fn(&mut Interpreter<'_>, &Command) -> CallResult>;

/// A function turning a phrase into a value
pub type PhraseEvalFn = Rc<dyn Fn(&str, &Environment) -> CallResult>;

#[derive(Clone, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Fragments(FragmentList),
    Function(NativeFn),
    Wrapper(CallWrapper),
    PhraseEvaluator(PhraseEvalFn),
}

impl Value {
    pub fn function(f: impl Fn(Arguments) -> CallResult + 'static) -> Self {
        Value::Function(Rc::new(f))
    }

    pub fn phrase_evaluator(f: impl Fn(&str, &Environment) -> CallResult + 'static) -> Self {
        Value::PhraseEvaluator(Rc::new(f))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Falsy values are `None`, `false`, zero and empty containers; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(value) => *value,
            Value::Int(value) => *value != 0,
            Value::Float(value) => *value != 0.0,
            Value::Str(value) => !value.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Map(entries) => !entries.is_empty(),
            Value::Fragments(list) => !list.is_empty(),
            Value::Function(_) | Value::Wrapper(_) | Value::PhraseEvaluator(_) => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Int(value) => Some(*value as f64),
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Fragments(_) => "fragments",
            Value::Function(_) => "function",
            Value::Wrapper(_) => "call-wrapper",
            Value::PhraseEvaluator(_) => "phrase evaluator",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Fragments(a), Value::Fragments(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Wrapper(a), Value::Wrapper(b)) => a == b,
            (Value::PhraseEvaluator(a), Value::PhraseEvaluator(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(value) => write!(f, "Bool({value})"),
            Value::Int(value) => write!(f, "Int({value})"),
            Value::Float(value) => write!(f, "Float({value})"),
            Value::Str(value) => write!(f, "Str({value:?})"),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            Value::Fragments(list) => f.debug_tuple("Fragments").field(list).finish(),
            Value::Function(_) => write!(f, "Function(..)"),
            Value::Wrapper(wrapper) => write!(f, "Wrapper({wrapper:?})"),
            Value::PhraseEvaluator(_) => write!(f, "PhraseEvaluator(..)"),
        }
    }
}

/// How values end up in rendered output
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => Ok(()),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::Str(value) => f.write_str(value),
            Value::List(items) => {
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Value::Fragments(list) => write!(f, "{list}"),
            Value::Function(_) => f.write_str("<function>"),
            Value::Wrapper(wrapper) => write!(f, "<{} call-wrapper>", wrapper.kind()),
            Value::PhraseEvaluator(_) => f.write_str("<phrase evaluator>"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Value::Map(entries)
    }
}

impl From<FragmentList> for Value {
    fn from(list: FragmentList) -> Self {
        Value::Fragments(list)
    }
}

impl From<CallWrapper> for Value {
    fn from(wrapper: CallWrapper) -> Self {
        Value::Wrapper(wrapper)
    }
}

impl From<NumberValue> for Value {
    fn from(number: NumberValue) -> Self {
        match number {
            NumberValue::Int(value) => Value::Int(value),
            NumberValue::Float(value) => Value::Float(value),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::None,
            serde_json::Value::Bool(value) => Value::Bool(value),
            serde_json::Value::Number(number) => match number.as_i64() {
                Some(value) => Value::Int(value),
                None => Value::Float(number.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(value) => Value::Str(value),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Arguments handed to a function by Normal Apply
///
/// The main argument, when present, is the first positional argument. Keywords keep the order
/// they were written in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    pub positional: Vec<Value>,
    pub keywords: Vec<(String, Value)>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    pub fn keyword(&self, name: &str) -> Option<&Value> {
        self.keywords
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn has_keyword(&self, name: &str) -> bool {
        self.keyword(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.positional.len() + self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
