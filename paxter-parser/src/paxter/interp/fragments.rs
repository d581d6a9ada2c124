//! Fragment lists, the result of interpreting a fragment sequence

use super::value::Value;
use std::fmt;

/// Interpreted children of a fragment sequence, `None` results already dropped
///
/// A list may hold further lists (a command whose main argument is a fragment sequence usually
/// returns one). [`flatten`](Self::flatten) walks them depth first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FragmentList(Vec<Value>);

impl FragmentList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: Value) {
        self.0.push(value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn items(&self) -> &[Value] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }

    /// Every non-list value, depth first, skipping `None` at the top level.
    pub fn flatten(&self) -> Vec<Value> {
        let mut out = Vec::new();
        for item in &self.0 {
            match item {
                Value::None => {}
                Value::Fragments(inner) => inner.flatten_into(&mut out),
                other => out.push(other.clone()),
            }
        }
        out
    }

    fn flatten_into(&self, out: &mut Vec<Value>) {
        for item in &self.0 {
            match item {
                Value::Fragments(inner) => inner.flatten_into(out),
                other => out.push(other.clone()),
            }
        }
    }

    /// Concatenation of the flattened values.
    pub fn render(&self) -> String {
        self.flatten().iter().map(Value::to_string).collect()
    }
}

impl fmt::Display for FragmentList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<Vec<Value>> for FragmentList {
    fn from(items: Vec<Value>) -> Self {
        Self(items)
    }
}

impl FromIterator<Value> for FragmentList {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for FragmentList {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FragmentList {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_is_depth_first() {
        let inner: FragmentList = vec![Value::Int(1), Value::from("-")].into();
        let deeper: FragmentList = vec![Value::Fragments(vec![Value::from("x")].into())].into();
        let list: FragmentList = vec![
            Value::from("a"),
            Value::Fragments(inner),
            Value::None,
            Value::Fragments(deeper),
        ]
        .into();
        assert_eq!(
            list.flatten(),
            [Value::from("a"), Value::Int(1), Value::from("-"), Value::from("x")]
        );
        assert_eq!(list.render(), "a1-x");
    }

    #[test]
    fn test_empty_list_renders_empty() {
        assert_eq!(FragmentList::new().to_string(), "");
        assert!(FragmentList::new().flatten().is_empty());
    }
}
