use core::fmt;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Result of a symbol, rule or transform.
///
/// Patterns and literals produce `String`, quantified references produce `List`,
/// lookahead placeholders are `Null`. Transforms may return anything.
#[derive(Clone, Debug, PartialEq, Default, Deserialize, Serialize)]
pub enum Value {
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    List(Vec<Value>),
    Map(HashMap<String, Value>),
    #[default]
    Null,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Null => write!(f, "null"),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Flattens the value into text: lists are concatenated, `Null` is empty.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) {
        match self {
            Value::String(s) => out.push_str(s),
            Value::List(items) => items.iter().for_each(|item| item.write_text(out)),
            Value::Null => {}
            other => out.push_str(&other.to_string()),
        }
    }

    /// Parses the flattened text as an integer.
    pub fn to_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            other => other.text().trim().parse().ok(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::String(c.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_flattens_lists() {
        let value = Value::List(vec![
            Value::from("1"),
            Value::List(vec![Value::from("2"), Value::Null]),
            Value::Integer(3),
        ]);
        assert_eq!(value.text(), "123");
        assert_eq!(value.to_integer(), Some(123));
    }

    #[test]
    fn test_empty_string_is_not_null() {
        let empty = Value::from("");
        assert!(!empty.is_null());
        assert_eq!(empty.as_str(), Some(""));
        assert_eq!(empty.to_integer(), None);
    }

    #[test]
    fn test_value_serde() {
        let value = Value::List(vec![Value::Integer(1), Value::from("a"), Value::Null]);
        let json = serde_json::to_string(&value).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, back);
    }
}
