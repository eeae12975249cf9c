//! Dynamic property value type.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A bucket property value in its application-facing form.
///
/// Quorums are either counts or names, hooks are either names or
/// `{mod, fun}` records, and so on; this type carries all of those shapes.
/// `Symbol` is an alternative spelling of `Text` accepted on input wherever
/// a name is expected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    /// Boolean value.
    Bool(bool),
    /// Signed integer.
    Integer(i64),
    /// Text string.
    Text(String),
    /// Symbol-like token; serialized as a plain string.
    Symbol(String),
    /// Ordered sequence of values.
    List(Vec<PropValue>),
    /// String-keyed record.
    Record(BTreeMap<String, PropValue>),
}

impl PropValue {
    /// Creates a symbol token.
    pub fn symbol(name: impl Into<String>) -> Self {
        PropValue::Symbol(name.into())
    }

    /// Creates a record from key/value pairs.
    pub fn record<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<PropValue>,
    {
        PropValue::Record(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Creates a `{mod, fun}` record.
    pub fn modfun(module: impl Into<String>, function: impl Into<String>) -> Self {
        Self::record([
            ("mod", PropValue::Text(module.into())),
            ("fun", PropValue::Text(function.into())),
        ])
    }

    /// Get this value as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get this value as an integer, if it is one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Get this value as a string, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as a name: text or symbol.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) | PropValue::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as a list, if it is one.
    pub fn as_list(&self) -> Option<&[PropValue]> {
        match self {
            PropValue::List(l) => Some(l),
            _ => None,
        }
    }

    /// Get this value as a record, if it is one.
    pub fn as_record(&self) -> Option<&BTreeMap<String, PropValue>> {
        match self {
            PropValue::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Look up a key in this record value.
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.as_record().and_then(|r| r.get(key))
    }

    /// Short description of the value's shape, for error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            PropValue::Bool(_) => "bool",
            PropValue::Integer(_) => "integer",
            PropValue::Text(_) => "text",
            PropValue::Symbol(_) => "symbol",
            PropValue::List(_) => "list",
            PropValue::Record(_) => "record",
        }
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

impl From<i64> for PropValue {
    fn from(n: i64) -> Self {
        PropValue::Integer(n)
    }
}

impl From<i32> for PropValue {
    fn from(n: i32) -> Self {
        PropValue::Integer(i64::from(n))
    }
}

impl From<u32> for PropValue {
    fn from(n: u32) -> Self {
        PropValue::Integer(i64::from(n))
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::Text(s)
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Text(s.to_string())
    }
}

impl<T: Into<PropValue>> From<Vec<T>> for PropValue {
    fn from(v: Vec<T>) -> Self {
        PropValue::List(v.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, PropValue>> for PropValue {
    fn from(r: BTreeMap<String, PropValue>) -> Self {
        PropValue::Record(r)
    }
}
