//! Property bags with an explicit "absent" marker.
//!
//! Construct wrappers map optional user-facing settings straight onto wire
//! fields, so a property bag routinely carries slots that were never filled
//! in. [`PropertyValue::Absent`] marks such a slot. It is distinct from
//! [`PropertyValue::Null`], which the user set on purpose and which survives
//! cleaning. The transformer strips every `Absent` before a record is built,
//! so canonical records only ever hold plain [`serde_json::Value`]s.

use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// A property value as produced by the construct layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PropertyValue {
    /// Slot not provided; removed during cleaning.
    #[default]
    Absent,
    /// Explicit null; always preserved.
    Null,
    /// Boolean
    Bool(bool),
    /// Number
    Number(Number),
    /// String
    String(String),
    /// Array, cleaned element-wise
    Array(Vec<PropertyValue>),
    /// Object with deterministic key order
    Object(BTreeMap<String, PropertyValue>),
}

impl PropertyValue {
    /// An empty object, the usual starting point for a property bag.
    #[must_use]
    pub fn object() -> Self {
        Self::Object(BTreeMap::new())
    }

    /// Build an object from key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<PropertyValue>,
    {
        Self::Object(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Insert a key, returning the updated object.
    ///
    /// Calling this on anything other than an object replaces the value with
    /// a single-entry object.
    #[must_use]
    pub fn with(self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        let mut map = match self {
            Self::Object(map) => map,
            _ => BTreeMap::new(),
        };
        map.insert(key.into(), value.into());
        Self::Object(map)
    }

    /// Whether this slot is unset.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Look up a key on an object value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        match self {
            Self::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Recursively strip absent values.
    ///
    /// Returns `None` when the value itself is absent, or when it is an
    /// object or array that only became empty because everything inside it
    /// was absent. Containers that were empty to begin with are kept, and
    /// explicit nulls are kept everywhere, including as array elements.
    #[must_use]
    pub fn clean(&self) -> Option<Value> {
        match self {
            Self::Absent => None,
            Self::Null => Some(Value::Null),
            Self::Bool(b) => Some(Value::Bool(*b)),
            Self::Number(n) => Some(Value::Number(n.clone())),
            Self::String(s) => Some(Value::String(s.clone())),
            Self::Array(items) => {
                let cleaned: Vec<Value> = items.iter().filter_map(PropertyValue::clean).collect();
                if cleaned.is_empty() && !items.is_empty() {
                    None
                } else {
                    Some(Value::Array(cleaned))
                }
            }
            Self::Object(map) => {
                let cleaned: Map<String, Value> = map
                    .iter()
                    .filter_map(|(k, v)| v.clean().map(|v| (k.clone(), v)))
                    .collect();
                if cleaned.is_empty() && !map.is_empty() {
                    None
                } else {
                    Some(Value::Object(cleaned))
                }
            }
        }
    }
}

impl From<Value> for PropertyValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u32> for PropertyValue {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(value: Vec<PropertyValue>) -> Self {
        Self::Array(value)
    }
}

/// `None` maps to [`PropertyValue::Absent`], which is how wrappers pass
/// through optional settings the user never supplied.
impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}
