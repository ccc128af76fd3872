//! Raw and validated request input

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// A query-string value: one occurrence or a repeated key
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    Single(String),
    Multiple(Vec<String>),
}

impl RawValue {
    /// The single value, `Ok(None)` for an empty list, `Err` for several values
    pub fn single(&self) -> Result<Option<&str>, usize> {
        match self {
            Self::Single(s) => Ok(Some(s)),
            Self::Multiple(values) => match values.as_slice() {
                [] => Ok(None),
                [value] => Ok(Some(value)),
                _ => Err(values.len()),
            },
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::Single(s) => vec![s],
            Self::Multiple(v) => v,
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Single(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        Self::Single(s)
    }
}

impl From<Vec<String>> for RawValue {
    fn from(v: Vec<String>) -> Self {
        Self::Multiple(v)
    }
}

/// Raw query parameters as they arrive from a URL query string
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RawQuery(HashMap<String, RawValue>);

impl RawQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect `key=value` pairs, turning repeated keys into a list
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut query = Self::new();
        for (key, value) in pairs {
            query.append(key, value);
        }
        query
    }

    /// Add one occurrence of a key
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        match self.0.entry(key.into()) {
            Entry::Vacant(entry) => {
                entry.insert(RawValue::Single(value));
            }
            Entry::Occupied(mut entry) => match entry.get_mut() {
                RawValue::Single(first) => {
                    let first = std::mem::take(first);
                    entry.insert(RawValue::Multiple(vec![first, value]));
                }
                RawValue::Multiple(values) => values.push(value),
            },
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawQuery
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}

/// Validated, type-coerced filter input keyed by input field name.
///
/// A field that is not in the bag was not supplied.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct FilterInput(HashMap<String, Value>);

impl FilterInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
