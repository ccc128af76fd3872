//! Filter declarations
//!
//! A [`FiltersMap`] allow-lists operators per column. It is usually built in
//! code next to the endpoint, but can also be loaded from JSON:
//!
//! ```
//! use column_filters::FiltersMap;
//!
//! let filters = FiltersMap::from_json(r#"{"age": ["between"], "name": ["contains", "eq"]}"#).unwrap();
//! assert_eq!(filters.operators("name"), ["contains", "eq"]);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Maximum size of a filters-map JSON document in bytes (64KB)
const MAX_FILTERS_JSON_SIZE: usize = 64 * 1024;

/// Maximum number of operators a filters map may declare in total
const MAX_DECLARED_OPERATORS: usize = 256;

/// Column name → requested operator names
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct FiltersMap(HashMap<String, Vec<String>>);

impl FiltersMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with<I, S>(mut self, column: impl Into<String>, operators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(column, operators);
        self
    }

    /// Declare operators for a column, appending to any already declared.
    /// Repeated operator names are kept once, at their first position.
    pub fn insert<I, S>(&mut self, column: impl Into<String>, operators: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let declared = self.0.entry(column.into()).or_default();
        for op in operators {
            let op = op.into();
            if !declared.contains(&op) {
                declared.push(op);
            }
        }
    }

    /// Operators declared for a column, empty when the column is not declared
    pub fn operators(&self, column: &str) -> &[String] {
        self.0.get(column).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Declared column names, sorted
    pub fn columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = self.0.keys().map(String::as_str).collect();
        columns.sort_unstable();
        columns
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a filters map from JSON (`{"column": ["op", ...]}`)
    ///
    /// Validates document size and the total number of declared operators.
    pub fn from_json(json_str: &str) -> Result<Self, FilterError> {
        if json_str.len() > MAX_FILTERS_JSON_SIZE {
            return Err(FilterError::InvalidConfig(format!(
                "Filters JSON exceeds maximum size of {} bytes",
                MAX_FILTERS_JSON_SIZE
            )));
        }

        let filters: Self = serde_json::from_str(json_str)
            .map_err(|e| FilterError::InvalidConfig(e.to_string()))?;

        let declared: usize = filters.0.values().map(Vec::len).sum();
        if declared > MAX_DECLARED_OPERATORS {
            return Err(FilterError::InvalidConfig(format!(
                "Maximum {} filter operators allowed",
                MAX_DECLARED_OPERATORS
            )));
        }

        Ok(filters)
    }
}

impl<K, V, I> FromIterator<(K, I)> for FiltersMap
where
    K: Into<String>,
    I: IntoIterator<Item = V>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut filters = Self::new();
        for (column, operators) in iter {
            filters.insert(column, operators);
        }
        filters
    }
}

/// Options controlling how declarations are checked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterOptions {
    /// Reject unknown columns, unknown or unsupported operators, and duplicate
    /// fields instead of ignoring them
    pub strict: bool,
}

impl FilterOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}
