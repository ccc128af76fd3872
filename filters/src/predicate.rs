//! Predicates and their conjunction
//!
//! A [`Predicate`] is a condition over one column and one or two literals.
//! [`WhereClause`] is the AND of zero or more predicates; with none it is
//! [`WhereClause::Unrestricted`], which renders no SQL at all and matches
//! every row.

use std::cmp::Ordering;

use serde::Serialize;

use crate::sql::{SqlParams, escape_like_pattern};
use crate::time::parse_iso_datetime;
use crate::value::{Row, Value};

/// Ordering comparison against one literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Comparison {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
        }
    }

    fn holds(&self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering == Ordering::Equal,
            Self::Gt => ordering == Ordering::Greater,
            Self::Gte => ordering != Ordering::Less,
            Self::Lt => ordering == Ordering::Less,
            Self::Lte => ordering != Ordering::Greater,
        }
    }
}

/// Case-insensitive text match position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextMatch {
    Contains,
    StartsWith,
    EndsWith,
}

impl TextMatch {
    /// LIKE pattern with wildcards on the open side(s)
    fn pattern(&self, needle: &str) -> String {
        let escaped = escape_like_pattern(needle);
        match self {
            Self::Contains => format!("%{}%", escaped),
            Self::StartsWith => format!("{}%", escaped),
            Self::EndsWith => format!("%{}", escaped),
        }
    }

    fn matches(&self, haystack: &str, needle: &str) -> bool {
        let haystack = haystack.to_lowercase();
        match self {
            Self::Contains => haystack.contains(needle),
            Self::StartsWith => haystack.starts_with(needle),
            Self::EndsWith => haystack.ends_with(needle),
        }
    }
}

/// A single filter condition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    /// `column <op> value`
    Compare {
        column: String,
        op: Comparison,
        value: Value,
    },
    /// Case-insensitive substring, prefix, or suffix match
    Like {
        column: String,
        mode: TextMatch,
        needle: String,
    },
    /// Inclusive range, bounds kept as given
    Between {
        column: String,
        low: Value,
        high: Value,
    },
}

impl Predicate {
    pub fn compare(column: impl Into<String>, op: Comparison, value: impl Into<Value>) -> Self {
        Self::Compare {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    pub fn like(column: impl Into<String>, mode: TextMatch, needle: impl Into<String>) -> Self {
        Self::Like {
            column: column.into(),
            mode,
            needle: needle.into(),
        }
    }

    pub fn between(
        column: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Self {
        Self::Between {
            column: column.into(),
            low: low.into(),
            high: high.into(),
        }
    }

    pub fn column(&self) -> &str {
        match self {
            Self::Compare { column, .. } => column,
            Self::Like { column, .. } => column,
            Self::Between { column, .. } => column,
        }
    }

    /// Evaluate against a row. Missing or null columns never match.
    pub fn matches<R: Row + ?Sized>(&self, row: &R) -> bool {
        let Some(actual) = row.get(self.column()) else {
            return false;
        };
        match self {
            Self::Compare { op, value, .. } => {
                compare_values(actual, value).is_some_and(|ord| op.holds(ord))
            }
            Self::Like { mode, needle, .. } => actual
                .as_text()
                .is_some_and(|text| mode.matches(text, &needle.to_lowercase())),
            Self::Between { low, high, .. } => {
                compare_values(actual, low).is_some_and(|ord| ord != Ordering::Less)
                    && compare_values(actual, high).is_some_and(|ord| ord != Ordering::Greater)
            }
        }
    }

    /// Generate SQL WHERE clause fragment
    /// Returns the SQL clause with ? placeholders and updates params
    pub fn to_sql(&self, params: &mut SqlParams) -> String {
        self.to_sql_aliased(params, |col| col, "")
    }

    /// Generate SQL WHERE clause fragment with column name mapping and table alias
    ///
    /// The alias is prepended to column names (e.g., "t" → "t.column_name").
    /// Pass empty string for no alias.
    pub fn to_sql_aliased<F>(&self, params: &mut SqlParams, mapper: F, alias: &str) -> String
    where
        F: Fn(&str) -> &str,
    {
        let mapped = mapper(self.column());
        let col = if alias.is_empty() {
            mapped.to_string()
        } else {
            format!("{}.{}", alias, mapped)
        };

        match self {
            Self::Compare {
                op,
                value: Value::Bool(b),
                ..
            } => {
                let sql_bool = if *b { "TRUE" } else { "FALSE" };
                format!("{} {} {}", col, op.as_sql(), sql_bool)
            }
            Self::Compare { op, value, .. } => {
                params.push(value.clone());
                format!("{} {} ?", col, op.as_sql())
            }
            Self::Like { mode, needle, .. } => {
                params.push(mode.pattern(&needle.to_lowercase()));
                format!("LOWER({}) LIKE ? ESCAPE '\\'", col)
            }
            Self::Between { low, high, .. } => {
                params.push(low.clone());
                params.push(high.clone());
                format!("{} BETWEEN ? AND ?", col)
            }
        }
    }
}

/// Order two values of compatible types.
///
/// Text stored in a row is compared against a timestamp literal by parsing it
/// as ISO 8601.
fn compare_values(actual: &Value, expected: &Value) -> Option<Ordering> {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
        (Value::Text(a), Value::Timestamp(b)) => parse_iso_datetime(a).map(|a| a.cmp(b)),
        _ => None,
    }
}

/// Conjunction of predicates
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "kind", content = "predicates", rename_all = "snake_case")]
pub enum WhereClause {
    /// No filtering applies
    #[default]
    Unrestricted,
    /// Every predicate must hold
    All(Vec<Predicate>),
}

/// AND predicates together, preserving order.
pub fn combine(predicates: Vec<Predicate>) -> WhereClause {
    if predicates.is_empty() {
        WhereClause::Unrestricted
    } else {
        WhereClause::All(predicates)
    }
}

impl WhereClause {
    /// True when no predicate applies, including an explicitly empty `All`
    pub fn is_unrestricted(&self) -> bool {
        self.predicates().is_empty()
    }

    pub fn predicates(&self) -> &[Predicate] {
        match self {
            Self::Unrestricted => &[],
            Self::All(predicates) => predicates,
        }
    }

    pub fn matches<R: Row + ?Sized>(&self, row: &R) -> bool {
        self.predicates().iter().all(|p| p.matches(row))
    }

    /// Keep only the rows the clause matches
    pub fn filter_rows<'r, R: Row>(&self, rows: &'r [R]) -> Vec<&'r R> {
        rows.iter().filter(|row| self.matches(*row)).collect()
    }

    /// SQL condition for a WHERE clause, `None` when no predicate applies
    pub fn to_sql(&self, params: &mut SqlParams) -> Option<String> {
        self.to_sql_aliased(params, |col| col, "")
    }

    /// Like [`to_sql`](Self::to_sql) with column mapping and table alias
    pub fn to_sql_aliased<F>(
        &self,
        params: &mut SqlParams,
        mapper: F,
        alias: &str,
    ) -> Option<String>
    where
        F: Fn(&str) -> &str,
    {
        let predicates = self.predicates();
        if predicates.is_empty() {
            return None;
        }
        Some(
            predicates
                .iter()
                .map(|p| p.to_sql_aliased(params, &mapper, alias))
                .collect::<Vec<_>>()
                .join(" AND "),
        )
    }
}

impl From<Vec<Predicate>> for WhereClause {
    fn from(predicates: Vec<Predicate>) -> Self {
        combine(predicates)
    }
}
