//! Predicate builder
//!
//! Turns validated input into predicates for every declared filter whose
//! input fields are present.
//!
//! Presence rules:
//! - text values count only when non-empty
//! - numbers and booleans count whenever supplied, so `0` and `false` filter
//! - `between` needs both bounds; a single bound is skipped
//! - temporal text is parsed here, and a parse failure aborts the build

use chrono::{DateTime, Utc};

use crate::column::{Column, SemanticType};
use crate::config::{FilterOptions, FiltersMap};
use crate::error::FilterError;
use crate::input::FilterInput;
use crate::operator::Operator;
use crate::plan::{FieldNames, ResolvedFilter, resolve};
use crate::predicate::{Comparison, Predicate, TextMatch};
use crate::time::parse_iso_datetime;
use crate::value::Value;

/// Build predicates for `input`, in column then operator order.
pub fn build(
    columns: &[Column],
    filters: &FiltersMap,
    input: &FilterInput,
) -> Result<Vec<Predicate>, FilterError> {
    let resolved = resolve(columns, filters, FilterOptions::default())?;
    build_resolved(&resolved, input)
}

pub(crate) fn build_resolved(
    resolved: &[ResolvedFilter],
    input: &FilterInput,
) -> Result<Vec<Predicate>, FilterError> {
    let mut predicates = Vec::new();
    for filter in resolved {
        if let Some(predicate) = build_one(filter, input)? {
            predicates.push(predicate);
        }
    }
    tracing::trace!(
        declared = resolved.len(),
        built = predicates.len(),
        "Built filter predicates"
    );
    Ok(predicates)
}

fn build_one(filter: &ResolvedFilter, input: &FilterInput) -> Result<Option<Predicate>, FilterError> {
    let column = filter.column.as_str();
    match &filter.fields {
        FieldNames::Single(field) => {
            let Some(value) = field_value(input, field, filter.semantic_type)? else {
                return Ok(None);
            };
            Ok(single_predicate(column, filter.operator, value))
        }
        FieldNames::Range { low, high } => {
            let low = field_value(input, low, filter.semantic_type)?;
            let high = field_value(input, high, filter.semantic_type)?;
            match (low, high) {
                (Some(low), Some(high)) => Ok(Some(Predicate::between(column, low, high))),
                _ => Ok(None),
            }
        }
    }
}

/// Predicate for an operator bound to a single field
fn single_predicate(column: &str, operator: Operator, value: Value) -> Option<Predicate> {
    let compare = |op| Some(Predicate::compare(column, op, value.clone()));
    let like = |mode| {
        value
            .as_text()
            .map(|needle| Predicate::like(column, mode, needle))
    };

    match operator {
        Operator::Eq => compare(Comparison::Eq),
        Operator::Gt => compare(Comparison::Gt),
        Operator::Gte => compare(Comparison::Gte),
        Operator::Lt => compare(Comparison::Lt),
        Operator::Lte => compare(Comparison::Lte),
        Operator::Contains => like(TextMatch::Contains),
        Operator::StartsWith => like(TextMatch::StartsWith),
        Operator::EndsWith => like(TextMatch::EndsWith),
        Operator::Between => None,
    }
}

/// Read a field as the column's semantic type.
///
/// `Ok(None)` when absent or, for bags built without validation, when the
/// value has the wrong type.
fn field_value(
    input: &FilterInput,
    field: &str,
    semantic_type: SemanticType,
) -> Result<Option<Value>, FilterError> {
    let Some(value) = input.get(field) else {
        return Ok(None);
    };

    let coerced = match (semantic_type, value) {
        (SemanticType::String, Value::Text(s)) if s.is_empty() => None,
        (SemanticType::String, Value::Text(s)) => Some(Value::Text(s.clone())),
        (SemanticType::Number, Value::Number(n)) => Some(Value::Number(*n)),
        (SemanticType::Boolean, Value::Bool(b)) => Some(Value::Bool(*b)),
        (SemanticType::Temporal, Value::Timestamp(ts)) => Some(Value::Timestamp(*ts)),
        (SemanticType::Temporal, Value::Text(s)) if s.is_empty() => None,
        (SemanticType::Temporal, Value::Text(s)) => {
            Some(Value::Timestamp(parse_temporal(field, s)?))
        }
        (SemanticType::Number | SemanticType::Boolean, Value::Text(s)) if s.is_empty() => None,
        (_, other) => {
            tracing::debug!(
                field,
                %semantic_type,
                value_type = other.type_name(),
                "Skipping filter field with mismatched value type"
            );
            None
        }
    };
    Ok(coerced)
}

fn parse_temporal(field: &str, s: &str) -> Result<DateTime<Utc>, FilterError> {
    parse_iso_datetime(s).ok_or_else(|| FilterError::invalid_timestamp(field, s))
}
