//! Validation schema synthesized from a filters map
//!
//! Every active (column, operator) pair contributes one or two optional input
//! fields. Numbers and booleans are coerced from query-string text during
//! validation; temporal fields stay text and are parsed when predicates are
//! built.

use serde::Serialize;

use crate::column::{Column, SemanticType};
use crate::config::{FilterOptions, FiltersMap};
use crate::error::{ValidationErrors, field_error};
use crate::input::{FilterInput, RawQuery};
use crate::operator::Operator;
use crate::plan::{ResolvedFilter, resolve};
use crate::value::Value;

/// Primitive shape an input field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldShape {
    /// Any string, kept as text
    Text,
    /// Text coerced to a finite number
    Number,
    /// Text coerced to a boolean
    Boolean,
}

impl FieldShape {
    fn for_type(semantic_type: SemanticType) -> Self {
        match semantic_type {
            SemanticType::String | SemanticType::Temporal => Self::Text,
            SemanticType::Number => Self::Number,
            SemanticType::Boolean => Self::Boolean,
        }
    }
}

/// One optional input field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: String,
    pub column: String,
    pub operator: Operator,
    pub shape: FieldShape,
}

/// The set of accepted input fields for one filters map
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterSchema {
    fields: Vec<FieldSpec>,
}

/// Synthesize the validation schema for `columns` and `filters`.
///
/// Unknown columns and operators that are unknown or not valid for the
/// column's type produce no fields.
pub fn synthesize(columns: &[Column], filters: &FiltersMap) -> FilterSchema {
    // permissive resolution has no error path
    let resolved = resolve(columns, filters, FilterOptions::default()).unwrap_or_default();
    FilterSchema::from_resolved(&resolved)
}

impl FilterSchema {
    pub(crate) fn from_resolved(resolved: &[ResolvedFilter]) -> Self {
        let fields = resolved
            .iter()
            .flat_map(|filter| {
                let shape = FieldShape::for_type(filter.semantic_type);
                filter
                    .fields
                    .names()
                    .into_iter()
                    .map(move |name| FieldSpec {
                        name: name.to_string(),
                        column: filter.column.clone(),
                        operator: filter.operator,
                        shape,
                    })
            })
            .collect();
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate raw query parameters against the schema.
    ///
    /// Keys the schema does not declare are ignored. All field errors are
    /// collected before returning.
    pub fn parse(&self, raw: &RawQuery) -> Result<FilterInput, ValidationErrors> {
        let mut input = FilterInput::new();
        let mut errors = ValidationErrors::new();

        for field in &self.fields {
            let Some(raw_value) = raw.get(&field.name) else {
                continue;
            };

            let text = match raw_value.single() {
                Ok(Some(text)) => text,
                Ok(None) => continue,
                Err(count) => {
                    errors.add(
                        &field.name,
                        field_error(
                            "multiple_values",
                            format!("{} accepts a single value, got {}", field.name, count),
                            &raw_value.clone().into_vec().join(","),
                        ),
                    );
                    continue;
                }
            };

            match coerce(field, text) {
                Ok(Some(value)) => input.insert(&field.name, value),
                Ok(None) => {}
                Err(error) => errors.add(&field.name, error),
            }
        }

        errors.into_result(input)
    }
}

/// Coerce one text value to the field's shape. Empty text for a coerced
/// field means "not supplied".
fn coerce(field: &FieldSpec, text: &str) -> Result<Option<Value>, validator::ValidationError> {
    match field.shape {
        FieldShape::Text => Ok(Some(Value::Text(text.to_string()))),
        FieldShape::Number => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            match trimmed.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(Some(Value::Number(n))),
                _ => Err(field_error(
                    "number",
                    format!("{} must be a number", field.name),
                    text,
                )),
            }
        }
        FieldShape::Boolean => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            match parse_bool(trimmed) {
                Some(b) => Ok(Some(Value::Bool(b))),
                None => Err(field_error(
                    "boolean",
                    format!("{} must be true or false", field.name),
                    text,
                )),
            }
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") || s == "1" {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") || s == "0" {
        Some(false)
    } else {
        None
    }
}
