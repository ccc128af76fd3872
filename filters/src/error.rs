//! Error types for filter declaration, input validation, and predicate building

use std::borrow::Cow;

use thiserror::Error;
use validator::ValidationError;

use crate::column::SemanticType;
use crate::operator::Operator;

/// Errors raised while declaring filters or building predicates
#[derive(Error, Debug)]
pub enum FilterError {
    /// Temporal input that passed validation but is not a date or datetime
    #[error("Invalid timestamp for {field}: {value}. Use ISO 8601 format.")]
    InvalidTimestamp { field: String, value: String },

    /// Strict mode: filters map names a column that does not exist
    #[error("Unknown filter column: {0}")]
    UnknownColumn(String),

    /// Strict mode: operator name outside the vocabulary
    #[error("Unknown filter operator '{operator}' on column {column}")]
    UnknownOperator { column: String, operator: String },

    /// Strict mode: operator not offered for the column's semantic type
    #[error("Operator '{operator}' is not supported for {semantic_type} column {column}")]
    UnsupportedOperator {
        column: String,
        operator: Operator,
        semantic_type: SemanticType,
    },

    /// Strict mode: two declarations produce the same input field
    #[error("Duplicate filter field: {0}")]
    DuplicateField(String),

    /// Filter declaration could not be loaded
    #[error("Invalid filter configuration: {0}")]
    InvalidConfig(String),
}

impl FilterError {
    pub fn invalid_timestamp(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn unknown_operator(column: impl Into<String>, operator: impl Into<String>) -> Self {
        Self::UnknownOperator {
            column: column.into(),
            operator: operator.into(),
        }
    }

    /// Stable machine-readable code for client-facing responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidTimestamp { .. } => "INVALID_TIMESTAMP",
            Self::UnknownColumn(_) => "UNKNOWN_FILTER_COLUMN",
            Self::UnknownOperator { .. } => "UNKNOWN_FILTER_OPERATOR",
            Self::UnsupportedOperator { .. } => "UNSUPPORTED_FILTER_OPERATOR",
            Self::DuplicateField(_) => "DUPLICATE_FILTER_FIELD",
            Self::InvalidConfig(_) => "INVALID_FILTER_CONFIG",
        }
    }

    /// Whether the error comes from request input rather than the declaration
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidTimestamp { .. })
    }
}

/// A validation failure on one input field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub error: ValidationError,
}

/// All validation failures for one raw query
#[derive(Error, Debug, Clone, Default, PartialEq)]
#[error("{}", self.message())]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, error: ValidationError) {
        self.errors.push(FieldError {
            field: field.into(),
            error,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Errors reported for one field
    pub fn field_errors(&self, field: &str) -> Vec<&ValidationError> {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| &e.error)
            .collect()
    }

    /// Human-readable summary, one message per failure joined with `; `
    pub fn message(&self) -> String {
        self.errors
            .iter()
            .map(|e| {
                e.error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{}: validation failed", e.field))
            })
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub(crate) fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// Build a field validation error with a code, message, and offending value
pub(crate) fn field_error(code: &'static str, message: String, value: &str) -> ValidationError {
    let mut error = ValidationError::new(code).with_message(Cow::Owned(message));
    error.add_param(Cow::Borrowed("value"), &value);
    error
}
