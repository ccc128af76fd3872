//! Column descriptors and semantic type classification

use std::fmt;

use serde::{Deserialize, Serialize};

/// Storage-type markers that classify a column as numeric
const NUMBER_MARKERS: &[&str] = &[
    "int", "serial", "numeric", "decimal", "real", "double", "float",
];

/// Storage-type markers that classify a column as temporal
const TEMPORAL_MARKERS: &[&str] = &["timestamp", "date", "time"];

/// Storage-type markers that classify a column as boolean
const BOOLEAN_MARKERS: &[&str] = &["bool"];

/// Intrinsic value kind reported by the schema that owns the column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Text,
    Number,
    Temporal,
    Boolean,
    #[default]
    Unknown,
}

/// Semantic category a column is filtered as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    String,
    Number,
    Temporal,
    Boolean,
}

impl SemanticType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Temporal => "temporal",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Column descriptor supplied by the caller.
///
/// `sql_type` is the declared storage type as the store spells it
/// (`"integer"`, `"timestamp with time zone"`, `"PgBoolean"`...). `kind` is the
/// intrinsic value kind when the caller knows it; either is enough to classify.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Column {
    pub name: String,
    #[serde(default)]
    pub sql_type: String,
    #[serde(default)]
    pub kind: ValueKind,
}

impl Column {
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            kind: ValueKind::Unknown,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::with_kind(name, ValueKind::Text)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::with_kind(name, ValueKind::Number)
    }

    pub fn temporal(name: impl Into<String>) -> Self {
        Self::with_kind(name, ValueKind::Temporal)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::with_kind(name, ValueKind::Boolean)
    }

    fn with_kind(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            sql_type: String::new(),
            kind,
        }
    }

    pub fn semantic_type(&self) -> SemanticType {
        classify(self)
    }
}

/// Classify a column into its semantic type.
///
/// Numeric and temporal checks run before boolean so that a numeric-backed
/// flag column stays a number. Anything unrecognised is text.
pub fn classify(column: &Column) -> SemanticType {
    let sql_type = column.sql_type.to_ascii_lowercase();
    let has_marker = |markers: &[&str]| markers.iter().any(|m| sql_type.contains(m));

    if column.kind == ValueKind::Number || has_marker(NUMBER_MARKERS) {
        SemanticType::Number
    } else if column.kind == ValueKind::Temporal || has_marker(TEMPORAL_MARKERS) {
        SemanticType::Temporal
    } else if column.kind == ValueKind::Boolean || has_marker(BOOLEAN_MARKERS) {
        SemanticType::Boolean
    } else {
        SemanticType::String
    }
}
