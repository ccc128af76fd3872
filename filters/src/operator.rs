//! Operator vocabulary and the input-field naming convention
//!
//! Every supported (semantic type, operator) pair maps to one or two input
//! fields named `{column}_{suffix}`. The suffixes are part of the query-string
//! contract and must not change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::column::SemanticType;

/// Filter operator a filters map may declare for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Eq,
    Contains,
    StartsWith,
    EndsWith,
    Gt,
    Gte,
    Lt,
    Lte,
    Between,
}

impl Operator {
    pub const ALL: [Operator; 9] = [
        Self::Eq,
        Self::Contains,
        Self::StartsWith,
        Self::EndsWith,
        Self::Gt,
        Self::Gte,
        Self::Lt,
        Self::Lte,
        Self::Between,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Contains => "contains",
            Self::StartsWith => "starts_with",
            Self::EndsWith => "ends_with",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Between => "between",
        }
    }

    /// Look up an operator by its declared name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == name)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error for operator names outside the vocabulary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter operator: {0}")]
pub struct UnknownOperator(pub String);

impl FromStr for Operator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownOperator(s.to_string()))
    }
}

/// Input field suffixes an operator binds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// One field, `{column}_{suffix}`
    Single(&'static str),
    /// Two fields holding the inclusive lower and upper bounds
    Range {
        low: &'static str,
        high: &'static str,
    },
}

/// Field bindings for a (type, operator) pair, `None` when the operator is
/// not offered for that type.
///
/// The match is spelled out for every pair so adding a type or operator
/// fails to compile until the table is extended.
pub fn binding(semantic_type: SemanticType, operator: Operator) -> Option<Binding> {
    use Binding::{Range, Single};
    use Operator as Op;
    use SemanticType as Ty;

    match (semantic_type, operator) {
        (Ty::String, Op::Contains) => Some(Single("contains")),
        (Ty::String, Op::Eq) => Some(Single("equals")),
        (Ty::String, Op::StartsWith) => Some(Single("starts_with")),
        (Ty::String, Op::EndsWith) => Some(Single("ends_with")),
        (Ty::String, Op::Gt | Op::Gte | Op::Lt | Op::Lte | Op::Between) => None,

        (Ty::Number, Op::Eq) => Some(Single("equals")),
        (Ty::Number, Op::Gt) => Some(Single("gt")),
        (Ty::Number, Op::Gte) => Some(Single("gte")),
        (Ty::Number, Op::Lt) => Some(Single("lt")),
        (Ty::Number, Op::Lte) => Some(Single("lte")),
        (Ty::Number, Op::Between) => Some(Range {
            low: "between_min",
            high: "between_max",
        }),
        (Ty::Number, Op::Contains | Op::StartsWith | Op::EndsWith) => None,

        (Ty::Temporal, Op::Eq) => Some(Single("equals")),
        (Ty::Temporal, Op::Gte) => Some(Single("gte")),
        (Ty::Temporal, Op::Lte) => Some(Single("lte")),
        (Ty::Temporal, Op::Between) => Some(Range {
            low: "between_start",
            high: "between_end",
        }),
        (Ty::Temporal, Op::Gt | Op::Lt | Op::Contains | Op::StartsWith | Op::EndsWith) => None,

        (Ty::Boolean, Op::Eq) => Some(Single("equals")),
        (
            Ty::Boolean,
            Op::Contains
            | Op::StartsWith
            | Op::EndsWith
            | Op::Gt
            | Op::Gte
            | Op::Lt
            | Op::Lte
            | Op::Between,
        ) => None,
    }
}

/// Build an input field name from a column and suffix
pub fn field_name(column: &str, suffix: &str) -> String {
    format!("{}_{}", column, suffix)
}
