//! Resolution of columns and a filters map into the active filter set
//!
//! Both the schema synthesizer and the predicate builder walk the same
//! resolved list, so they always agree on which fields exist.

use std::collections::HashSet;

use crate::column::{Column, SemanticType, classify};
use crate::config::{FilterOptions, FiltersMap};
use crate::error::FilterError;
use crate::operator::{Binding, Operator, binding, field_name};

/// One active (column, operator) pair with its input field names
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFilter {
    pub column: String,
    pub semantic_type: SemanticType,
    pub operator: Operator,
    pub fields: FieldNames,
}

/// Input field names for a resolved filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldNames {
    Single(String),
    Range { low: String, high: String },
}

impl FieldNames {
    fn new(column: &str, binding: Binding) -> Self {
        match binding {
            Binding::Single(suffix) => Self::Single(field_name(column, suffix)),
            Binding::Range { low, high } => Self::Range {
                low: field_name(column, low),
                high: field_name(column, high),
            },
        }
    }

    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Single(name) => vec![name.as_str()],
            Self::Range { low, high } => vec![low.as_str(), high.as_str()],
        }
    }
}

/// Resolve declarations in column order, then declared operator order.
///
/// In permissive mode invalid declarations are skipped and logged; in strict
/// mode the first one is returned as an error.
pub fn resolve(
    columns: &[Column],
    filters: &FiltersMap,
    options: FilterOptions,
) -> Result<Vec<ResolvedFilter>, FilterError> {
    for declared in filters.columns() {
        if !columns.iter().any(|c| c.name == declared) {
            if options.strict {
                return Err(FilterError::UnknownColumn(declared.to_string()));
            }
            tracing::debug!(column = %declared, "Ignoring filters for unknown column");
        }
    }

    let mut resolved = Vec::new();
    let mut seen_columns: HashSet<&str> = HashSet::new();

    for column in columns {
        let requested = filters.operators(&column.name);
        if requested.is_empty() {
            continue;
        }

        if !seen_columns.insert(column.name.as_str()) {
            let duplicate = resolved
                .iter()
                .find(|r: &&ResolvedFilter| r.column == column.name)
                .and_then(|r| r.fields.names().first().map(|n| n.to_string()))
                .unwrap_or_else(|| column.name.clone());
            if options.strict {
                return Err(FilterError::DuplicateField(duplicate));
            }
            tracing::warn!(
                column = %column.name,
                field = %duplicate,
                "Skipping duplicate filter column"
            );
            continue;
        }

        let semantic_type = classify(column);
        for name in requested {
            let Some(operator) = Operator::parse(name) else {
                if options.strict {
                    return Err(FilterError::unknown_operator(&column.name, name));
                }
                tracing::debug!(column = %column.name, operator = %name, "Ignoring unknown filter operator");
                continue;
            };

            match binding(semantic_type, operator) {
                Some(binding) => resolved.push(ResolvedFilter {
                    column: column.name.clone(),
                    semantic_type,
                    operator,
                    fields: FieldNames::new(&column.name, binding),
                }),
                None if options.strict => {
                    return Err(FilterError::UnsupportedOperator {
                        column: column.name.clone(),
                        operator,
                        semantic_type,
                    });
                }
                None => {
                    tracing::debug!(
                        column = %column.name,
                        %operator,
                        %semantic_type,
                        "Ignoring filter operator not supported for column type"
                    );
                }
            }
        }
    }

    Ok(resolved)
}
