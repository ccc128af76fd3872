//! One endpoint's filter declaration with its synthesized schema

use crate::builder::build_resolved;
use crate::column::Column;
use crate::config::{FilterOptions, FiltersMap};
use crate::error::{FilterError, ValidationErrors};
use crate::input::{FilterInput, RawQuery};
use crate::plan::{ResolvedFilter, resolve};
use crate::predicate::{Predicate, WhereClause, combine};
use crate::schema::FilterSchema;

/// Columns, filters map, and schema resolved once and shared across requests.
///
/// ```
/// use column_filters::{Column, FilterSet, FiltersMap, RawQuery};
///
/// let filters = FilterSet::new(
///     vec![Column::number("age")],
///     FiltersMap::new().with("age", ["between"]),
/// );
///
/// let raw = RawQuery::from_pairs([("age_between_min", "18"), ("age_between_max", "65")]);
/// let input = filters.parse(&raw).unwrap();
/// let clause = filters.where_clause(&input).unwrap();
/// assert_eq!(clause.predicates().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct FilterSet {
    columns: Vec<Column>,
    filters: FiltersMap,
    resolved: Vec<ResolvedFilter>,
    schema: FilterSchema,
}

impl FilterSet {
    /// Permissive declaration: invalid entries are ignored
    pub fn new(columns: Vec<Column>, filters: FiltersMap) -> Self {
        let resolved = resolve(&columns, &filters, FilterOptions::default()).unwrap_or_default();
        Self::from_parts(columns, filters, resolved)
    }

    /// Declaration checked according to `options`
    pub fn with_options(
        columns: Vec<Column>,
        filters: FiltersMap,
        options: FilterOptions,
    ) -> Result<Self, FilterError> {
        let resolved = resolve(&columns, &filters, options)?;
        Ok(Self::from_parts(columns, filters, resolved))
    }

    fn from_parts(columns: Vec<Column>, filters: FiltersMap, resolved: Vec<ResolvedFilter>) -> Self {
        let schema = FilterSchema::from_resolved(&resolved);
        tracing::debug!(
            columns = columns.len(),
            fields = schema.fields().len(),
            "Filter schema synthesized"
        );
        Self {
            columns,
            filters,
            resolved,
            schema,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn filters(&self) -> &FiltersMap {
        &self.filters
    }

    pub fn schema(&self) -> &FilterSchema {
        &self.schema
    }

    /// Validate raw query parameters
    pub fn parse(&self, raw: &RawQuery) -> Result<FilterInput, ValidationErrors> {
        self.schema.parse(raw)
    }

    /// Build predicates from validated input
    pub fn build(&self, input: &FilterInput) -> Result<Vec<Predicate>, FilterError> {
        build_resolved(&self.resolved, input)
    }

    /// Build and combine predicates from validated input
    pub fn where_clause(&self, input: &FilterInput) -> Result<WhereClause, FilterError> {
        self.build(input).map(combine)
    }
}
