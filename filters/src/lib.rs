//! Column filters
//!
//! Derives query-parameter validation and query predicates from a single
//! per-column allow-list of filter operators.
//!
//! ## Pipeline
//!
//! 1. [`classify`] maps each [`Column`] to a [`SemanticType`].
//! 2. [`synthesize`] turns columns and a [`FiltersMap`] into a
//!    [`FilterSchema`] of optional input fields named `{column}_{suffix}`.
//! 3. [`FilterSchema::parse`] validates a [`RawQuery`] into a [`FilterInput`].
//! 4. [`build`] produces [`Predicate`]s and [`combine`] ANDs them into a
//!    [`WhereClause`], which renders to SQL or evaluates rows in memory.
//!
//! [`FilterSet`] bundles all of this for one endpoint.
//!
//! ## Fields per operator
//!
//! | Type     | Operators                          | Fields                                  |
//! |----------|------------------------------------|-----------------------------------------|
//! | string   | contains, eq, starts_with, ends_with | `_contains`, `_equals`, `_starts_with`, `_ends_with` |
//! | number   | eq, gt, gte, lt, lte, between      | `_equals`, `_gt`, ..., `_between_min`/`_between_max` |
//! | temporal | eq, gte, lte, between              | `_equals`, `_gte`, `_lte`, `_between_start`/`_between_end` |
//! | boolean  | eq                                 | `_equals`                               |
//!
//! ## Usage
//!
//! ```
//! use column_filters::{Column, FiltersMap, RawQuery, SqlParams, build, combine, synthesize};
//!
//! let columns = vec![Column::text("name"), Column::new("age", "integer")];
//! let filters = FiltersMap::new()
//!     .with("name", ["contains"])
//!     .with("age", ["between"]);
//!
//! let schema = synthesize(&columns, &filters);
//! let raw = RawQuery::from_pairs([("name_contains", "ann"), ("age_between_min", "18")]);
//! let input = schema.parse(&raw).unwrap();
//!
//! let clause = combine(build(&columns, &filters, &input).unwrap());
//! let mut params = SqlParams::default();
//! assert_eq!(
//!     clause.to_sql(&mut params).as_deref(),
//!     Some(r"LOWER(name) LIKE ? ESCAPE '\'")
//! );
//! ```

mod builder;
mod column;
mod config;
mod error;
#[cfg(feature = "axum")]
mod extract;
mod filter_set;
mod input;
mod operator;
mod plan;
mod predicate;
mod schema;
pub mod sql;
mod time;
mod value;

pub use builder::build;
pub use column::{Column, SemanticType, ValueKind, classify};
pub use config::{FilterOptions, FiltersMap};
pub use error::{FieldError, FilterError, ValidationErrors};
#[cfg(feature = "axum")]
pub use extract::FilterRejection;
pub use filter_set::FilterSet;
pub use input::{FilterInput, RawQuery, RawValue};
pub use operator::{Binding, Operator, UnknownOperator, binding, field_name};
pub use predicate::{Comparison, Predicate, TextMatch, WhereClause, combine};
pub use schema::{FieldShape, FieldSpec, FilterSchema, synthesize};
pub use sql::SqlParams;
pub use time::parse_iso_datetime;
pub use value::{Row, Value};

#[cfg(test)]
mod tests;
