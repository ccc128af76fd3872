//! End-to-end tests: declaration → schema → validation → predicates

use std::collections::HashMap;

use chrono::{TimeZone, Utc};

use super::*;

fn users() -> Vec<Column> {
    vec![
        Column::new("name", "varchar(255)"),
        Column::new("age", "integer"),
        Column::new("createdAt", "timestamp with time zone"),
        Column::new("isActive", "boolean"),
    ]
}

fn user(name: &str, age: f64, created_at: &str, active: bool) -> HashMap<String, Value> {
    HashMap::from([
        ("name".to_string(), Value::from(name)),
        ("age".to_string(), Value::from(age)),
        ("createdAt".to_string(), Value::from(created_at)),
        ("isActive".to_string(), Value::from(active)),
    ])
}

/// Validate and build in one go, panicking on validation errors
fn run(filters: &FiltersMap, pairs: &[(&str, &str)]) -> Result<WhereClause, FilterError> {
    let schema = synthesize(&users(), filters);
    let input = schema
        .parse(&RawQuery::from_pairs(pairs.iter().copied()))
        .unwrap();
    build(&users(), filters, &input).map(combine)
}

#[test]
fn test_schema_fields_exactly_match_table() {
    let all: Vec<&str> = Operator::ALL.iter().map(|op| op.as_str()).collect();
    let filters: FiltersMap = users()
        .iter()
        .map(|c| (c.name.clone(), all.clone()))
        .collect();

    let schema = synthesize(&users(), &filters);
    let fields: Vec<(&str, FieldShape)> = schema
        .fields()
        .iter()
        .map(|f| (f.name.as_str(), f.shape))
        .collect();

    assert_eq!(
        fields,
        vec![
            ("name_equals", FieldShape::Text),
            ("name_contains", FieldShape::Text),
            ("name_starts_with", FieldShape::Text),
            ("name_ends_with", FieldShape::Text),
            ("age_equals", FieldShape::Number),
            ("age_gt", FieldShape::Number),
            ("age_gte", FieldShape::Number),
            ("age_lt", FieldShape::Number),
            ("age_lte", FieldShape::Number),
            ("age_between_min", FieldShape::Number),
            ("age_between_max", FieldShape::Number),
            ("createdAt_equals", FieldShape::Text),
            ("createdAt_gte", FieldShape::Text),
            ("createdAt_lte", FieldShape::Text),
            ("createdAt_between_start", FieldShape::Text),
            ("createdAt_between_end", FieldShape::Text),
            ("isActive_equals", FieldShape::Boolean),
        ]
    );
}

#[test]
fn test_combine_empty_renders_no_clause() {
    let clause = combine(Vec::new());
    assert_eq!(clause, WhereClause::Unrestricted);
    assert_eq!(clause.to_sql(&mut SqlParams::default()), None);

    let rows = vec![
        user("Anna", 30.0, "2024-01-01", true),
        user("Bob", 12.0, "2024-02-01", false),
    ];
    assert_eq!(clause.filter_rows(&rows).len(), 2);
}

#[test]
fn test_age_between_round_trip() {
    let filters = FiltersMap::new().with("age", ["between"]);

    let clause = run(&filters, &[("age_between_min", "18"), ("age_between_max", "65")]).unwrap();
    assert_eq!(
        clause,
        WhereClause::All(vec![Predicate::between("age", 18.0, 65.0)])
    );

    let mut params = SqlParams::default();
    assert_eq!(
        clause.to_sql(&mut params).as_deref(),
        Some("age BETWEEN ? AND ?")
    );
    assert_eq!(params.values, vec![Value::from(18.0), Value::from(65.0)]);

    for (age, expected) in [(17.0, false), (18.0, true), (40.0, true), (65.0, true), (66.0, false)] {
        assert_eq!(
            clause.matches(&user("x", age, "2024-01-01", true)),
            expected,
            "age {}",
            age
        );
    }

    let clause = run(&filters, &[("age_between_min", "18")]).unwrap();
    assert!(clause.is_unrestricted());
}

#[test]
fn test_temporal_single_bound_is_noop() {
    let filters = FiltersMap::new().with("createdAt", ["between"]);
    let clause = run(&filters, &[("createdAt_between_end", "2024-12-31")]).unwrap();
    assert!(clause.is_unrestricted());
}

#[test]
fn test_name_contains_matches_case_insensitively() {
    let filters = FiltersMap::new().with("name", ["contains"]);
    let clause = run(&filters, &[("name_contains", "ann")]).unwrap();

    assert!(clause.matches(&user("Anna", 1.0, "2024-01-01", true)));
    assert!(clause.matches(&user("HANNAH", 1.0, "2024-01-01", true)));
    assert!(!clause.matches(&user("anb", 1.0, "2024-01-01", true)));
}

#[test]
fn test_zero_and_false_filter_but_empty_string_does_not() {
    let filters = FiltersMap::new()
        .with("age", ["eq"])
        .with("isActive", ["eq"])
        .with("name", ["eq"]);
    let clause = run(
        &filters,
        &[("age_equals", "0"), ("isActive_equals", "false"), ("name_equals", "")],
    )
    .unwrap();

    assert_eq!(
        clause.predicates(),
        &[
            Predicate::compare("age", Comparison::Eq, 0.0),
            Predicate::compare("isActive", Comparison::Eq, false),
        ]
    );
}

#[test]
fn test_empty_temporal_query_values_are_absent() {
    let filters = FiltersMap::new().with("createdAt", ["gte", "eq", "between"]);
    let clause = run(
        &filters,
        &[
            ("createdAt_gte", ""),
            ("createdAt_equals", ""),
            ("createdAt_between_start", ""),
            ("createdAt_between_end", ""),
        ],
    )
    .unwrap();
    assert!(clause.is_unrestricted());

    let clause = run(
        &filters,
        &[("createdAt_between_start", "2024-01-01"), ("createdAt_between_end", "")],
    )
    .unwrap();
    assert!(clause.is_unrestricted());
}

#[test]
fn test_zero_filters_for_range_operators() {
    let filters = FiltersMap::new().with("age", ["gt", "between"]);
    let clause = run(
        &filters,
        &[("age_gt", "0"), ("age_between_min", "0"), ("age_between_max", "0")],
    )
    .unwrap();
    assert_eq!(
        clause.predicates(),
        &[
            Predicate::compare("age", Comparison::Gt, 0.0),
            Predicate::between("age", 0.0, 0.0),
        ]
    );
}

#[test]
fn test_malformed_temporal_input_fails_build() {
    let filters = FiltersMap::new().with("createdAt", ["gte"]);
    let err = run(&filters, &[("createdAt_gte", "not-a-date")]).unwrap_err();
    assert_eq!(err.code(), "INVALID_TIMESTAMP");
}

#[test]
fn test_invalid_operator_is_silently_ignored() {
    let filters = FiltersMap::new().with("isActive", ["contains"]);
    assert!(synthesize(&users(), &filters).is_empty());

    let input = FilterInput::new().with("isActive_contains", "tru");
    let predicates = build(&users(), &filters, &input).unwrap();
    assert!(predicates.is_empty());
}

#[test]
fn test_non_numeric_text_is_a_validation_error() {
    let filters = FiltersMap::new().with("age", ["gt"]);
    let schema = synthesize(&users(), &filters);
    let errors = schema
        .parse(&RawQuery::from_pairs([("age_gt", "eighteen")]))
        .unwrap_err();
    assert_eq!(errors.errors()[0].field, "age_gt");
    assert_eq!(errors.errors()[0].error.code, "number");
}

#[test]
fn test_full_listing_filter() {
    let set = FilterSet::with_options(
        users(),
        FiltersMap::new()
            .with("name", ["starts_with"])
            .with("age", ["gte"])
            .with("createdAt", ["between"])
            .with("isActive", ["eq"]),
        FilterOptions::strict(),
    )
    .unwrap();

    let raw = RawQuery::from_pairs([
        ("name_starts_with", "a"),
        ("age_gte", "21"),
        ("createdAt_between_start", "2024-01-01"),
        ("createdAt_between_end", "2024-06-30T23:59:59Z"),
        ("isActive_equals", "true"),
        ("page", "3"),
    ]);
    let input = set.parse(&raw).unwrap();
    let clause = set.where_clause(&input).unwrap();

    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2024, 6, 30, 23, 59, 59).unwrap();
    assert_eq!(
        clause.predicates(),
        &[
            Predicate::like("name", TextMatch::StartsWith, "a"),
            Predicate::compare("age", Comparison::Gte, 21.0),
            Predicate::between("createdAt", start, end),
            Predicate::compare("isActive", Comparison::Eq, true),
        ]
    );

    let mut params = SqlParams::default();
    let sql = clause
        .to_sql_aliased(&mut params, |col| if col == "createdAt" { "created_at" } else { col }, "u")
        .unwrap();
    assert_eq!(
        sql,
        r"LOWER(u.name) LIKE ? ESCAPE '\' AND u.age >= ? AND u.created_at BETWEEN ? AND ? AND u.isActive = TRUE"
    );
    assert_eq!(params.values.len(), 4);

    let rows = vec![
        user("Alice", 30.0, "2024-03-01T10:00:00Z", true),
        user("alan", 20.0, "2024-03-01T10:00:00Z", true),
        user("Amy", 25.0, "2024-07-01T00:00:00Z", true),
        user("Andrea", 40.0, "2024-02-01T00:00:00Z", false),
        user("Bea", 50.0, "2024-02-01T00:00:00Z", true),
    ];
    let matched: Vec<&Value> = clause
        .filter_rows(&rows)
        .into_iter()
        .filter_map(|r| r.get("name"))
        .collect();
    assert_eq!(matched, vec![&Value::from("Alice")]);
}
