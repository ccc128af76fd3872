//! SQL utility functions

use crate::value::Value;

/// Collects SQL parameters during query building (maintains insertion order)
#[derive(Debug, Default)]
pub struct SqlParams {
    pub values: Vec<Value>,
}

impl SqlParams {
    pub fn push(&mut self, value: impl Into<Value>) {
        self.values.push(value.into());
    }
}

/// Escape SQL LIKE metacharacters (%, _, \) in user input
///
/// Use this when building LIKE patterns from user input to prevent
/// unintended pattern matching.
///
/// # Example
///
/// ```
/// use column_filters::sql::escape_like_pattern;
///
/// let user_input = "100% match_test";
/// let pattern = format!("%{}%", escape_like_pattern(user_input));
/// assert_eq!(pattern, "%100\\% match\\_test%");
/// ```
pub fn escape_like_pattern(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_pattern_no_special_chars() {
        assert_eq!(escape_like_pattern("hello"), "hello");
    }

    #[test]
    fn test_escape_like_pattern_percent() {
        assert_eq!(escape_like_pattern("100%"), "100\\%");
    }

    #[test]
    fn test_escape_like_pattern_underscore() {
        assert_eq!(escape_like_pattern("first_name"), "first\\_name");
    }

    #[test]
    fn test_escape_like_pattern_backslash_first() {
        assert_eq!(escape_like_pattern("a\\%"), "a\\\\\\%");
    }

    #[test]
    fn test_sql_params_keep_order() {
        let mut params = SqlParams::default();
        params.push("ann");
        params.push(18.0);
        params.push(true);
        assert_eq!(
            params.values,
            vec![Value::from("ann"), Value::from(18.0), Value::from(true)]
        );
    }
}
