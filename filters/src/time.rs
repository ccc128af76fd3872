//! Temporal input parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Accepted offset-less datetime layouts, interpreted as UTC
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse an ISO 8601 date or datetime string to `DateTime<Utc>`.
///
/// Accepts RFC 3339 (`2024-01-01T10:00:00+02:00`), offset-less datetimes
/// (taken as UTC), and plain dates (midnight UTC). Returns `None` for
/// anything else.
pub fn parse_iso_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
