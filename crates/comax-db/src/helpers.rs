//! Row-to-entity parsing helpers.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing logic and handle the dual
//! datetime format (`SQLite`'s `datetime('now')` vs Rust's `to_rfc3339()`).

use chrono::{DateTime, SubsecRound, Utc};

use crate::error::DatabaseError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Current time in the column format all repos write.
///
/// The returned instant is truncated to microseconds so it equals what
/// `parse_datetime` reads back from the stored text.
#[must_use]
pub fn now_text() -> (DateTime<Utc>, String) {
    let now = Utc::now().trunc_subsecs(6);
    let text = now.to_rfc3339_opts(chrono::SecondsFormat::Micros, true);
    (now, text)
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with every comax-core enum: culture codes (`"he-IL"`), audit actions
/// (`"CREATE"`), tables and directions (snake case).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
/// Use `get::<Option<String>>()` for nullable columns.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read an INTEGER 0/1 column as `bool`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_bool(row: &libsql::Row, idx: i32) -> Result<bool, DatabaseError> {
    Ok(row.get::<i64>(idx)? != 0)
}

/// Extract an optional JSON value from a TEXT column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string contains invalid JSON.
pub fn parse_optional_json(s: Option<&str>) -> Result<Option<serde_json::Value>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => {
            let val = serde_json::from_str(s)
                .map_err(|e| DatabaseError::Query(format!("Invalid JSON in column: {e}")))?;
            Ok(Some(val))
        }
        _ => Ok(None),
    }
}

/// Reject empty required text before it reaches SQL.
///
/// # Errors
///
/// Returns `DatabaseError::Validation` naming `field`.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), DatabaseError> {
    if value.trim().is_empty() {
        return Err(DatabaseError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Map a UNIQUE constraint failure to a readable validation error.
pub fn map_unique_violation(err: DatabaseError, what: impl FnOnce() -> String) -> DatabaseError {
    match &err {
        DatabaseError::LibSql(e) if e.to_string().contains("UNIQUE constraint failed") => {
            DatabaseError::Validation(format!("{} already exists", what()))
        }
        _ => err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comax_core::enums::{AuditAction, CultureCode};

    #[test]
    fn parses_both_datetime_formats() {
        let rfc = parse_datetime("2026-02-09T14:30:00+00:00").unwrap();
        let sqlite = parse_datetime("2026-02-09 14:30:00").unwrap();
        assert_eq!(rfc, sqlite);
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn now_text_round_trips() {
        let (now, text) = now_text();
        let parsed = parse_datetime(&text).unwrap();
        assert_eq!(parsed, now);
        assert_eq!(now.timestamp_subsec_nanos() % 1_000, 0);
    }

    #[test]
    fn parses_core_enums() {
        assert_eq!(parse_enum::<CultureCode>("he-IL").unwrap(), CultureCode::HeIl);
        assert_eq!(parse_enum::<AuditAction>("IMPORT").unwrap(), AuditAction::Import);
        assert!(parse_enum::<CultureCode>("xx-XX").is_err());
    }

    #[test]
    fn optional_json_treats_empty_as_none() {
        assert_eq!(parse_optional_json(None).unwrap(), None);
        assert_eq!(parse_optional_json(Some("")).unwrap(), None);
        assert_eq!(
            parse_optional_json(Some("{\"a\":1}")).unwrap(),
            Some(serde_json::json!({"a": 1}))
        );
    }

    #[test]
    fn require_non_empty_rejects_whitespace() {
        assert!(require_non_empty("resource_key", "  ").is_err());
        assert!(require_non_empty("resource_key", "greet").is_ok());
    }
}
