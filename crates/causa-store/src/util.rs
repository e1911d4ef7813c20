//! Row-mapping helpers shared by the collection modules.

use chrono::{DateTime, Utc};
use uuid::Uuid;

fn conversion_failure(
    idx: usize,
    err: Box<dyn std::error::Error + Send + Sync>,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, err)
}

pub(crate) fn parse_uuid(idx: usize, s: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| conversion_failure(idx, Box::new(e)))
}

pub(crate) fn parse_timestamp(idx: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_failure(idx, Box::new(e)))
}

/// Parse a stored enum spelling, failing the row when the value is not a
/// known variant (e.g. the database was written by a newer version).
pub(crate) fn parse_variant<T>(
    idx: usize,
    s: &str,
    parse: impl Fn(&str) -> Option<T>,
    what: &str,
) -> rusqlite::Result<T> {
    parse(s).ok_or_else(|| conversion_failure(idx, format!("unknown {what}: {s}").into()))
}
