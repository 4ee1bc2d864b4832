//! Lenient timestamp parsing
//!
//! The service emits timestamps either as RFC 3339 strings or as naive
//! ISO-8601 datetimes without an offset. Naive values are taken as UTC.
//! Timestamps are informational, so a value that parses as neither is
//! logged and dropped rather than failing the whole record.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use tracing::warn;

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub(crate) fn parse(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, NAIVE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

pub(crate) fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        let parsed = parse(&s);
        if parsed.is_none() {
            warn!("Ignoring unparseable timestamp {:?}", s);
        }
        parsed
    }))
}
