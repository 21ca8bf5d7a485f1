//! Serde adapter for persisted timestamps.
//!
//! Writes local wall-clock time as `YYYY-MM-DDTHH:MM:SS.mmm`. Reads either
//! that form or a full RFC 3339 timestamp (as produced by browser backups),
//! converting offset-qualified values into local time.

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};

const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.format(WIRE_FORMAT).to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(raw.as_str()).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp `{raw}`")))
}

pub(crate) fn parse(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if let Ok(value) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(value);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|value| value.with_timezone(&Local).naive_local())
}

#[cfg(test)]
mod tests {
    use super::parse;

    #[test]
    fn parses_naive_and_rfc3339_forms() {
        assert!(parse("2024-01-10T09:30:00.000").is_some());
        assert!(parse("2024-01-10T09:30:00").is_some());
        assert!(parse("2024-01-10T09:30:00.000Z").is_some());
        assert!(parse("2024-01-10T09:30:00+02:00").is_some());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse("yesterday").is_none());
        assert!(parse("").is_none());
    }
}
