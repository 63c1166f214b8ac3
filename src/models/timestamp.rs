//! Lenient timestamp parsing.
//!
//! The backend stores naive UTC datetimes and serializes them without an
//! offset (`2024-05-01T09:30:00.123456`), but some fields are already
//! RFC 3339. Both are accepted and normalized to `DateTime<Utc>`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
        None => serializer.serialize_none(),
    }
}

/// Unparseable values become `None` rather than failing the whole payload.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_naive_backend_format() {
        let dt = parse("2024-05-01T09:30:00.123456").expect("should parse");
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 5, 1));
        assert_eq!((dt.hour(), dt.minute()), (9, 30));
    }

    #[test]
    fn test_parse_rfc3339_and_date_only() {
        let dt = parse("2024-05-01T11:30:00+02:00").expect("should parse");
        assert_eq!(dt.hour(), 9);

        let date = parse("2024-12-24").expect("should parse");
        assert_eq!((date.month(), date.day(), date.hour()), (12, 24, 0));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse("next tuesday").is_none());
    }
}
