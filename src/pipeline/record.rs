//! Booking records and field coercion
//!
//! The backend schema is loose: OS and browser stats key by category name,
//! the daily stats key by date, and counts arrive either as JSON numbers or
//! as numeric strings. Rather than casting inline, every field goes through
//! one of three coercions:
//!
//! | role  | accepted                                   | on failure            |
//! |-------|--------------------------------------------|-----------------------|
//! | label | string, number, bool                       | `""`                  |
//! | count | integer, float, numeric string (`parseInt`)| `0`                   |
//! | time  | `YYYY-MM-DD`, RFC 3339, naive datetime, ms | unsorted, raw label   |
//!
//! Plain dates and naive datetimes are taken as UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::FieldCoercionError;

/// One raw record from the stats backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingRecord(Map<String, Value>);

impl From<Value> for BookingRecord {
    /// Non-object entries become empty records so they still occupy a slot
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

impl From<Map<String, Value>> for BookingRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl BookingRecord {
    /// Raw access to a field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Coerce a field to a display label
    pub fn label(&self, field: &str) -> Result<String, FieldCoercionError> {
        match self.get(field) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(Value::Bool(b)) => Ok(b.to_string()),
            _ => Err(FieldCoercionError::Missing {
                field: field.to_string(),
            }),
        }
    }

    /// Coerce a field to a non-negative booking count
    pub fn count(&self, field: &str) -> Result<u64, FieldCoercionError> {
        let value = self.get(field).ok_or_else(|| FieldCoercionError::Missing {
            field: field.to_string(),
        })?;

        let parsed = match value {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_i64().map(|i| i.max(0) as u64))
                .or_else(|| n.as_f64().and_then(float_to_count)),
            Value::String(s) => parse_count(s),
            _ => None,
        };

        parsed.ok_or_else(|| FieldCoercionError::NotNumeric {
            field: field.to_string(),
            raw: value.to_string(),
        })
    }

    /// Coerce a field to a point in time, keeping the offset it was written in
    pub fn timestamp(&self, field: &str) -> Result<DateTime<FixedOffset>, FieldCoercionError> {
        let value = self.get(field).ok_or_else(|| FieldCoercionError::Missing {
            field: field.to_string(),
        })?;

        let parsed = match value {
            Value::String(s) => parse_timestamp(s),
            Value::Number(n) => n
                .as_i64()
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .map(|dt| dt.fixed_offset()),
            _ => None,
        };

        parsed.ok_or_else(|| FieldCoercionError::NotADate {
            field: field.to_string(),
            raw: value.to_string(),
        })
    }

    /// Calendar date of a field, in the field's own offset
    pub fn date(&self, field: &str) -> Result<NaiveDate, FieldCoercionError> {
        self.timestamp(field).map(|dt| dt.date_naive())
    }
}

/// Parse a count the way `parseInt` does: skip leading whitespace, accept an
/// optional sign, then take the leading decimal digits.
///
/// Negative results clamp to zero; overflow saturates.
pub fn parse_count(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let leading: &str = {
        let end = digits
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(digits.len());
        &digits[..end]
    };

    if leading.is_empty() {
        return None;
    }

    if negative {
        return Some(0);
    }

    let value = leading.bytes().fold(0u64, |acc, b| {
        acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
    });
    Some(value)
}

fn float_to_count(f: f64) -> Option<u64> {
    if f.is_finite() {
        Some(f.trunc().max(0.0) as u64)
    } else {
        None
    }
}

/// Accepts RFC 3339 timestamps, naive ISO datetimes and plain dates
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.and_utc().fixed_offset())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc().fixed_offset())
        })
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    parse_timestamp(raw).map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn record(value: Value) -> BookingRecord {
        BookingRecord::from(value)
    }

    #[test]
    fn test_parse_count_like_parse_int() {
        assert_eq!(parse_count("92000"), Some(92000));
        assert_eq!(parse_count("  42"), Some(42));
        assert_eq!(parse_count("12abc"), Some(12));
        assert_eq!(parse_count("+7"), Some(7));
        assert_eq!(parse_count("3.9"), Some(3));
        assert_eq!(parse_count("-15"), Some(0));
        assert_eq!(parse_count("abc"), None);
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("-"), None);
        assert_eq!(parse_count("99999999999999999999999"), Some(u64::MAX));
    }

    #[test]
    fn test_count_from_json_numbers() {
        let r = record(json!({"a": 85000, "b": 12.7, "c": -3, "d": -2.5}));
        assert_eq!(r.count("a"), Ok(85000));
        assert_eq!(r.count("b"), Ok(12));
        assert_eq!(r.count("c"), Ok(0));
        assert_eq!(r.count("d"), Ok(0));
    }

    #[test]
    fn test_count_failures() {
        let r = record(json!({"s": "lots", "n": null, "b": true, "o": {}}));

        assert!(matches!(r.count("s"), Err(FieldCoercionError::NotNumeric { .. })));
        assert!(matches!(r.count("n"), Err(FieldCoercionError::NotNumeric { .. })));
        assert!(matches!(r.count("b"), Err(FieldCoercionError::NotNumeric { .. })));
        assert!(matches!(r.count("o"), Err(FieldCoercionError::NotNumeric { .. })));
        assert!(matches!(r.count("missing"), Err(FieldCoercionError::Missing { .. })));
    }

    #[test]
    fn test_label_coercion() {
        let r = record(json!({"name": "WINDOWS", "code": 7, "flag": false, "nil": null}));
        assert_eq!(r.label("name").unwrap(), "WINDOWS");
        assert_eq!(r.label("code").unwrap(), "7");
        assert_eq!(r.label("flag").unwrap(), "false");
        assert!(r.label("nil").is_err());
        assert!(r.label("missing").is_err());
    }

    #[test]
    fn test_date_coercion() {
        let expected = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        let r = record(json!({
            "plain": "2024-08-01",
            "rfc": "2024-08-01T10:00:00Z",
            "naive": "2024-08-01T10:00:00",
            "millis": 1722470400000i64,
            "junk": "yesterday",
        }));

        assert_eq!(r.date("plain"), Ok(expected));
        assert_eq!(r.date("rfc"), Ok(expected));
        assert_eq!(r.date("naive"), Ok(expected));
        assert_eq!(r.date("millis"), Ok(expected));
        assert!(matches!(r.date("junk"), Err(FieldCoercionError::NotADate { .. })));
    }

    #[test]
    fn test_timestamp_keeps_instant() {
        let r = record(json!({
            "offset": "2024-08-02T01:00:00+05:00",
            "utc": "2024-08-01T22:00:00Z",
            "plain": "2024-08-01",
        }));

        let offset = r.timestamp("offset").unwrap();
        let utc = r.timestamp("utc").unwrap();

        // Written as Aug 2, but it happened two hours before the UTC one
        assert!(offset < utc);
        assert_eq!(r.date("offset"), Ok(NaiveDate::from_ymd_opt(2024, 8, 2).unwrap()));
        assert_eq!(
            r.timestamp("plain").unwrap().with_timezone(&Utc),
            Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_non_object_record_is_empty() {
        let r = record(json!(["not", "an", "object"]));
        assert_eq!(r, BookingRecord::default());
        assert!(r.get("anything").is_none());
    }
}
