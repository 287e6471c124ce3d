//! Typed values used in filter conditions.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A typed filter value.
///
/// RETS carries every value as text, so a `Value` only exists on the way in:
/// the caller builds it from domain data and the DMQL encoder renders it once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// UTF-8 string.
    String(String),
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit floating point.
    Real(f64),
    /// Boolean value.
    Bool(bool),
    /// Pre-rendered DMQL text, passed through verbatim.
    Raw(String),
    /// Date and time with an explicit UTC offset.
    #[serde(rename = "datetime")]
    DateTime(DateTime<FixedOffset>),
    /// Date and time without an offset.
    #[serde(rename = "naive_datetime")]
    NaiveDateTime(NaiveDateTime),
    /// Calendar date.
    Date(NaiveDate),
    /// Textual date/time that has to be parsed before encoding.
    #[serde(rename = "datetime_text")]
    DateTimeText(String),
    /// Seconds since the Unix epoch, UTC.
    Timestamp(i64),
}

impl Value {
    /// Check if this value encodes as a DMQL date/time literal.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            Value::DateTime(_)
                | Value::NaiveDateTime(_)
                | Value::Date(_)
                | Value::DateTimeText(_)
                | Value::Timestamp(_)
        )
    }

    /// Get the type name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Bool(_) => "bool",
            Value::Raw(_) => "raw",
            Value::DateTime(_) => "datetime",
            Value::NaiveDateTime(_) => "naive_datetime",
            Value::Date(_) => "date",
            Value::DateTimeText(_) => "datetime_text",
            Value::Timestamp(_) => "timestamp",
        }
    }

    /// Create a textual date/time value.
    pub fn datetime_text(text: impl Into<String>) -> Self {
        Value::DateTimeText(text.into())
    }

    /// Create a raw value that bypasses encoding.
    pub fn raw(text: impl Into<String>) -> Self {
        Value::Raw(text.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i as i64)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Integer(i as i64)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Real(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Value::DateTime(dt)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Value::DateTime(dt.fixed_offset())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::NaiveDateTime(dt)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from("RED"), Value::String("RED".into()));
        assert_eq!(Value::from(5), Value::Integer(5));
        assert_eq!(Value::from(5u32), Value::Integer(5));
        assert_eq!(Value::from(2.5), Value::Real(2.5));
        assert_eq!(Value::from(true), Value::Bool(true));
    }

    #[test]
    fn test_temporal_classification() {
        let date = NaiveDate::from_ymd_opt(1985, 4, 5).unwrap();
        assert!(Value::from(date).is_temporal());
        assert!(Value::from(date.and_hms_opt(0, 0, 0).unwrap()).is_temporal());
        assert!(Value::datetime_text("1985-04-05").is_temporal());
        assert!(Value::Timestamp(0).is_temporal());
        assert!(!Value::from("1985-04-05").is_temporal());
        assert!(!Value::raw("1985-04-05").is_temporal());
        assert!(!Value::from(1985).is_temporal());
    }

    #[test]
    fn test_utc_datetime_keeps_zero_offset() {
        let utc = DateTime::parse_from_rfc3339("1985-04-05T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        match Value::from(utc) {
            Value::DateTime(dt) => assert_eq!(dt.offset().local_minus_utc(), 0),
            other => panic!("expected DateTime, got {}", other.type_name()),
        }
    }

    #[test]
    fn test_json_representation() {
        let json = serde_json::to_string(&Value::Integer(5)).unwrap();
        assert_eq!(json, r#"{"type":"integer","value":5}"#);

        let parsed: Value =
            serde_json::from_str(r#"{"type":"datetime_text","value":"1985-04-05"}"#).unwrap();
        assert_eq!(parsed, Value::datetime_text("1985-04-05"));
    }

    #[test]
    fn test_json_tag_matches_type_name() {
        let date = NaiveDate::from_ymd_opt(1985, 4, 5).unwrap();
        let values = vec![
            Value::from("RED"),
            Value::Integer(5),
            Value::Real(1.5),
            Value::Bool(true),
            Value::raw("*"),
            Value::DateTime(DateTime::parse_from_rfc3339("1985-04-05T10:00:00+02:00").unwrap()),
            Value::NaiveDateTime(date.and_hms_opt(10, 0, 0).unwrap()),
            Value::Date(date),
            Value::datetime_text("1985-04-05"),
            Value::Timestamp(481_507_200),
        ];

        for value in values {
            let json = serde_json::to_value(&value).unwrap();
            assert_eq!(json["type"], value.type_name());

            let parsed: Value = serde_json::from_value(json).unwrap();
            assert_eq!(parsed, value);
        }
    }
}
