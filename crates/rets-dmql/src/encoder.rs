//! Rendering of typed values as DMQL literals.
//!
//! RETS 1.5 defines date/time values as XML schema timestamps without a zone
//! designator, always read as UTC. Temporal values are rendered in extended
//! ISO-8601 form and any trailing `Z` or `±HH:MM` offset is cut off. The
//! wall-clock fields are kept as given; the offset is dropped, not applied.
//!
//! Every other value is rendered in its natural string form with no quoting.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat};
use rets_proto::Value;

use crate::error::EncodeError;

/// Format of a DMQL date/time literal.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Naive formats accepted for textual date/times, tried in order.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Encode a value as a DMQL literal.
pub fn encode(value: &Value) -> Result<String, EncodeError> {
    match value {
        Value::String(s) | Value::Raw(s) => Ok(s.clone()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Real(f) => Ok(f.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::DateTime(dt) => {
            let xmlschema = dt.to_rfc3339_opts(SecondsFormat::Secs, true);
            Ok(strip_utc_offset(&xmlschema).to_string())
        }
        Value::NaiveDateTime(dt) => Ok(format_naive(dt)),
        Value::Date(d) => Ok(format_naive(&d.and_time(NaiveTime::MIN))),
        Value::DateTimeText(text) => parse_datetime_text(text).map(|dt| format_naive(&dt)),
        Value::Timestamp(secs) => {
            let dt = DateTime::from_timestamp(*secs, 0)
                .ok_or(EncodeError::TimestampOutOfRange(*secs))?;
            let xmlschema = dt.to_rfc3339_opts(SecondsFormat::Secs, true);
            Ok(strip_utc_offset(&xmlschema).to_string())
        }
    }
}

/// Remove a trailing `Z`, `+HH:MM` or `-HH:MM` from a date/time literal.
///
/// ```rust
/// use rets_dmql::strip_utc_offset;
///
/// assert_eq!(strip_utc_offset("1985-04-05T00:00:00Z"), "1985-04-05T00:00:00");
/// assert_eq!(strip_utc_offset("1985-04-05T00:00:00-05:00"), "1985-04-05T00:00:00");
/// assert_eq!(strip_utc_offset("1985-04-05"), "1985-04-05");
/// ```
pub fn strip_utc_offset(literal: &str) -> &str {
    if let Some(stripped) = literal.strip_suffix('Z') {
        return stripped;
    }

    let bytes = literal.as_bytes();
    if bytes.len() >= 6 {
        let tail = &bytes[bytes.len() - 6..];
        let is_offset = matches!(tail[0], b'+' | b'-')
            && tail[1].is_ascii_digit()
            && tail[2].is_ascii_digit()
            && tail[3] == b':'
            && tail[4].is_ascii_digit()
            && tail[5].is_ascii_digit();
        if is_offset {
            return &literal[..literal.len() - 6];
        }
    }

    literal
}

fn format_naive(dt: &NaiveDateTime) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

/// Parse a textual date/time into its wall-clock fields.
fn parse_datetime_text(text: &str) -> Result<NaiveDateTime, EncodeError> {
    let trimmed = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_local());
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(EncodeError::UnparseableDateTime(text.to_string()))
}
