use super::DataType;
use crate::builtins::{NOW_FORMAT, local_offset};
use crate::error::CoercionError;
use crate::value::Value;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use std::cmp::Ordering;

/// ISO-8601 layouts accepted without an explicit offset; they are read as UTC.
const NAIVE_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A rendered string interpreted as a condition's declared data type.
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    Text(String),
    Number(f64),
    Instant(DateTime<FixedOffset>),
    Flag(bool),
    Json(Value),
}

impl Coerced {
    /// Orders two coerced values of the same kind. Mixed kinds, JSON and flags are unordered.
    pub fn compare(&self, other: &Coerced) -> Option<Ordering> {
        match (self, other) {
            (Coerced::Number(a), Coerced::Number(b)) => a.partial_cmp(b),
            (Coerced::Instant(a), Coerced::Instant(b)) => Some(a.cmp(b)),
            (Coerced::Text(a), Coerced::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Interprets `raw` as `data_type`.
pub fn coerce(raw: &str, data_type: DataType) -> Result<Coerced, CoercionError> {
    match data_type {
        DataType::String => Ok(Coerced::Text(raw.to_string())),
        DataType::Number => parse_number(raw).map(Coerced::Number),
        DataType::DateTime => parse_date_time(raw).map(Coerced::Instant),
        DataType::Boolean => Ok(Coerced::Flag(parse_flag(raw))),
        DataType::Array | DataType::Object => parse_json(raw, data_type).map(Coerced::Json),
    }
}

/// Parses a finite floating point number, ignoring surrounding whitespace.
pub fn parse_number(raw: &str) -> Result<f64, CoercionError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| CoercionError::NotANumber {
            raw: raw.to_string(),
        })
}

/// `"true"` (any case) and `"1"` are true; everything else is false.
pub fn parse_flag(raw: &str) -> bool {
    let raw = raw.trim();
    raw.eq_ignore_ascii_case("true") || raw == "1"
}

/// Parses an ISO-8601 date or date-time. Values without an offset are taken as UTC,
/// except the `DD/MM/YYYY HH:MM:SS` layout of the `now` built-in, which is read in the
/// built-in's own offset so that `{{now}}` can be compared.
pub fn parse_date_time(raw: &str) -> Result<DateTime<FixedOffset>, CoercionError> {
    let s = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
        return Ok(instant);
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }
    if let Some(midnight) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc().fixed_offset());
    }
    NaiveDateTime::parse_from_str(s, NOW_FORMAT)
        .ok()
        .and_then(|naive| local_offset().from_local_datetime(&naive).single())
        .ok_or_else(|| CoercionError::NotADateTime {
            raw: raw.to_string(),
        })
}

/// Parses JSON that must be an array or an object, matching `expected`.
pub fn parse_json(raw: &str, expected: DataType) -> Result<Value, CoercionError> {
    let not_json = || CoercionError::NotJson {
        raw: raw.to_string(),
        expected,
    };
    let value: Value = serde_json::from_str(raw).map_err(|_| not_json())?;
    match (&value, expected) {
        (Value::Array(_), DataType::Array) | (Value::Object(_), DataType::Object) => Ok(value),
        _ => Err(not_json()),
    }
}

/// Parses the operand of an array membership test: JSON when it parses, else the raw text.
pub fn parse_element(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Parses the operand of a `length*` operator.
pub fn parse_length(raw: &str) -> Result<usize, CoercionError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<usize>()
        .ok()
        .or_else(|| {
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|n| n.fract() == 0.0 && *n >= 0.0 && *n <= usize::MAX as f64)
                .map(|n| n as usize)
        })
        .ok_or_else(|| CoercionError::NotALength {
            raw: raw.to_string(),
        })
}

/// Whether `raw` is empty for `data_type`: `""`, `[]`, `{}` or `null`.
/// `0` and `false` are values, not emptiness.
pub fn is_empty_as(raw: &str, data_type: DataType) -> Result<bool, CoercionError> {
    if data_type == DataType::String {
        return Ok(raw.is_empty());
    }
    if raw.trim().is_empty() {
        return Ok(true);
    }
    match data_type {
        DataType::Number => parse_number(raw).map(|_| false),
        DataType::DateTime => parse_date_time(raw).map(|_| false),
        DataType::Boolean => Ok(false),
        DataType::Array | DataType::Object => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Null) => Ok(true),
            _ => parse_json(raw, data_type).map(|value| value.is_blank()),
        },
        DataType::String => Ok(raw.is_empty()),
    }
}

/// Emptiness of a value that reached the condition without being rendered. Strings are
/// still read as `data_type`; every other value is empty when it is blank.
pub fn is_value_empty_as(value: &Value, data_type: DataType) -> Result<bool, CoercionError> {
    match value {
        Value::String(text) => is_empty_as(text, data_type),
        other => Ok(other.is_blank()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_must_be_finite() {
        assert_eq!(parse_number(" 4.5 "), Ok(4.5));
        assert!(parse_number("NaN").is_err());
        assert!(parse_number("inf").is_err());
        assert!(parse_number("12abc").is_err());
    }

    #[test]
    fn date_times_accept_iso_and_now_layouts() {
        let utc = parse_date_time("2025-01-01T00:00:00Z").unwrap();
        assert_eq!(parse_date_time("2025-01-01").unwrap(), utc);
        assert_eq!(parse_date_time("2025-01-01 00:00:00").unwrap(), utc);
        assert_eq!(parse_date_time("2025-01-01T07:00:00+07:00").unwrap(), utc);
        assert_eq!(parse_date_time("01/01/2025 07:00:00").unwrap(), utc);
        assert!(parse_date_time("yesterday").is_err());
    }

    #[test]
    fn flags() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("1"));
        assert!(!parse_flag("yes"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn json_kind_must_match() {
        assert!(parse_json("[1,2]", DataType::Array).is_ok());
        assert!(parse_json("{\"a\":1}", DataType::Array).is_err());
        assert!(parse_json("not json", DataType::Object).is_err());
    }

    #[test]
    fn emptiness_per_type() {
        assert_eq!(is_empty_as("", DataType::String), Ok(true));
        assert_eq!(is_empty_as(" ", DataType::String), Ok(false));
        assert_eq!(is_empty_as("0", DataType::Number), Ok(false));
        assert_eq!(is_empty_as("false", DataType::Boolean), Ok(false));
        assert_eq!(is_empty_as("[]", DataType::Array), Ok(true));
        assert_eq!(is_empty_as("null", DataType::Object), Ok(true));
        assert_eq!(is_empty_as("{\"a\":1}", DataType::Object), Ok(false));
        assert!(is_empty_as("abc", DataType::Number).is_err());
    }

    #[test]
    fn resolved_values_are_empty_when_blank() {
        for data_type in DataType::ALL {
            assert_eq!(is_value_empty_as(&Value::Null, *data_type), Ok(true));
            assert_eq!(is_value_empty_as(&Value::Number(0.0), *data_type), Ok(false));
        }
        assert_eq!(is_value_empty_as(&Value::from(""), DataType::String), Ok(true));
        assert_eq!(is_value_empty_as(&Value::from("[]"), DataType::Array), Ok(true));
    }

    #[test]
    fn lengths() {
        assert_eq!(parse_length("3"), Ok(3));
        assert_eq!(parse_length("3.0"), Ok(3));
        assert!(parse_length("-1").is_err());
        assert!(parse_length("2.5").is_err());
    }
}
