//! Internal helpers for value decoding and validation.
//!
//! These utilities are **not** part of the public API. They turn the JSON
//! values found in client field maps into typed column values, so every
//! field of the schema is decoded the same way.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::{EngineError, ResultEngine};

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Decode a text value. `null` decodes to `None`.
pub(crate) fn text(field: &str, raw: &Value) -> ResultEngine<Option<String>> {
    match raw {
        Value::Null => Ok(None),
        Value::String(value) => Ok(Some(value.clone())),
        _ => Err(EngineError::Validation(format!("{field} must be a string"))),
    }
}

/// Decode a floating point value from a JSON number or a numeric string.
pub(crate) fn float(field: &str, raw: &Value) -> ResultEngine<Option<f64>> {
    let value = match raw {
        Value::Null => return Ok(None),
        Value::Number(number) => number.as_f64(),
        Value::String(value) => value.trim().parse::<f64>().ok(),
        _ => None,
    };
    match value {
        Some(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(EngineError::Validation(format!("{field} must be a number"))),
    }
}

/// Decode an integer value from a JSON integer or an integer string.
pub(crate) fn integer(field: &str, raw: &Value) -> ResultEngine<Option<i64>> {
    let value = match raw {
        Value::Null => return Ok(None),
        Value::Number(number) => number.as_i64(),
        Value::String(value) => value.trim().parse::<i64>().ok(),
        _ => None,
    };
    value
        .map(Some)
        .ok_or_else(|| EngineError::Validation(format!("{field} must be an integer")))
}

/// Decode a timestamp.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DD HH:MM:SS[.f]` (space or `T`
/// separated, read as UTC) or a bare `YYYY-MM-DD` (midnight UTC).
pub(crate) fn timestamp(field: &str, raw: &Value) -> ResultEngine<Option<DateTime<Utc>>> {
    let value = match raw {
        Value::Null => return Ok(None),
        Value::String(value) => value.trim(),
        _ => {
            return Err(EngineError::Validation(format!(
                "{field} must be a date string"
            )));
        }
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(Some(parsed.and_utc()));
        }
    }
    if let Some(midnight) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(Some(midnight.and_utc()));
    }

    Err(EngineError::Validation(format!(
        "{field} is not a valid date: {value}"
    )))
}

/// Round to two decimal places, the precision the dashboard reports money in.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
