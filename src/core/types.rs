use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One data row as handed to channel encoders.
pub type Datum = Map<String, Value>;

/// Width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimension {
    pub width: f64,
    pub height: f64,
}

impl Dimension {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }
}

/// Returns `true` for values the encoders treat as "absent".
#[must_use]
pub fn is_nullish(value: &Value) -> bool {
    value.is_null()
}

/// Numeric view of a raw value.
///
/// Booleans map to `0`/`1`; numeric strings are parsed. Anything else is `None`.
#[must_use]
pub fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|v| v.is_finite()),
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Value::String(text) => text.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Temporal view of a raw value in epoch milliseconds.
///
/// Numbers are taken as epoch milliseconds; strings may be RFC 3339,
/// `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD` (interpreted as UTC).
#[must_use]
pub fn value_as_epoch_millis(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|v| v.is_finite()),
        Value::String(text) => parse_date_millis(text.trim()),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

fn parse_date_millis(text: &str) -> Option<f64> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.timestamp_millis() as f64);
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Some(parsed.and_utc().timestamp_millis() as f64);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().timestamp_millis() as f64)
}

/// Builds a JSON number, mapping non-finite input to `null`.
#[must_use]
pub fn number_value(value: f64) -> Value {
    serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
}
