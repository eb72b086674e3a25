//! Serde field decoders that never fail.
//!
//! Each helper first captures the raw JSON value and then coerces it, so a
//! wrong type produces the field's zero value instead of a decode error.
//! Used through `#[serde(deserialize_with = "...")]` on the models.

use crate::models::TerminalStatus;
use crate::normalize::{decode, Record};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Placeholder used for grouping keys that are missing or blank.
pub const UNKNOWN: &str = "Unknown";

pub fn unknown() -> String {
    UNKNOWN.to_string()
}

fn raw<'de, D: Deserializer<'de>>(deserializer: D) -> Value {
    Value::deserialize(deserializer).unwrap_or(Value::Null)
}

/// Numeric coercion: JSON numbers, numeric strings (surrounding whitespace
/// and thousands separators tolerated), and booleans as 1/0. Everything
/// else, including NaN and infinities, is 0.
pub fn coerce_f64(v: &Value) -> f64 {
    let n = match v {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().unwrap_or(0.0),
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

pub fn coerce_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

pub fn coerce_bool(v: &Value) -> bool {
    match v {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "1" | "active" | "enabled"
        ),
        _ => false,
    }
}

/// Parse the timestamp shapes the dashboards receive: RFC 3339 (converted to
/// UTC), naive date-times with `T` or a space, plain dates (midnight), and
/// epoch milliseconds.
pub fn parse_timestamp(v: &Value) -> Option<NaiveDateTime> {
    match v {
        Value::String(s) => parse_timestamp_str(s),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.naive_utc()),
        _ => None,
    }
}

pub fn parse_timestamp_str(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(coerce_f64(&raw(deserializer)))
}

/// Whole-unit counts. Fractions round up, so comparing the result against an
/// integer threshold gives the same answer as comparing the fraction.
/// Out-of-range values saturate.
pub fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let v = raw(deserializer);
    Ok(match v.as_i64() {
        Some(i) => i,
        None => coerce_f64(&v).ceil() as i64,
    })
}

pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(coerce_string(&raw(deserializer)))
}

/// Like [`string`], but a blank value becomes [`UNKNOWN`] so it still forms a group.
pub fn label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let s = coerce_string(&raw(deserializer));
    Ok(if s.is_empty() { unknown() } else { s })
}

pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(coerce_bool(&raw(deserializer)))
}

pub fn timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error> {
    Ok(parse_timestamp(&raw(deserializer)))
}

/// A nested sequence. Non-arrays become empty; elements that cannot be
/// decoded are dropped.
pub fn seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match raw(deserializer) {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| T::deserialize(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// A nested sequence of records. Non-arrays become empty; elements that are
/// not objects are dropped.
pub fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Record,
{
    Ok(match raw(deserializer) {
        Value::Array(items) => items.iter().filter_map(decode::<T>).collect(),
        _ => Vec::new(),
    })
}

/// A nested record, falling back to its `Default`.
pub fn record<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Record + Default,
{
    Ok(decode::<T>(&raw(deserializer)).unwrap_or_default())
}

pub fn terminal_status<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<TerminalStatus, D::Error> {
    let v = raw(deserializer);
    let status = match coerce_string(&v).to_ascii_lowercase().as_str() {
        "online" | "active" | "up" => TerminalStatus::Online,
        "offline" | "inactive" | "down" => TerminalStatus::Offline,
        _ => TerminalStatus::Unknown,
    };
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use serde_json::json;

    #[test]
    fn numbers_from_strings_and_junk() {
        assert_eq!(coerce_f64(&json!("12.5")), 12.5);
        assert_eq!(coerce_f64(&json!(" 1,200 ")), 1200.0);
        assert_eq!(coerce_f64(&json!("abc")), 0.0);
        assert_eq!(coerce_f64(&json!(null)), 0.0);
        assert_eq!(coerce_f64(&json!({"x": 1})), 0.0);
    }

    #[test]
    fn timestamps_in_several_shapes() {
        let d = parse_timestamp(&json!("2024-01-02")).unwrap();
        assert_eq!(d.date(), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(d.hour(), 0);

        let t = parse_timestamp(&json!("2024-01-02T13:45:00Z")).unwrap();
        assert_eq!(t.hour(), 13);

        let offset = parse_timestamp(&json!("2024-01-02T01:00:00+02:00")).unwrap();
        assert_eq!(offset.date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(offset.hour(), 23);

        let spaced = parse_timestamp(&json!("2024-01-02 08:30:00")).unwrap();
        assert_eq!(spaced.hour(), 8);

        let millis = parse_timestamp(&json!(1_704_067_200_000_i64)).unwrap();
        assert_eq!(millis.date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        assert!(parse_timestamp(&json!("not a date")).is_none());
        assert!(parse_timestamp(&json!(null)).is_none());
    }

    #[test]
    fn fractional_counts_round_up() {
        #[derive(serde::Deserialize)]
        struct Row {
            #[serde(deserialize_with = "integer")]
            n: i64,
        }
        let n = |v: Value| serde_json::from_value::<Row>(json!({ "n": v })).unwrap().n;
        assert_eq!(n(json!(10.5)), 11);
        assert_eq!(n(json!("0.2")), 1);
        assert_eq!(n(json!(-0.5)), 0);
        assert_eq!(n(json!(7)), 7);
        assert_eq!(n(json!("junk")), 0);
    }

    #[test]
    fn flags_accept_common_spellings() {
        assert!(coerce_bool(&json!(true)));
        assert!(coerce_bool(&json!("Active")));
        assert!(coerce_bool(&json!(1)));
        assert!(!coerce_bool(&json!("no")));
        assert!(!coerce_bool(&json!(null)));
    }
}
