// Tolerant field decoders.
//
// The backend is a thin layer over a SQL store and is loose about column
// types: timestamps arrive as RFC 3339, bare `YYYY-MM-DD HH:MM:SS` or a
// plain date, flags as `0/1` or booleans, list columns either as arrays or
// as JSON-encoded text, and any column may be `null`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

const SQL_DATETIME: &str = "%Y-%m-%d %H:%M:%S";
const SQL_DATE: &str = "%Y-%m-%d";

/// Parse a backend timestamp. Naive values are taken as UTC, plain dates as
/// midnight UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, SQL_DATETIME)
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f").ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, SQL_DATE)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// `Option<DateTime<Utc>>` from a nullable timestamp. Values that do not
/// parse decode as `None` so one odd row never fails a whole response.
pub fn opt_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => {
            let parsed = parse_timestamp(&s);
            if parsed.is_none() {
                tracing::debug!(value = %s, "unrecognized timestamp, treating as absent");
            }
            parsed
        }
        other => {
            tracing::debug!(value = %other, "non-string timestamp, treating as absent");
            None
        }
    })
}

/// `T::default()` for an explicit `null`, otherwise `T` as usual.
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `0|1` flag, also accepting JSON booleans and null (as 0).
pub fn flag<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::Bool(b) => Ok(u8::from(b)),
        Value::Number(n) => n
            .as_u64()
            .and_then(|v| u8::try_from(v).ok())
            .ok_or_else(|| D::Error::custom(format!("invalid flag value: {n}"))),
        Value::String(s) => s
            .trim()
            .parse::<u8>()
            .map_err(|_| D::Error::custom(format!("invalid flag value: {s:?}"))),
        other => Err(D::Error::custom(format!("invalid flag value: {other}"))),
    }
}

/// A list of strings sent either as an array or as JSON-encoded text.
/// Undecodable text yields an empty list.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => strings_from(items),
        Value::String(text) => match serde_json::from_str::<Value>(&text) {
            Ok(Value::Array(items)) => strings_from(items),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    })
}

/// Keep a list column as JSON-encoded text. Arrays are re-encoded so that
/// callers always decode from one representation.
pub fn json_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

fn strings_from(items: Vec<Value>) -> Vec<String> {
    items
        .into_iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect()
}
