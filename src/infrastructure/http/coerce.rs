//! Lenient readers for webhook JSON.
//!
//! Upstream services are inconsistent about types: ids and prices arrive as
//! numbers or numeric strings, flags as booleans, `0`/`1` or `"true"`, dates
//! with or without a time part. Each reader takes a list of candidate keys
//! and returns the first one that parses.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Flattens the shapes a list endpoint may answer with.
///
/// Accepts a bare array, `{ "data": [...] }`, or a single object.
pub fn list(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            Some(inner @ Value::Object(_)) => vec![inner],
            Some(_) | None => vec![Value::Object(map)],
        },
        _ => Vec::new(),
    }
}

/// First element of a list response, if any.
pub fn first(value: Value) -> Option<Value> {
    list(value).into_iter().next()
}

pub fn field<'a>(obj: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}

pub fn as_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

pub fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

pub fn number(obj: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find_map(as_f64)
}

pub fn integer(obj: &Value, keys: &[&str]) -> Option<i64> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find_map(as_i64)
}

/// Non-negative integer fields such as capacities and counts.
pub fn count(obj: &Value, keys: &[&str]) -> Option<u32> {
    integer(obj, keys).map(|n| n.clamp(0, i64::from(u32::MAX)) as u32)
}

pub fn text(obj: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().filter_map(|k| obj.get(*k)).find_map(|v| match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

pub fn flag(obj: &Value, keys: &[&str]) -> Option<bool> {
    keys.iter().filter_map(|k| obj.get(*k)).find_map(|v| match v {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "active" => Some(true),
            "false" | "0" | "no" | "inactive" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    if raw.len() == 10 {
        return parse_date(raw)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc());
    }
    None
}

/// Calendar date; a trailing time or zone is ignored.
pub fn date(obj: &Value, keys: &[&str]) -> Option<NaiveDate> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .filter_map(Value::as_str)
        .find_map(parse_date)
}

/// RFC 3339 timestamps, or naive timestamps read as UTC.
pub fn datetime(obj: &Value, keys: &[&str]) -> Option<DateTime<Utc>> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .filter_map(Value::as_str)
        .find_map(parse_datetime)
}

/// Id lists arrive as arrays of ids, arrays of `{ "id": .. }` objects, or
/// comma-separated strings.
pub fn id_list(obj: &Value, keys: &[&str]) -> Vec<i64> {
    let Some(value) = field(obj, keys) else {
        return Vec::new();
    };

    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(_) => integer(item, &["id", "event_id", "game_id"]),
                other => as_i64(other),
            })
            .collect(),
        Value::String(s) => s
            .split(',')
            .filter_map(|part| part.trim().parse::<i64>().ok())
            .collect(),
        other => as_i64(other).into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_shapes() {
        assert_eq!(list(json!([{ "id": 1 }, { "id": 2 }])).len(), 2);
        assert_eq!(list(json!({ "data": [{ "id": 1 }] })).len(), 1);
        assert_eq!(list(json!({ "id": 1 })).len(), 1);
        assert!(list(json!(null)).is_empty());
        assert!(first(json!([])).is_none());
    }

    #[test]
    fn test_numbers_accept_strings() {
        let obj = json!({ "price": "1799.50", "id": "42", "bad": "n/a", "whole": 3.0 });
        assert_eq!(number(&obj, &["price"]), Some(1799.5));
        assert_eq!(integer(&obj, &["id"]), Some(42));
        assert_eq!(integer(&obj, &["whole"]), Some(3));
        assert_eq!(number(&obj, &["bad"]), None);
        assert_eq!(number(&obj, &["missing", "price"]), Some(1799.5));
    }

    #[test]
    fn test_count_clamps_negative() {
        assert_eq!(count(&json!({ "n": -4 }), &["n"]), Some(0));
    }

    #[test]
    fn test_text_skips_blank_and_null() {
        let obj = json!({ "a": null, "b": "  ", "c": " Hyderabad " });
        assert_eq!(text(&obj, &["a", "b", "c"]).as_deref(), Some("Hyderabad"));
    }

    #[test]
    fn test_flag_variants() {
        let obj = json!({ "a": 1, "b": "false", "c": true });
        assert_eq!(flag(&obj, &["a"]), Some(true));
        assert_eq!(flag(&obj, &["b"]), Some(false));
        assert_eq!(flag(&obj, &["c"]), Some(true));
        assert_eq!(flag(&obj, &["d"]), None);
    }

    #[test]
    fn test_dates() {
        let obj = json!({
            "d": "2026-11-23T00:00:00.000Z",
            "ts": "2026-10-18 09:30:00",
            "rfc": "2026-10-18T09:30:00+05:30",
        });
        assert_eq!(date(&obj, &["d"]), NaiveDate::from_ymd_opt(2026, 11, 23));
        assert_eq!(
            datetime(&obj, &["ts"]).map(|d| d.to_rfc3339()),
            Some("2026-10-18T09:30:00+00:00".to_string())
        );
        assert_eq!(
            datetime(&obj, &["rfc"]).map(|d| d.to_rfc3339()),
            Some("2026-10-18T04:00:00+00:00".to_string())
        );
    }

    #[test]
    fn test_id_list_shapes() {
        assert_eq!(id_list(&json!({ "ids": [1, "2"] }), &["ids"]), vec![1, 2]);
        assert_eq!(
            id_list(&json!({ "ids": [{ "id": 5 }, { "id": "6" }] }), &["ids"]),
            vec![5, 6]
        );
        assert_eq!(id_list(&json!({ "ids": "3, 4" }), &["ids"]), vec![3, 4]);
        assert!(id_list(&json!({}), &["ids"]).is_empty());
    }
}
