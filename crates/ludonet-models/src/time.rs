//! Pure conversion rules for timestamp-bearing fields.
//!
//! The API reports times as epoch milliseconds or epoch seconds. These
//! rules rewrite such fields into RFC 3339 UTC strings inside the
//! record. Every rule is total: a value that is not a non-negative
//! integer, or that lies outside chrono's representable range, is
//! returned unchanged — a conversion never panics and never drops data.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde_json::Value;

fn non_negative(value: &Value) -> Option<i64> {
    value.as_i64().filter(|n| *n >= 0)
}

fn rfc3339(dt: DateTime<Utc>, format: SecondsFormat) -> Value {
    Value::String(dt.to_rfc3339_opts(format, true))
}

/// Epoch milliseconds → RFC 3339 timestamp.
pub fn timestamp_from_millis(value: Value) -> Value {
    match non_negative(&value)
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
    {
        Some(dt) => rfc3339(dt, SecondsFormat::Millis),
        None => value,
    }
}

/// Epoch seconds → RFC 3339 timestamp.
pub fn timestamp_from_seconds(value: Value) -> Value {
    match non_negative(&value)
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
    {
        Some(dt) => rfc3339(dt, SecondsFormat::Secs),
        None => value,
    }
}

/// Interval record → its `start`/`end` epoch-seconds sub-fields
/// converted in place; every other key is preserved.
pub fn interval(value: Value) -> Value {
    let Value::Object(mut map) = value else {
        return value;
    };
    for key in ["start", "end"] {
        if let Some(slot) = map.get_mut(key) {
            let raw = slot.take();
            *slot = timestamp_from_seconds(raw);
        }
    }
    Value::Object(map)
}

/// Rating-history points: a list of `[year, month, day, rating]`
/// quadruples → a list of `{date, rating}` objects with an ISO date.
/// Elements that do not match the quadruple shape are kept as-is.
pub fn rating_history_points(value: Value) -> Value {
    let Value::Array(points) = value else {
        return value;
    };
    Value::Array(points.into_iter().map(rating_point).collect())
}

fn rating_point(point: Value) -> Value {
    let Some(quad) = as_quadruple(&point) else {
        return point;
    };
    let (year, month, day, rating) = quad;
    let Some(date) = chrono::NaiveDate::from_ymd_opt(year, month, day)
    else {
        return point;
    };
    serde_json::json!({
        "date": date.format("%Y-%m-%d").to_string(),
        "rating": rating,
    })
}

fn as_quadruple(point: &Value) -> Option<(i32, u32, u32, i64)> {
    let items = point.as_array()?;
    if items.len() != 4 {
        return None;
    }
    let year = i32::try_from(items[0].as_i64()?).ok()?;
    let month = u32::try_from(items[1].as_i64()?).ok()?;
    let day = u32::try_from(items[2].as_i64()?).ok()?;
    let rating = items[3].as_i64()?;
    Some((year, month, day, rating))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_millis_converts_to_rfc3339() {
        // 1000 ms = one second after the epoch.
        let converted = timestamp_from_millis(json!(1000));
        let text = converted.as_str().unwrap();
        let parsed = DateTime::parse_from_rfc3339(text).unwrap();
        assert_eq!(parsed, Utc.timestamp_opt(1, 0).unwrap());
    }

    #[test]
    fn test_millis_keeps_sub_second_precision() {
        let converted = timestamp_from_millis(json!(1500));
        let text = converted.as_str().unwrap();
        let parsed = DateTime::parse_from_rfc3339(text).unwrap();
        assert_eq!(parsed.timestamp_millis(), 1500);
    }

    #[test]
    fn test_seconds_converts_to_rfc3339() {
        let converted = timestamp_from_seconds(json!(86_400));
        let text = converted.as_str().unwrap();
        let parsed = DateTime::parse_from_rfc3339(text).unwrap();
        assert_eq!(parsed, Utc.timestamp_opt(86_400, 0).unwrap());
    }

    #[test]
    fn test_zero_is_the_epoch() {
        let converted = timestamp_from_millis(json!(0));
        let text = converted.as_str().unwrap();
        let parsed = DateTime::parse_from_rfc3339(text).unwrap();
        assert_eq!(parsed, Utc.timestamp_opt(0, 0).unwrap());
    }

    #[test]
    fn test_negative_value_is_left_unchanged() {
        assert_eq!(timestamp_from_millis(json!(-5)), json!(-5));
    }

    #[test]
    fn test_non_integer_is_left_unchanged() {
        assert_eq!(
            timestamp_from_millis(json!("already a string")),
            json!("already a string")
        );
        assert_eq!(timestamp_from_millis(json!(null)), json!(null));
    }

    #[test]
    fn test_out_of_range_value_is_left_unchanged() {
        // Larger than chrono can represent; must not panic.
        let huge = json!(i64::MAX);
        assert_eq!(timestamp_from_millis(huge.clone()), huge);
    }

    #[test]
    fn test_interval_converts_start_and_end_only() {
        let converted = interval(json!({
            "start": 0,
            "end": 60,
            "games": 3,
        }));
        let start = converted["start"].as_str().unwrap();
        let end = converted["end"].as_str().unwrap();
        assert_eq!(
            DateTime::parse_from_rfc3339(start).unwrap(),
            Utc.timestamp_opt(0, 0).unwrap()
        );
        assert_eq!(
            DateTime::parse_from_rfc3339(end).unwrap(),
            Utc.timestamp_opt(60, 0).unwrap()
        );
        assert_eq!(converted["games"], 3);
    }

    #[test]
    fn test_interval_on_non_object_is_left_unchanged() {
        assert_eq!(interval(json!([1, 2])), json!([1, 2]));
    }

    #[test]
    fn test_rating_history_points_convert() {
        let converted = rating_history_points(json!([
            [2023, 1, 15, 1850],
            [2023, 1, 16, 1862],
        ]));
        assert_eq!(
            converted,
            json!([
                {"date": "2023-01-15", "rating": 1850},
                {"date": "2023-01-16", "rating": 1862},
            ])
        );
    }

    #[test]
    fn test_rating_history_malformed_point_is_kept() {
        let converted =
            rating_history_points(json!([[2023, 13, 40, 1850], "junk"]));
        // Month 13 is not a date; the raw quadruple survives.
        assert_eq!(converted, json!([[2023, 13, 40, 1850], "junk"]));
    }
}
