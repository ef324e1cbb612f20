use serde_json::{Map, Value};
use thiserror::Error;

use super::model::{AvailabilityModel, BlockedRange};
use crate::calendar::date_math::parse_date;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MappingError {
    #[error("Availability record must be an object, found {0}")]
    NotAnObject(&'static str),
}

/// Maps a raw availability record from the room feed.
///
/// Only a record that is not a JSON object is rejected. Missing, null or
/// malformed fields fall back to the unknown defaults: closed, no first-open
/// date, no stay limits, no blocked ranges. Blocked ranges may arrive as an
/// object of `[start, end]` pairs keyed by anything, or as a bare array of
/// pairs; unusable pairs are dropped.
pub fn map_availability(raw: &Value) -> Result<AvailabilityModel, MappingError> {
    let Value::Object(fields) = raw else {
        return Err(MappingError::NotAnObject(json_kind(raw)));
    };

    Ok(AvailabilityModel {
        open_now: read_flag(fields, "available_now"),
        first_open_date: read_date(fields, "available_from"),
        minimum_stay_months: read_months(fields, "minimum_stay_months"),
        maximum_stay_months: read_months(fields, "maximum_stay_months"),
        blocked_ranges: read_blocked_ranges(fields, "unavailable_dates_range"),
    })
}

fn read_flag(fields: &Map<String, Value>, key: &str) -> bool {
    match fields.get(key) {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Null) | None => false,
        Some(other) => {
            tracing::warn!("Ignoring non-boolean {}: {}", key, other);
            false
        }
    }
}

fn read_date(fields: &Map<String, Value>, key: &str) -> Option<chrono::NaiveDate> {
    match fields.get(key)? {
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => parse_date(text)
            .map_err(|e| tracing::warn!("Ignoring {}: {}", key, e))
            .ok(),
        Value::Null => None,
        other => {
            tracing::warn!("Ignoring non-string {}: {}", key, other);
            None
        }
    }
}

fn read_months(fields: &Map<String, Value>, key: &str) -> Option<f64> {
    let months = match fields.get(key)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    match months {
        Some(months) if months.is_finite() && months > 0.0 => Some(months),
        Some(_) | None => {
            if let Some(raw) = fields.get(key).filter(|raw| !raw.is_null()) {
                tracing::warn!("Ignoring unusable {}: {}", key, raw);
            }
            None
        }
    }
}

fn read_blocked_ranges(fields: &Map<String, Value>, key: &str) -> Vec<BlockedRange> {
    let pairs: Vec<&Value> = match fields.get(key) {
        Some(Value::Object(entries)) => entries.values().collect(),
        Some(Value::Array(entries)) => entries.iter().collect(),
        Some(Value::Null) | None => return Vec::new(),
        Some(other) => {
            tracing::warn!("Ignoring {} of unexpected shape: {}", key, other);
            return Vec::new();
        }
    };

    pairs.into_iter()
        .filter_map(|pair| {
            let range = read_range(pair);
            if range.is_none() {
                tracing::warn!("Skipping unusable blocked range: {}", pair);
            }
            range
        })
        .collect()
}

fn read_range(pair: &Value) -> Option<BlockedRange> {
    let Value::Array(bounds) = pair else {
        return None;
    };
    let [Value::String(start), Value::String(end)] = bounds.as_slice() else {
        return None;
    };

    let start = parse_date(start).ok()?;
    let end = parse_date(end).ok()?;
    Some(BlockedRange::new(start, end))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn maps_complete_record() {
        let raw = json!({
            "available_now": false,
            "available_from": "2024-08-01",
            "minimum_stay_months": 3,
            "maximum_stay_months": 12,
            "unavailable_dates_range": {
                "1719792000": ["2024-07-01", "2024-07-15"],
                "1725148800": ["2024-09-01", "2024-09-30"]
            }
        });

        let model = map_availability(&raw).unwrap();

        assert_eq!(
            model,
            AvailabilityModel {
                open_now: false,
                first_open_date: Some(date(2024, 8, 1)),
                minimum_stay_months: Some(3.0),
                maximum_stay_months: Some(12.0),
                blocked_ranges: vec![
                    BlockedRange::new(date(2024, 7, 1), date(2024, 7, 15)),
                    BlockedRange::new(date(2024, 9, 1), date(2024, 9, 30)),
                ],
            }
        );
    }

    #[test]
    fn empty_record_maps_to_unknown_defaults() {
        let model = map_availability(&json!({})).unwrap();

        assert_eq!(model, AvailabilityModel::default());
    }

    #[test]
    fn non_object_record_is_rejected() {
        assert_eq!(
            map_availability(&json!(["2024-01-01"])),
            Err(MappingError::NotAnObject("array"))
        );
        assert_eq!(map_availability(&Value::Null), Err(MappingError::NotAnObject("null")));
    }

    #[test]
    fn malformed_fields_fall_back_to_defaults() {
        let raw = json!({
            "available_now": "yes",
            "available_from": "sometime soon",
            "minimum_stay_months": -2,
            "maximum_stay_months": {"months": 6},
            "unavailable_dates_range": "2024-07-01/2024-07-15"
        });

        let model = map_availability(&raw).unwrap();

        assert_eq!(model, AvailabilityModel::default());
    }

    #[test]
    fn accepts_numeric_strings_and_timestamps() {
        let raw = json!({
            "available_now": true,
            "available_from": "2024-08-01T00:00:00+02:00",
            "minimum_stay_months": "1.5"
        });

        let model = map_availability(&raw).unwrap();

        assert!(model.open_now);
        assert_eq!(model.first_open_date, Some(date(2024, 8, 1)));
        assert_eq!(model.minimum_stay_months, Some(1.5));
    }

    #[test]
    fn blocked_ranges_as_array_of_pairs() {
        let raw = json!({
            "unavailable_dates_range": [
                ["2024-07-01", "2024-07-15"],
                ["2024-09-01"],
                ["2024-10-01", null],
                "2024-11-01",
                ["2024-12-20", "2024-12-01"]
            ]
        });

        let model = map_availability(&raw).unwrap();

        assert_eq!(
            model.blocked_ranges,
            vec![
                BlockedRange::new(date(2024, 7, 1), date(2024, 7, 15)),
                BlockedRange::new(date(2024, 12, 20), date(2024, 12, 1)),
            ]
        );
    }

    #[test]
    fn null_fields_are_treated_as_missing() {
        let raw = json!({
            "available_now": null,
            "available_from": null,
            "minimum_stay_months": null,
            "maximum_stay_months": null,
            "unavailable_dates_range": null
        });

        assert_eq!(map_availability(&raw).unwrap(), AvailabilityModel::default());
    }
}
