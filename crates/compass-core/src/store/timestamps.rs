//! Timestamp normalization at the store boundary.
//!
//! Remote document stores hand back timestamp fields as native objects of
//! the shape `{seconds, nanoseconds}`. Consumers compare fields like
//! `hiddenUntil` using string parsing only, so every timestamp-shaped value
//! is converted to an ISO-8601 string before the collection leaves the
//! store module. The same pass applies the one-time `hideUntil` →
//! `hiddenUntil` field rename from an early document revision.

use jiff::Timestamp;
use serde_json::{Map, Value};

const LEGACY_HIDDEN_UNTIL: &str = "hideUntil";
const HIDDEN_UNTIL: &str = "hiddenUntil";

/// Normalizes a raw item value in place: legacy renames, then recursive
/// timestamp-object conversion.
pub fn normalize_value(value: &mut Value) {
    if let Value::Object(map) = value {
        apply_legacy_renames(map);
    }
    convert_timestamp_objects(value);
}

/// Moves fields renamed in old document revisions to their current names.
fn apply_legacy_renames(map: &mut Map<String, Value>) {
    if !map.contains_key(HIDDEN_UNTIL) {
        if let Some(v) = map.remove(LEGACY_HIDDEN_UNTIL) {
            map.insert(HIDDEN_UNTIL.to_string(), v);
        }
    } else {
        map.remove(LEGACY_HIDDEN_UNTIL);
    }
}

/// Recursively replaces every timestamp-shaped object with its ISO-8601
/// string rendering.
fn convert_timestamp_objects(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if let Some(ts) = as_timestamp(map) {
                *value = Value::String(ts.to_string());
                return;
            }
            for v in map.values_mut() {
                convert_timestamp_objects(v);
            }
        }
        Value::Array(elements) => {
            for v in elements.iter_mut() {
                convert_timestamp_objects(v);
            }
        }
        _ => {}
    }
}

/// Interprets a map as a remote-native timestamp if it has exactly the
/// `{seconds, nanoseconds}` shape (the `nanos` spelling also occurs).
fn as_timestamp(map: &Map<String, Value>) -> Option<Timestamp> {
    if map.len() != 2 {
        return None;
    }
    let seconds = map.get("seconds")?.as_i64()?;
    let nanos = map
        .get("nanoseconds")
        .or_else(|| map.get("nanos"))?
        .as_i64()?;

    Timestamp::new(seconds, i32::try_from(nanos).ok()?).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_timestamp_object_becomes_iso_string() {
        let mut value = json!({
            "id": "a",
            "text": "Hidden task",
            "hiddenUntil": {"seconds": 1704067200, "nanoseconds": 0}
        });
        normalize_value(&mut value);
        assert_eq!(value["hiddenUntil"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_normalized_string_parses_back_to_original_instant() {
        let mut value = json!({"hiddenUntil": {"seconds": 1704067200, "nanos": 500_000_000}});
        normalize_value(&mut value);

        let parsed: Timestamp = value["hiddenUntil"].as_str().unwrap().parse().unwrap();
        assert_eq!(parsed, Timestamp::new(1704067200, 500_000_000).unwrap());
    }

    #[test]
    fn test_string_timestamps_pass_through_unchanged() {
        let mut value = json!({"hiddenUntil": "2024-06-01T12:00:00Z", "text": "x"});
        let before = value.clone();
        normalize_value(&mut value);
        assert_eq!(value, before);
    }

    #[test]
    fn test_non_timestamp_two_key_object_is_left_alone() {
        let mut value = json!({"outcome": {"seconds": "not a number", "nanoseconds": 0}});
        let before = value.clone();
        normalize_value(&mut value);
        assert_eq!(value, before);
    }

    #[test]
    fn test_nested_timestamps_in_arrays_are_converted() {
        let mut value = json!({
            "history": [{"at": {"seconds": 1704067200, "nanoseconds": 0}}]
        });
        normalize_value(&mut value);
        assert_eq!(value["history"][0]["at"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_legacy_hide_until_is_renamed() {
        let mut value = json!({"id": "a", "hideUntil": "2024-01-01T00:00:00Z"});
        normalize_value(&mut value);
        assert!(value.get("hideUntil").is_none());
        assert_eq!(value["hiddenUntil"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_legacy_rename_never_clobbers_current_field() {
        let mut value = json!({
            "hideUntil": "2020-01-01T00:00:00Z",
            "hiddenUntil": "2024-01-01T00:00:00Z"
        });
        normalize_value(&mut value);
        assert_eq!(value["hiddenUntil"], "2024-01-01T00:00:00Z");
        assert!(value.get("hideUntil").is_none());
    }
}
