//! The fixed demo dataset served to anonymous sessions.
//!
//! The seed is embedded at compile time and never mutated. Two obligations
//! apply to it: calendar-bearing items are time-shifted forward on every
//! anonymous read so the demo always looks "upcoming", and a structural
//! signature (calendar fields stripped) detects untouched demo data so it is
//! never persisted anywhere.

use std::sync::OnceLock;

use jiff::civil::Date;
use serde_json::Value;

use crate::models::Item;

/// Days the earliest sample entry lands past "today" after shifting.
const SHIFT_MARGIN_DAYS: i32 = 7;

/// The immutable seed collection.
pub fn sample_items() -> &'static [Item] {
    static SEED: OnceLock<Vec<Item>> = OnceLock::new();
    SEED.get_or_init(|| {
        serde_json::from_str(include_str!("../assets/sample.json"))
            .expect("embedded sample dataset is valid")
    })
}

/// A copy of the seed with calendar entries shifted forward relative to
/// `today`.
pub fn shifted_sample(today: Date) -> Vec<Item> {
    shift_items(sample_items().to_vec(), today)
}

/// Shifts every `scheduled`/`scheduledEnd` forward so the earliest entry
/// lands at least one week past `today`. Items already in the future are
/// left untouched; date-only granularity is preserved (only the leading
/// `YYYY-MM-DD` is rewritten).
pub fn shift_items(mut items: Vec<Item>, today: Date) -> Vec<Item> {
    let Some(earliest) = items
        .iter()
        .filter_map(|i| i.scheduled.as_deref())
        .filter_map(parse_leading_date)
        .min()
    else {
        return items;
    };

    if earliest >= today {
        return items;
    }

    let shift_days = (today - earliest).get_days() + SHIFT_MARGIN_DAYS;

    for item in &mut items {
        if let Some(s) = &item.scheduled {
            item.scheduled = Some(shift_date_string(s, shift_days));
        }
        if let Some(s) = &item.scheduled_end {
            item.scheduled_end = Some(shift_date_string(s, shift_days));
        }
    }

    items
}

/// Whether `items` is structurally the sample dataset once the volatile
/// calendar fields are ignored.
///
/// `scheduled`/`scheduledEnd` are stripped on both sides because the
/// anonymous read path time-shifts them per load.
pub fn matches_sample(items: &[Item]) -> bool {
    static SEED_SIGNATURE: OnceLock<Vec<Value>> = OnceLock::new();
    let seed = SEED_SIGNATURE.get_or_init(|| strip_calendar_fields(sample_items()));

    if items.len() != seed.len() {
        return false;
    }
    strip_calendar_fields(items) == *seed
}

fn strip_calendar_fields(items: &[Item]) -> Vec<Value> {
    items
        .iter()
        .map(|item| {
            let mut value = serde_json::to_value(item).expect("item serializes");
            if let Value::Object(map) = &mut value {
                map.remove("scheduled");
                map.remove("scheduledEnd");
            }
            value
        })
        .collect()
}

fn parse_leading_date(s: &str) -> Option<Date> {
    s.get(..10)?.parse().ok()
}

fn shift_date_string(s: &str, days: i32) -> String {
    let Some(date) = parse_leading_date(s) else {
        return s.to_string();
    };
    let Ok(shifted) = date.checked_add(jiff::Span::new().days(i64::from(days))) else {
        return s.to_string();
    };
    format!("{}{}", shifted, &s[10..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_seed_parses_and_is_nonempty() {
        let items = sample_items();
        assert!(items.len() >= 8);
        assert!(items.iter().any(|i| i.scheduled.is_some()));
        assert!(items.iter().any(|i| !i.outcomes.is_empty()));
    }

    #[test]
    fn test_shift_moves_earliest_a_week_past_today() {
        let items = vec![Item {
            id: "a".to_string(),
            text: "x".to_string(),
            scheduled: Some("2025-06-01".to_string()),
            ..Item::default()
        }];

        let shifted = shift_items(items, date(2025, 7, 1));
        // 30 days behind today plus the one-week margin
        assert_eq!(shifted[0].scheduled.as_deref(), Some("2025-07-08"));
    }

    #[test]
    fn test_shift_preserves_relative_spacing_and_ends() {
        let items = vec![
            Item {
                id: "a".to_string(),
                text: "x".to_string(),
                scheduled: Some("2024-03-04".to_string()),
                ..Item::default()
            },
            Item {
                id: "b".to_string(),
                text: "y".to_string(),
                scheduled: Some("2024-03-11".to_string()),
                scheduled_end: Some("2024-03-15".to_string()),
                ..Item::default()
            },
        ];

        let today = date(2024, 3, 18);
        let shifted = shift_items(items, today);

        let a: Date = shifted[0].scheduled.as_deref().unwrap().parse().unwrap();
        let b: Date = shifted[1].scheduled.as_deref().unwrap().parse().unwrap();
        let b_end: Date = shifted[1].scheduled_end.as_deref().unwrap().parse().unwrap();

        assert_eq!(a, date(2024, 3, 25)); // today + 7
        assert_eq!((b - a).get_days(), 7);
        assert_eq!((b_end - b).get_days(), 4);
    }

    #[test]
    fn test_future_dates_are_left_unmodified() {
        let items = vec![Item {
            id: "a".to_string(),
            text: "x".to_string(),
            scheduled: Some("2030-01-01".to_string()),
            ..Item::default()
        }];
        let shifted = shift_items(items.clone(), date(2024, 1, 1));
        assert_eq!(shifted, items);
    }

    #[test]
    fn test_shift_keeps_time_suffix() {
        let items = vec![Item {
            id: "a".to_string(),
            text: "x".to_string(),
            scheduled: Some("2024-01-01T09:30:00Z".to_string()),
            ..Item::default()
        }];
        let shifted = shift_items(items, date(2024, 1, 8));
        assert_eq!(
            shifted[0].scheduled.as_deref(),
            Some("2024-01-15T09:30:00Z")
        );
    }

    #[test]
    fn test_matches_sample_ignores_shifted_calendar() {
        let shifted = shifted_sample(date(2030, 6, 1));
        assert!(matches_sample(&shifted));
        assert!(matches_sample(sample_items()));
    }

    #[test]
    fn test_matches_sample_rejects_edits() {
        let mut edited = shifted_sample(date(2030, 6, 1));
        edited[0].text = "My own goal now".to_string();
        assert!(!matches_sample(&edited));

        let mut extended = shifted_sample(date(2030, 6, 1));
        extended.push(Item::new(crate::models::ItemKind::Task, "New task"));
        assert!(!matches_sample(&extended));
    }

    #[test]
    fn test_matches_sample_rejects_completion_toggle() {
        let mut edited = shifted_sample(date(2030, 6, 1));
        edited[1].completed = true;
        assert!(!matches_sample(&edited));
    }
}
