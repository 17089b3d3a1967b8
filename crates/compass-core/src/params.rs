//! Parameter structures for Compass operations
//!
//! Shared parameter structures usable across interfaces (CLI today, other
//! shells later) without framework-specific derives. Interface layers wrap
//! these with their own derives (clap args, JSON schema) and convert via
//! `From`/`into`, keeping the core free of UI framework concerns.
//!
//! JSON schema generation is available behind the `schema` feature.

use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    models::{Item, ItemKind, Recurrence, TimeOfDay},
    Result, SyncError,
};

/// Generic parameters for operations requiring just an item id.
///
/// Used for operations like complete-item and delete-item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The id of the item to operate on
    pub id: String,
}

/// Parameters for creating a new goal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateGoal {
    /// Display text of the goal (required)
    pub text: String,
    /// Optional parent goal id for nesting
    pub parent_goal_id: Option<String>,
    /// Optional calendar placement (ISO date)
    pub scheduled: Option<String>,
    /// Free-text labels
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreateGoal {
    /// Builds the new goal item with a freshly generated id.
    pub fn into_item(self) -> Item {
        let mut item = Item::new(ItemKind::Goal, self.text);
        item.parent_goal_id = self.parent_goal_id;
        item.scheduled = self.scheduled;
        item.tags = self.tags;
        item
    }
}

/// Parameters for creating a new task under a goal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateTask {
    /// Display text of the task (required)
    pub text: String,
    /// Id of the goal this task attaches to
    pub goal_id: Option<String>,
    /// Recurrence cadence ('daily', 'weekly', or 'monthly')
    pub recurs: Option<String>,
    /// Time-of-day bucket for daily routines ('firstThing', 'morning',
    /// 'afternoon', 'evening', or 'endOfDay')
    pub time_of_day: Option<String>,
    /// Optional calendar placement (ISO date)
    pub scheduled: Option<String>,
}

impl CreateTask {
    /// Validate task creation parameters and return the parsed recurrence
    /// and time-of-day bucket.
    ///
    /// # Errors
    ///
    /// * `SyncError::InvalidInput` - When the recurrence or bucket string
    ///   is invalid, or a bucket is given without daily recurrence
    pub fn validate(&self) -> Result<(Option<Recurrence>, Option<TimeOfDay>)> {
        let recurs = self
            .recurs
            .as_deref()
            .map(|s| {
                Recurrence::from_str(s).map_err(|_| {
                    SyncError::invalid_input("recurs")
                        .with_reason(format!("Invalid recurrence: {s}. Must be 'daily', 'weekly', or 'monthly'"))
                })
            })
            .transpose()?;

        let time_of_day = self
            .time_of_day
            .as_deref()
            .map(|s| {
                TimeOfDay::from_str(s).map_err(|_| {
                    SyncError::invalid_input("time_of_day").with_reason(format!(
                        "Invalid time of day: {s}. Must be 'firstThing', 'morning', \
                         'afternoon', 'evening', or 'endOfDay'"
                    ))
                })
            })
            .transpose()?;

        if time_of_day.is_some() && recurs != Some(Recurrence::Daily) {
            return Err(SyncError::invalid_input("time_of_day")
                .with_reason("Time-of-day buckets only apply to daily routines"));
        }

        Ok((recurs, time_of_day))
    }

    /// Builds the new task item with a freshly generated id.
    ///
    /// # Errors
    ///
    /// Fails when [`CreateTask::validate`] fails.
    pub fn into_item(self) -> Result<Item> {
        let (recurs, time_of_day) = self.validate()?;

        let mut item = Item::new(ItemKind::Task, self.text);
        item.parent_goal_id = self.goal_id;
        item.recurs = recurs;
        item.time_of_day = time_of_day;
        item.scheduled = self.scheduled;
        Ok(item)
    }
}

/// Parameters for completing an item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CompleteItem {
    /// Id of the item to complete (required)
    pub id: String,
    /// How the item was resolved
    pub resolution: Option<String>,
}

impl CompleteItem {
    /// Applies the completion to the matching item in place.
    ///
    /// Returns false when no item carries the id.
    pub fn apply(&self, items: &mut [Item]) -> bool {
        let Some(item) = items.iter_mut().find(|i| i.id == self.id) else {
            return false;
        };
        item.completed = true;
        item.date_completed = Some(jiff::Timestamp::now().to_string());
        item.resolution = self.resolution.clone();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task_validate_daily_with_bucket() {
        let params = CreateTask {
            text: "Stretch".to_string(),
            recurs: Some("daily".to_string()),
            time_of_day: Some("firstThing".to_string()),
            ..CreateTask::default()
        };

        let (recurs, bucket) = params.validate().unwrap();
        assert_eq!(recurs, Some(Recurrence::Daily));
        assert_eq!(bucket, Some(TimeOfDay::FirstThing));
    }

    #[test]
    fn test_create_task_validate_rejects_bucket_without_daily() {
        let params = CreateTask {
            text: "Run".to_string(),
            recurs: Some("weekly".to_string()),
            time_of_day: Some("morning".to_string()),
            ..CreateTask::default()
        };

        match params.validate().unwrap_err() {
            SyncError::InvalidInput { field, .. } => assert_eq!(field, "time_of_day"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_create_task_validate_rejects_unknown_recurrence() {
        let params = CreateTask {
            text: "Run".to_string(),
            recurs: Some("fortnightly".to_string()),
            ..CreateTask::default()
        };

        match params.validate().unwrap_err() {
            SyncError::InvalidInput { field, reason } => {
                assert_eq!(field, "recurs");
                assert!(reason.contains("fortnightly"));
            }
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_create_goal_into_item() {
        let item = CreateGoal {
            text: "Get fit".to_string(),
            tags: vec!["health".to_string()],
            ..CreateGoal::default()
        }
        .into_item();

        assert_eq!(item.kind, ItemKind::Goal);
        assert!(item.is_persistable());
        assert!(item.is_root_goal());
        assert_eq!(item.tags, vec!["health"]);
    }

    #[test]
    fn test_complete_item_apply() {
        let mut items = vec![Item::new(ItemKind::Task, "Do it")];
        let id = items[0].id.clone();

        let done = CompleteItem {
            id,
            resolution: Some("Shipped".to_string()),
        }
        .apply(&mut items);

        assert!(done);
        assert!(items[0].completed);
        assert!(items[0].date_completed.is_some());
        assert_eq!(items[0].resolution.as_deref(), Some("Shipped"));
    }

    #[test]
    fn test_complete_item_apply_unknown_id() {
        let mut items = vec![Item::new(ItemKind::Task, "Do it")];
        let done = CompleteItem {
            id: "missing".to_string(),
            resolution: None,
        }
        .apply(&mut items);
        assert!(!done);
    }
}
