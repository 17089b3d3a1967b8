//! Item model definition and hierarchy helpers.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ItemKind, Outcome, Recurrence, TimeOfDay};

/// The atomic unit of the dashboard: a goal or task ("decision").
///
/// Items live in one flat collection inside the user's document; goals nest
/// under goals and tasks attach to goals purely through `parentGoalId`
/// back-references. Field names follow the document wire format (camelCase).
///
/// `id`, `text`, and `kind` are serde-defaulted so documents containing
/// partially-formed items still deserialize; the save path refuses to
/// persist a collection with no well-formed item at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Opaque unique identifier, generated locally and never reused
    #[serde(default)]
    pub id: String,

    /// Whether this item is a goal or a task
    #[serde(rename = "type", default)]
    pub kind: ItemKind,

    /// Display text
    #[serde(default)]
    pub text: String,

    /// Back-reference to the parent goal's id, forming a forest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_goal_id: Option<String>,

    /// Completion state
    #[serde(default)]
    pub completed: bool,

    /// When the item was completed (ISO-8601 string)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_completed: Option<String>,

    /// How the item was resolved (audit trail)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,

    /// Recurrence cadence for routine tasks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurs: Option<Recurrence>,

    /// Bucket within the day for daily routine tasks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<TimeOfDay>,

    /// Visibility gate: hidden until this instant (ISO-8601 string after
    /// store-boundary normalization)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden_until: Option<String>,

    /// Calendar placement start (ISO date or date-time string)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled: Option<String>,

    /// Calendar placement end
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_end: Option<String>,

    /// Routine-task postponement timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_until: Option<String>,

    /// Free-text labels
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Decision-tree branches, present only on richer decision goals
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outcomes: Vec<Outcome>,

    /// Points weighed while deciding, present only on decision goals
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub considerations: Vec<String>,

    /// Document fields this crate does not model; preserved across a
    /// load/save round trip
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Item {
    /// Creates a new item with a freshly generated id.
    pub fn new(kind: ItemKind, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            text: text.into(),
            ..Self::default()
        }
    }

    /// Whether the item carries both a non-empty id and non-empty text.
    ///
    /// A collection with no persistable item must never overwrite
    /// previously-saved data.
    pub fn is_persistable(&self) -> bool {
        !self.id.is_empty() && !self.text.is_empty()
    }

    /// Whether the item is a goal with no parent (a display-order root).
    pub fn is_root_goal(&self) -> bool {
        self.kind == ItemKind::Goal && self.parent_goal_id.is_none()
    }

    /// Normalized text used for duplicate detection.
    pub fn normalized_text(&self) -> String {
        self.text.trim().to_lowercase()
    }
}

/// Collects the ids of an item and all of its transitive descendants.
///
/// Used when deleting: the whole subtree is filtered out of the collection
/// before saving. Descendants are found by repeated `parentGoalId` scans
/// since hierarchy is not an ownership relation.
pub fn collect_subtree_ids(items: &[Item], root_id: &str) -> HashSet<String> {
    let mut ids: HashSet<String> = HashSet::new();
    ids.insert(root_id.to_string());

    loop {
        let before = ids.len();
        for item in items {
            if let Some(parent) = &item.parent_goal_id {
                if ids.contains(parent) && !item.id.is_empty() {
                    ids.insert(item.id.clone());
                }
            }
        }
        if ids.len() == before {
            break;
        }
    }

    ids
}

/// Ids of root goals in collection order.
pub fn root_goal_ids(items: &[Item]) -> Vec<String> {
    items
        .iter()
        .filter(|i| i.is_root_goal() && !i.id.is_empty())
        .map(|i| i.id.clone())
        .collect()
}
