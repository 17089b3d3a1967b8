//! Tag enumerations for items: kind, recurrence, and time-of-day buckets.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of item kinds.
///
/// Goals and tasks share one flat collection; the kind tag is what separates
/// them. Defaults to `Task` so items from older documents that predate the
/// tag still deserialize.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A goal; may nest under another goal via `parentGoalId`
    Goal,

    /// A task; attaches to a goal via `parentGoalId`
    #[default]
    Task,
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "goal" => Ok(ItemKind::Goal),
            "task" => Ok(ItemKind::Task),
            _ => Err(format!("Invalid item kind: {s}")),
        }
    }
}

impl ItemKind {
    /// Convert to document string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Goal => "goal",
            ItemKind::Task => "task",
        }
    }
}

/// Recurrence cadence for routine tasks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    Daily,
    Weekly,
    Monthly,
}

impl FromStr for Recurrence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Recurrence::Daily),
            "weekly" => Ok(Recurrence::Weekly),
            "monthly" => Ok(Recurrence::Monthly),
            _ => Err(format!("Invalid recurrence: {s}")),
        }
    }
}

impl Recurrence {
    /// Convert to document string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Recurrence::Daily => "daily",
            Recurrence::Weekly => "weekly",
            Recurrence::Monthly => "monthly",
        }
    }
}

/// Named buckets partitioning daily routine tasks across the day.
///
/// Variant order is display order on the routine board.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum TimeOfDay {
    FirstThing,
    Morning,
    Afternoon,
    Evening,
    EndOfDay,
}

impl FromStr for TimeOfDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "firstthing" | "first_thing" | "first-thing" => Ok(TimeOfDay::FirstThing),
            "morning" => Ok(TimeOfDay::Morning),
            "afternoon" => Ok(TimeOfDay::Afternoon),
            "evening" => Ok(TimeOfDay::Evening),
            "endofday" | "end_of_day" | "end-of-day" => Ok(TimeOfDay::EndOfDay),
            _ => Err(format!("Invalid time of day: {s}")),
        }
    }
}

impl TimeOfDay {
    /// All buckets in display order.
    pub const ALL: [TimeOfDay; 5] = [
        TimeOfDay::FirstThing,
        TimeOfDay::Morning,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
        TimeOfDay::EndOfDay,
    ];

    /// Convert to document string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::FirstThing => "firstThing",
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::EndOfDay => "endOfDay",
        }
    }

    /// Human-readable bucket heading.
    pub fn label(&self) -> &'static str {
        match self {
            TimeOfDay::FirstThing => "First thing",
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::EndOfDay => "End of day",
        }
    }
}
