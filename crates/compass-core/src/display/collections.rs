//! Collection wrapper types for displaying groups of items.

use std::fmt;

use crate::models::{Item, ItemKind, Recurrence, TimeOfDay};

/// Newtype wrapper formatting the full goal forest as markdown.
///
/// Root goals appear in the given display order (self-healed order from the
/// engine); children indent beneath their parent, found by `parentGoalId`
/// scans. Handles the empty collection gracefully.
pub struct GoalTree<'a> {
    items: &'a [Item],
    order: &'a [String],
}

impl<'a> GoalTree<'a> {
    pub fn new(items: &'a [Item], order: &'a [String]) -> Self {
        Self { items, order }
    }

    fn write_children(
        &self,
        f: &mut fmt::Formatter<'_>,
        parent_id: &str,
        depth: usize,
    ) -> fmt::Result {
        for child in self
            .items
            .iter()
            .filter(|i| i.parent_goal_id.as_deref() == Some(parent_id))
        {
            writeln!(f, "{}- {}", "  ".repeat(depth), child)?;
            if !child.id.is_empty() {
                self.write_children(f, &child.id, depth + 1)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for GoalTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let roots: Vec<&Item> = self
            .order
            .iter()
            .filter_map(|id| self.items.iter().find(|i| &i.id == id))
            .collect();

        if roots.is_empty() {
            writeln!(f, "No goals yet.")?;
            return Ok(());
        }

        for goal in roots {
            writeln!(f, "## {} `{}`", goal.text, goal.id)?;
            writeln!(f)?;
            self.write_children(f, &goal.id, 0)?;
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Newtype wrapper formatting the daily routine board.
///
/// Daily recurring tasks group under their time-of-day bucket; weekly and
/// monthly routines follow in their own section.
pub struct RoutineBoard<'a>(pub &'a [Item]);

impl RoutineBoard<'_> {
    fn daily_in(&self, bucket: Option<TimeOfDay>) -> Vec<&Item> {
        self.0
            .iter()
            .filter(|i| i.kind == ItemKind::Task && i.recurs == Some(Recurrence::Daily))
            .filter(|i| i.time_of_day == bucket)
            .collect()
    }
}

impl fmt::Display for RoutineBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut any = false;

        for bucket in TimeOfDay::ALL {
            let tasks = self.daily_in(Some(bucket));
            if tasks.is_empty() {
                continue;
            }
            any = true;
            writeln!(f, "### {bucket}")?;
            writeln!(f)?;
            for task in tasks {
                writeln!(f, "- {task}")?;
            }
            writeln!(f)?;
        }

        let unbucketed = self.daily_in(None);
        if !unbucketed.is_empty() {
            any = true;
            writeln!(f, "### Anytime")?;
            writeln!(f)?;
            for task in unbucketed {
                writeln!(f, "- {task}")?;
            }
            writeln!(f)?;
        }

        let longer: Vec<&Item> = self
            .0
            .iter()
            .filter(|i| {
                matches!(
                    i.recurs,
                    Some(Recurrence::Weekly) | Some(Recurrence::Monthly)
                )
            })
            .collect();
        if !longer.is_empty() {
            any = true;
            writeln!(f, "### Weekly & monthly")?;
            writeln!(f)?;
            for task in longer {
                writeln!(f, "- {task}")?;
            }
            writeln!(f)?;
        }

        if !any {
            writeln!(f, "No routines defined.")?;
        }

        Ok(())
    }
}

/// Newtype wrapper for listing backup slot keys.
pub struct BackupSlots(pub Vec<String>);

impl fmt::Display for BackupSlots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No local backups found.")?;
            return Ok(());
        }

        writeln!(f, "## Local backups")?;
        writeln!(f)?;
        for key in &self.0 {
            writeln!(f, "- {key}")?;
        }
        Ok(())
    }
}
