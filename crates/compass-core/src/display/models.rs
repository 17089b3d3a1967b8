//! Display implementations for domain models.

use std::fmt;

use crate::models::{Item, ItemKind, Recurrence, TimeOfDay};

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Item {
    /// Completion marker used in list contexts.
    pub fn marker(&self) -> &'static str {
        if self.completed {
            "✓"
        } else {
            "○"
        }
    }
}

impl fmt::Display for Item {
    /// One markdown list line: marker, text, and compact annotations.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.marker(), self.text)?;

        if let Some(scheduled) = &self.scheduled {
            match &self.scheduled_end {
                Some(end) => write!(f, " ({scheduled} – {end})")?,
                None => write!(f, " ({scheduled})")?,
            }
        }

        if let Some(recurs) = &self.recurs {
            write!(f, " [{recurs}]")?;
        }

        if !self.tags.is_empty() {
            write!(f, " #{}", self.tags.join(" #"))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_line_includes_schedule_and_tags() {
        let item = Item {
            id: "a".to_string(),
            kind: ItemKind::Task,
            text: "Book flights".to_string(),
            scheduled: Some("2024-03-04".to_string()),
            tags: vec!["travel".to_string()],
            ..Item::default()
        };
        let line = format!("{item}");
        assert_eq!(line, "○ Book flights (2024-03-04) #travel");
    }

    #[test]
    fn test_completed_item_uses_check_marker() {
        let item = Item {
            id: "a".to_string(),
            text: "Done thing".to_string(),
            completed: true,
            ..Item::default()
        };
        assert!(format!("{item}").starts_with("✓ "));
    }

    #[test]
    fn test_scheduled_range_renders_both_ends() {
        let item = Item {
            id: "a".to_string(),
            text: "Cabin".to_string(),
            scheduled: Some("2024-03-11".to_string()),
            scheduled_end: Some("2024-03-15".to_string()),
            ..Item::default()
        };
        assert!(format!("{item}").contains("(2024-03-11 – 2024-03-15)"));
    }
}
