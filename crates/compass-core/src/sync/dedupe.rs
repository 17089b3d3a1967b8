//! Duplicate removal: an explicit maintenance operation.
//!
//! Never run automatically: the text-based pass is a heuristic that could
//! swallow genuinely repeated tasks, so a human decides when it runs.

use std::collections::HashSet;

use super::SyncEngine;
use crate::{
    error::{Result, SyncError},
    models::{Item, ItemKind},
    store::DocumentPatch,
};

impl SyncEngine {
    /// Removes duplicate items from the remote collection and writes the
    /// cleaned collection back.
    ///
    /// Two independent passes, first occurrence winning in both: repeated
    /// ids, then repeated `(kind, trimmed-lowercased-text)` pairs. Running
    /// it twice in a row removes nothing further.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::NotSignedIn`] for anonymous sessions; there is
    /// no remote collection to maintain.
    pub async fn remove_duplicate_decisions(&self) -> Result<Vec<Item>> {
        let Some(uid) = self.inner.identity.current_uid() else {
            return Err(SyncError::NotSignedIn);
        };

        let items = self
            .fetch_document(&uid)
            .await?
            .map(|d| d.items())
            .unwrap_or_default();

        let deduped = dedupe_items(items);

        self.merge_write(&uid, DocumentPatch::items(deduped.clone()))
            .await?;
        self.caches().decisions = Some(deduped.clone());

        Ok(deduped)
    }
}

fn dedupe_items(items: Vec<Item>) -> Vec<Item> {
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut seen_texts: HashSet<(ItemKind, String)> = HashSet::new();

    items
        .into_iter()
        .filter(|item| {
            if !seen_ids.insert(item.id.clone()) {
                return false;
            }
            seen_texts.insert((item.kind, item.normalized_text()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, kind: ItemKind, text: &str) -> Item {
        Item {
            id: id.to_string(),
            kind,
            text: text.to_string(),
            ..Item::default()
        }
    }

    #[test]
    fn test_repeated_ids_are_dropped_first_wins() {
        let items = vec![
            item("a", ItemKind::Goal, "First"),
            item("a", ItemKind::Goal, "Second with same id"),
            item("b", ItemKind::Goal, "Third"),
        ];
        let deduped = dedupe_items(items);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].text, "First");
        assert_eq!(deduped[1].id, "b");
    }

    #[test]
    fn test_repeated_normalized_text_same_kind_is_dropped() {
        let items = vec![
            item("a", ItemKind::Task, "Buy milk"),
            item("b", ItemKind::Task, "  buy MILK "),
            item("c", ItemKind::Goal, "Buy milk"),
        ];
        let deduped = dedupe_items(items);
        // The goal survives: the pair is keyed on kind as well as text
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].id, "a");
        assert_eq!(deduped[1].id, "c");
    }

    #[test]
    fn test_dedupe_is_idempotent() {
        let items = vec![
            item("a", ItemKind::Task, "Buy milk"),
            item("a", ItemKind::Task, "Buy milk"),
            item("b", ItemKind::Task, "Walk the dog"),
        ];
        let once = dedupe_items(items);
        let twice = dedupe_items(once.clone());
        assert_eq!(once, twice);
    }
}
