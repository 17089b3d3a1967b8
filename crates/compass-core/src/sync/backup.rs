//! Backup restore flow over the daily local snapshot slots.
//!
//! The snapshots themselves are written by the load path (one slot per
//! calendar day); this module turns a chosen slot back into the live
//! collection, with enough guardrails that a restore cannot quietly
//! destroy data: slot validation, a pre-restore remote snapshot, and an
//! explicit confirmation naming what is about to happen.

use super::SyncEngine;
use crate::{error::Result, models::Item, sample, storage::BACKUP_PREFIX, store::DocumentPatch};

impl SyncEngine {
    /// Lists the available backup slot keys, oldest first.
    pub fn list_backups(&self) -> Result<Vec<String>> {
        Ok(self
            .inner
            .backups
            .keys()?
            .into_iter()
            .filter(|k| k.starts_with(BACKUP_PREFIX))
            .collect())
    }

    /// Restores a local backup slot as the live remote collection.
    ///
    /// Slot selection and the final confirmation are injected so callers
    /// own the interaction; the confirmation prompt names the backup's
    /// date, item count, and approximate size. Every refusal path surfaces
    /// a notice and returns `None`; the chosen slot key is returned on
    /// success.
    pub async fn restore_backup<S, C>(&self, select: S, confirm: C) -> Result<Option<String>>
    where
        S: FnOnce(&[String]) -> Option<String>,
        C: FnOnce(&str) -> bool,
    {
        let Some(uid) = self.inner.identity.current_uid() else {
            self.inner.notifier.notify("Sign in before restoring a backup.");
            return Ok(None);
        };

        let keys = self.list_backups()?;
        if keys.is_empty() {
            self.inner.notifier.notify("No local backups found.");
            return Ok(None);
        }

        let Some(key) = select(&keys) else {
            return Ok(None);
        };

        let Some(raw) = self.inner.backups.read(&key)? else {
            self.inner
                .notifier
                .notify(&format!("Backup {key} no longer exists."));
            return Ok(None);
        };

        let items: Vec<Item> = match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(_) => {
                self.inner
                    .notifier
                    .notify(&format!("Backup {key} is not readable and was left alone."));
                return Ok(None);
            }
        };

        if items.is_empty() {
            self.inner
                .notifier
                .notify(&format!("Backup {key} is empty; refusing to restore it."));
            return Ok(None);
        }

        if sample::matches_sample(&items) {
            self.inner.notifier.notify(&format!(
                "Backup {key} holds the demo dataset; nothing to restore."
            ));
            return Ok(None);
        }

        // Self-insurance: snapshot the current remote items into the
        // document before they are overwritten.
        let current = self
            .fetch_document(&uid)
            .await?
            .map(|d| d.items())
            .unwrap_or_default();
        self.merge_write(&uid, DocumentPatch::pre_restore_backup(current))
            .await?;

        if !confirm(&restore_prompt(&key, items.len(), raw.len())) {
            return Ok(None);
        }

        self.merge_write(&uid, DocumentPatch::items(items.clone()))
            .await?;
        self.caches().decisions = Some(items);

        Ok(Some(key))
    }
}

/// The confirmation prompt: names the slot date, item count, and size.
fn restore_prompt(key: &str, count: usize, bytes: usize) -> String {
    let date = key.strip_prefix(BACKUP_PREFIX).unwrap_or(key);
    let kb = bytes as f64 / 1024.0;
    format!(
        "Restore backup from {date}? It holds {count} items (~{kb:.1} KB) \
         and will replace your current data."
    )
}
