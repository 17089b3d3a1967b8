//! Item collection load/save/flush and the debounce window.

use log::{debug, warn};

use super::SyncEngine;
use crate::{error::Result, models::Item, sample, store::DocumentPatch};

impl SyncEngine {
    /// Loads the user's item collection.
    ///
    /// Cache first: once a session has loaded, repeated calls return the
    /// cached collection without I/O unless `force_refresh` is set.
    /// Anonymous sessions get the sample dataset with calendar entries
    /// shifted forward; the shifted copy is cached so repeated anonymous
    /// reads are stable within the session.
    ///
    /// # Errors
    ///
    /// Store failures propagate to the caller so consumers can distinguish
    /// "no data yet" from "fetch broke".
    pub async fn load_decisions(&self, force_refresh: bool) -> Result<Vec<Item>> {
        if !force_refresh {
            if let Some(cached) = self.caches().decisions.clone() {
                debug!("Decision cache hit");
                return Ok(cached);
            }
        }

        let Some(uid) = self.inner.identity.current_uid() else {
            let items = sample::shifted_sample(Self::today());
            self.caches().decisions = Some(items.clone());
            return Ok(items);
        };

        let doc = self.fetch_document(&uid).await?;
        let items = doc.map(|d| d.items()).unwrap_or_default();

        self.caches().decisions = Some(items.clone());
        self.write_daily_backup(&items);

        Ok(items)
    }

    /// Saves the full item collection.
    ///
    /// The cache updates synchronously and unconditionally so callers can
    /// re-render immediately; persistence is debounced. A collection with
    /// no well-formed item is refused outright: it would overwrite
    /// legitimate prior data with nothing.
    ///
    /// Anonymous saves never persist: the untouched sample dataset returns
    /// silently, anything else earns a sign-in notice and lives only in the
    /// session cache.
    pub async fn save_decisions(&self, items: &[Item]) {
        if !items.iter().any(Item::is_persistable) {
            warn!("Refusing to save: no item carries both an id and text");
            return;
        }

        self.caches().decisions = Some(items.to_vec());

        let Some(uid) = self.inner.identity.current_uid() else {
            if sample::matches_sample(items) {
                return;
            }
            self.inner
                .notifier
                .notify("Sign in to save your changes. Edits are kept for this session only.");
            return;
        };

        self.arm_debounce(uid);
    }

    /// Force-commits any pending debounced write immediately.
    ///
    /// Used before operations that need durability (process exit, restore).
    /// A no-op when nothing is pending.
    pub async fn flush_pending_decisions(&self) -> Result<()> {
        let had_pending = {
            let mut pending = self.pending();
            pending.seq += 1;
            match pending.task.take() {
                Some(handle) => {
                    handle.abort();
                    true
                }
                None => false,
            }
        };

        if !had_pending {
            return Ok(());
        }

        let Some(uid) = self.inner.identity.current_uid() else {
            return Ok(());
        };

        self.write_cached_decisions(&uid).await
    }

    /// Cancel-and-rearm the debounce timer (reset, not extend).
    ///
    /// The armed task re-checks the sequence number after sleeping, so a
    /// superseded or flushed timer can never produce a second write.
    fn arm_debounce(&self, uid: String) {
        let mut pending = self.pending();
        pending.seq += 1;
        let seq = pending.seq;

        if let Some(handle) = pending.task.take() {
            handle.abort();
        }

        let engine = self.clone();
        pending.task = Some(tokio::spawn(async move {
            tokio::time::sleep(engine.inner.debounce).await;

            {
                let mut pending = engine.pending();
                if pending.seq != seq {
                    return;
                }
                pending.task = None;
            }

            if let Err(e) = engine.write_cached_decisions(&uid).await {
                engine
                    .inner
                    .notifier
                    .notify(&format!("Saving your changes failed: {e}"));
            }
        }));
    }

    /// Writes the latest cached collection; the debounce window has
    /// already coalesced earlier payloads into it.
    async fn write_cached_decisions(&self, uid: &str) -> Result<()> {
        let Some(items) = self.caches().decisions.clone() else {
            return Ok(());
        };
        self.merge_write(uid, DocumentPatch::items(items)).await
    }

    /// Snapshots a freshly loaded collection into today's backup slot.
    ///
    /// Best-effort: failures are logged, never surfaced. Backups must not
    /// break loading. The empty collection is not worth a slot.
    fn write_daily_backup(&self, items: &[Item]) {
        if items.is_empty() {
            return;
        }

        let key = crate::storage::backup_key(Self::today());
        let json = match serde_json::to_string(items) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize daily backup: {e}");
                return;
            }
        };

        if let Err(e) = self.inner.backups.write(&key, &json) {
            warn!("Failed to write daily backup {key}: {e}");
        }
    }
}
