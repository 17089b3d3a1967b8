//! Root-goal display order: load, save, and the self-heal pass.

use log::warn;

use super::SyncEngine;
use crate::{
    error::Result,
    models::{root_goal_ids, Item},
    store::DocumentPatch,
};

impl SyncEngine {
    /// Loads the persisted goal order.
    ///
    /// Same cache-first contract as decision loads. Anonymous sessions get
    /// an empty order; display ordering is not meaningful without a
    /// persisted identity.
    pub async fn load_goal_order(&self, force_refresh: bool) -> Result<Vec<String>> {
        if !force_refresh {
            if let Some(cached) = self.caches().goal_order.clone() {
                return Ok(cached);
            }
        }

        let Some(uid) = self.inner.identity.current_uid() else {
            self.caches().goal_order = Some(Vec::new());
            return Ok(Vec::new());
        };

        let doc = self.fetch_document(&uid).await?;
        let order = doc.map(|d| d.goal_order()).unwrap_or_default();

        self.caches().goal_order = Some(order.clone());
        Ok(order)
    }

    /// Persists the goal order.
    ///
    /// Refuses an empty order: root-goal id loss would silently hide goals
    /// from every view. Anonymous saves are refused too; both are
    /// warnings, not notices, since nothing was lost.
    pub async fn save_goal_order(&self, order: &[String]) {
        if order.is_empty() {
            warn!("Refusing to save an empty goal order");
            return;
        }

        let Some(uid) = self.inner.identity.current_uid() else {
            warn!("Refusing to save goal order while not signed in");
            return;
        };

        match self
            .merge_write(&uid, DocumentPatch::goal_order(order.to_vec()))
            .await
        {
            Ok(()) => {
                self.caches().goal_order = Some(order.to_vec());
            }
            Err(e) => {
                self.inner
                    .notifier
                    .notify(&format!("Saving the goal order failed: {e}"));
            }
        }
    }

    /// Self-heals the goal order against the item collection.
    ///
    /// Any root-goal id missing from the stored order is appended in
    /// encountered order; the healed order is persisted only when it
    /// actually changed. Returns the effective order either way.
    pub async fn sync_goal_order(&self, items: &[Item]) -> Result<Vec<String>> {
        let mut order = self.load_goal_order(false).await?;

        let mut changed = false;
        for id in root_goal_ids(items) {
            if !order.contains(&id) {
                order.push(id);
                changed = true;
            }
        }

        if changed && !order.is_empty() && self.inner.identity.current_uid().is_some() {
            self.save_goal_order(&order).await;
        } else {
            self.caches().goal_order = Some(order.clone());
        }

        Ok(order)
    }
}
