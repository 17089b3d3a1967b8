//! The decision cache and sync engine.
//!
//! This module provides the main [`SyncEngine`] interface for loading and
//! persisting a user's item collection. The engine is the single path
//! between UI consumers and the document store, implementing the caching,
//! debouncing, and anonymous-fallback rules.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Consumers     │    │   SyncEngine    │    │  DocumentStore  │
//! │ (CLI, widgets)  │───▶│ (cache, debounce│───▶│  (via store/)   │
//! │                 │    │  sample rules)  │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!      reads/writes        business logic        data persistence
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`SyncEngine`] instances
//! - [`decisions`]: Item collection load/save/flush with the debounce window
//! - [`goal_order`]: Root-goal display order, including the self-heal pass
//! - [`backup`]: Daily local snapshots and the restore flow
//! - [`dedupe`]: Manual duplicate-removal maintenance operation
//!
//! ## Contract highlights
//!
//! 1. **Cache first**: repeated reads within a session perform no I/O.
//! 2. **Optimistic saves**: the cache updates synchronously before any
//!    network attempt and is not rolled back on failure.
//! 3. **One debounced write**: rapid successive saves coalesce into a
//!    single merge write holding only the final state.
//! 4. **Demo data never persists**: the untouched sample dataset is
//!    detected structurally and suppressed from every storage path.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::{self, JoinHandle};

use crate::{
    error::{Result, SyncError},
    identity::IdentityProvider,
    models::Item,
    notify::Notifier,
    storage::SlotStorage,
    store::{DocumentPatch, DocumentStore, UserDocument},
};

pub mod backup;
pub mod builder;
pub mod decisions;
pub mod dedupe;
pub mod goal_order;


pub use builder::SyncEngineBuilder;

/// Debounce window for decision saves.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Main sync engine interface.
///
/// Cheap to clone; clones share the caches and the pending-write slot, so
/// one engine per session/tab is the intended shape. Construct via
/// [`SyncEngineBuilder`] and call [`SyncEngine::clear`] on sign-in/sign-out
/// transitions.
#[derive(Clone)]
pub struct SyncEngine {
    pub(crate) inner: Arc<EngineInner>,
}

pub(crate) struct EngineInner {
    pub(crate) store: Arc<dyn DocumentStore>,
    pub(crate) identity: Arc<dyn IdentityProvider>,
    pub(crate) backups: Arc<dyn SlotStorage>,
    pub(crate) notifier: Arc<dyn Notifier>,
    pub(crate) debounce: Duration,
    pub(crate) caches: Mutex<Caches>,
    pub(crate) pending: Mutex<PendingWrite>,
}

/// Session-lifetime caches: last-loaded items and goal order.
#[derive(Default)]
pub(crate) struct Caches {
    pub(crate) decisions: Option<Vec<Item>>,
    pub(crate) goal_order: Option<Vec<String>>,
}

/// The pending-write slot: idle → pending (timer armed) → idle (fired).
///
/// `seq` increases on every arm, flush, and clear; a timer that wakes up
/// with a stale sequence number must not write.
#[derive(Default)]
pub(crate) struct PendingWrite {
    pub(crate) seq: u64,
    pub(crate) task: Option<JoinHandle<()>>,
}

impl SyncEngine {
    /// Empties both caches and cancels any pending debounced write.
    ///
    /// Invoke on sign-in/sign-out: cached data from the previous identity
    /// must not leak into the next one, and a write armed for the previous
    /// user must not fire.
    pub fn clear(&self) {
        *self.caches() = Caches::default();

        let mut pending = self.pending();
        pending.seq += 1;
        if let Some(handle) = pending.task.take() {
            handle.abort();
        }
    }

    pub(crate) fn caches(&self) -> MutexGuard<'_, Caches> {
        self.inner.caches.lock().expect("cache lock poisoned")
    }

    pub(crate) fn pending(&self) -> MutexGuard<'_, PendingWrite> {
        self.inner.pending.lock().expect("pending-write lock poisoned")
    }

    /// Today's civil date in the local time zone.
    pub(crate) fn today() -> jiff::civil::Date {
        jiff::Zoned::now().date()
    }

    /// Fetches the user's raw document off the async runtime.
    pub(crate) async fn fetch_document(&self, uid: &str) -> Result<Option<UserDocument>> {
        let store = Arc::clone(&self.inner.store);
        let uid = uid.to_string();

        task::spawn_blocking(move || store.get(&uid))
            .await
            .map_err(|e| SyncError::Configuration {
                message: format!("Task join error: {e}"),
            })?
    }

    /// Merge-writes a patch to the user's document off the async runtime.
    pub(crate) async fn merge_write(&self, uid: &str, patch: DocumentPatch) -> Result<()> {
        let store = Arc::clone(&self.inner.store);
        let uid = uid.to_string();

        task::spawn_blocking(move || store.set_merge(&uid, &patch))
            .await
            .map_err(|e| SyncError::Configuration {
                message: format!("Task join error: {e}"),
            })?
    }
}
