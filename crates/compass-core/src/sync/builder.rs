//! Builder for creating and configuring SyncEngine instances.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{Caches, EngineInner, PendingWrite, SyncEngine, DEFAULT_DEBOUNCE};
use crate::{
    error::{Result, SyncError},
    identity::IdentityProvider,
    notify::{LogNotifier, Notifier},
    storage::{MemoryStorage, SlotStorage},
    store::DocumentStore,
};

/// Builder for creating and configuring SyncEngine instances.
///
/// A document store and an identity provider are required; backup storage
/// defaults to in-memory slots and notices default to the log.
pub struct SyncEngineBuilder {
    store: Option<Arc<dyn DocumentStore>>,
    identity: Option<Arc<dyn IdentityProvider>>,
    backups: Option<Arc<dyn SlotStorage>>,
    notifier: Option<Arc<dyn Notifier>>,
    debounce: Duration,
}

impl SyncEngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            store: None,
            identity: None,
            backups: None,
            notifier: None,
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    /// Sets the document store the engine persists through.
    pub fn with_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets the identity provider consulted at the start of every operation.
    pub fn with_identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Sets the local slot storage used for daily backups.
    pub fn with_backups(mut self, backups: Arc<dyn SlotStorage>) -> Self {
        self.backups = Some(backups);
        self
    }

    /// Sets the sink for user-visible notices.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Overrides the debounce window for decision saves.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Builds the configured engine instance.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Configuration` if no document store or identity
    /// provider was supplied.
    pub fn build(self) -> Result<SyncEngine> {
        let store = self.store.ok_or_else(|| SyncError::Configuration {
            message: "SyncEngine requires a document store".to_string(),
        })?;
        let identity = self.identity.ok_or_else(|| SyncError::Configuration {
            message: "SyncEngine requires an identity provider".to_string(),
        })?;

        Ok(SyncEngine {
            inner: Arc::new(EngineInner {
                store,
                identity,
                backups: self
                    .backups
                    .unwrap_or_else(|| Arc::new(MemoryStorage::new())),
                notifier: self.notifier.unwrap_or_else(|| Arc::new(LogNotifier)),
                debounce: self.debounce,
                caches: Mutex::new(Caches::default()),
                pending: Mutex::new(PendingWrite::default()),
            }),
        })
    }
}

impl Default for SyncEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
