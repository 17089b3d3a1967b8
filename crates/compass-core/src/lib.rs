//! Core library for the Compass personal dashboard.
//!
//! This crate provides the data-synchronization layer behind the dashboard:
//! loading, caching, debouncing, and persisting a single user's hierarchical
//! goal/task collection across an authenticated document store and an
//! anonymous sample-data fallback.
//!
//! # Architecture
//!
//! Consumers only ever talk to the [`SyncEngine`]; everything behind it is a
//! swappable capability:
//!
//! - [`store`]: the per-user document with `get`/`set(merge)` semantics,
//!   shipped as a SQLite implementation, with timestamp normalization at
//!   the boundary
//! - [`identity`]: "current authenticated user or none"
//! - [`storage`]: local key-value slots for the daily backups
//! - [`sample`]: the frozen demo dataset anonymous sessions see
//!
//! The engine guarantees cache-first reads within a session, optimistic
//! saves with a single debounced merge write, and that untouched demo data
//! is never persisted anywhere.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use compass_core::{
//!     identity::StaticIdentity, models::{Item, ItemKind},
//!     store::SqliteStore, SyncEngineBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(SqliteStore::open("compass.db")?);
//! let engine = SyncEngineBuilder::new()
//!     .with_store(store)
//!     .with_identity(Arc::new(StaticIdentity::signed_in("user-1")))
//!     .build()?;
//!
//! let mut items = engine.load_decisions(false).await?;
//! items.push(Item::new(ItemKind::Goal, "Learn to sail"));
//! engine.save_decisions(&items).await;
//! engine.flush_pending_decisions().await?;
//! # Ok(())
//! # }
//! ```

pub mod display;
pub mod error;
pub mod identity;
pub mod models;
pub mod notify;
pub mod params;
pub mod sample;
pub mod storage;
pub mod store;
pub mod sync;

// Re-export commonly used types
pub use display::{BackupSlots, GoalTree, OperationStatus, RoutineBoard};
pub use error::{Result, SyncError};
pub use identity::{IdentityProvider, SessionIdentity, StaticIdentity};
pub use models::{Item, ItemKind, Outcome, Recurrence, TimeOfDay};
pub use notify::{LogNotifier, Notifier};
pub use storage::{DirStorage, MemoryStorage, SlotStorage};
pub use store::{DocumentPatch, DocumentStore, SqliteStore, UserDocument};
pub use sync::{SyncEngine, SyncEngineBuilder};
