//! Document store boundary for the per-user dashboard document.
//!
//! The engine persists everything through one whole-user document exposing
//! `get` / `set(merge)` semantics. Merge is mandatory on every write: the
//! engine owns the `items`, `goalOrder`, and `preRestoreBackup` fields but
//! never assumes exclusive ownership of the rest of the document.
//!
//! Remote-native timestamp objects are normalized to ISO-8601 strings on the
//! way out of the store ([`timestamps`]), so domain logic only ever sees
//! plain strings.

use jiff::Timestamp;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{error::Result, models::Item};

pub mod sqlite;
pub mod timestamps;

pub use sqlite::SqliteStore;

/// Document field holding the item collection.
pub const ITEMS_FIELD: &str = "items";
/// Document field holding the root-goal display order.
pub const GOAL_ORDER_FIELD: &str = "goalOrder";

/// Capability the sync engine depends on: per-user documents with
/// merge-write semantics.
///
/// Implementations are synchronous; the engine wraps calls in
/// `spawn_blocking`.
pub trait DocumentStore: Send + Sync {
    /// Fetches the user's document, or None if the user has never saved.
    fn get(&self, uid: &str) -> Result<Option<UserDocument>>;

    /// Merges the patch's present fields into the user's document,
    /// preserving all other top-level fields.
    fn set_merge(&self, uid: &str, patch: &DocumentPatch) -> Result<()>;
}

/// A user's raw document: top-level fields as stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserDocument {
    pub fields: Map<String, Value>,
}

impl UserDocument {
    /// Extracts and normalizes the item collection.
    ///
    /// An absent or non-array `items` field yields an empty collection.
    /// Every element passes through the timestamp adapter and legacy field
    /// renames before deserialization; elements that are not objects are
    /// dropped.
    pub fn items(&self) -> Vec<Item> {
        let Some(Value::Array(raw)) = self.fields.get(ITEMS_FIELD) else {
            return Vec::new();
        };

        raw.iter()
            .filter_map(|element| {
                let mut value = element.clone();
                timestamps::normalize_value(&mut value);
                serde_json::from_value(value).ok()
            })
            .collect()
    }

    /// Extracts the goal order, defaulting to empty when absent/malformed.
    pub fn goal_order(&self) -> Vec<String> {
        let Some(Value::Array(raw)) = self.fields.get(GOAL_ORDER_FIELD) else {
            return Vec::new();
        };

        raw.iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect()
    }
}

/// Partial document for merge writes. Only present fields are written.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Item>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_order: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_restore_backup: Option<PreRestoreBackup>,
}

impl DocumentPatch {
    /// A patch replacing the item collection.
    pub fn items(items: Vec<Item>) -> Self {
        Self {
            items: Some(items),
            ..Self::default()
        }
    }

    /// A patch replacing the goal order.
    pub fn goal_order(order: Vec<String>) -> Self {
        Self {
            goal_order: Some(order),
            ..Self::default()
        }
    }

    /// A patch recording the pre-restore remote snapshot.
    pub fn pre_restore_backup(items: Vec<Item>) -> Self {
        Self {
            pre_restore_backup: Some(PreRestoreBackup {
                items,
                saved_at: Timestamp::now().to_string(),
            }),
            ..Self::default()
        }
    }
}

/// Snapshot of the remote items taken immediately before a backup restore
/// overwrites them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreRestoreBackup {
    pub items: Vec<Item>,
    pub saved_at: String,
}
