//! SQLite-backed document store.
//!
//! Stores each user's dashboard document as one JSON row. Connections are
//! opened per operation against a fixed path, so the store stays `Send +
//! Sync` and can be shared with the debounce task.

use std::path::{Path, PathBuf};

use jiff::Timestamp;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::{Map, Value};

use crate::error::{Result, StoreResultExt, SyncError};

use super::{DocumentPatch, DocumentStore, UserDocument};

const SELECT_DOC_SQL: &str = "SELECT doc FROM documents WHERE uid = ?1";
const UPSERT_DOC_SQL: &str = "INSERT INTO documents (uid, doc, updated_at) VALUES (?1, ?2, ?3) \
     ON CONFLICT(uid) DO UPDATE SET doc = excluded.doc, updated_at = excluded.updated_at";

/// Document store persisted in a local SQLite file.
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    /// Opens the store at the given path, creating parent directories and
    /// initializing the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SyncError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let store = Self { db_path };
        store.connection()?;
        Ok(store)
    }

    /// Opens the store at the XDG default path:
    /// `$XDG_DATA_HOME/compass/compass.db` or `~/.local/share/compass/compass.db`.
    pub fn open_default() -> Result<Self> {
        let path = xdg::BaseDirectories::with_prefix("compass")
            .place_data_file("compass.db")
            .map_err(|e| SyncError::XdgDirectory(e.to_string()))?;
        Self::open(path)
    }

    /// Opens a connection and ensures the schema is present.
    fn connection(&self) -> Result<Connection> {
        let connection = Connection::open(&self.db_path)
            .store_context("Failed to open document store connection")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        connection
            .execute_batch(schema_sql)
            .store_context("Failed to initialize document store schema")?;

        Ok(connection)
    }

    fn parse_document(raw: &str) -> Result<UserDocument> {
        let value: Value = serde_json::from_str(raw)?;
        let fields = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Ok(UserDocument { fields })
    }
}

impl DocumentStore for SqliteStore {
    fn get(&self, uid: &str) -> Result<Option<UserDocument>> {
        let connection = self.connection()?;

        let raw: Option<String> = connection
            .query_row(SELECT_DOC_SQL, params![uid], |row| row.get(0))
            .optional()
            .store_context("Failed to query user document")?;

        raw.map(|r| Self::parse_document(&r)).transpose()
    }

    fn set_merge(&self, uid: &str, patch: &DocumentPatch) -> Result<()> {
        let mut connection = self.connection()?;

        let tx = connection
            .transaction()
            .store_context("Failed to begin transaction")?;

        let existing: Option<String> = tx
            .query_row(SELECT_DOC_SQL, params![uid], |row| row.get(0))
            .optional()
            .store_context("Failed to query user document")?;

        let mut fields = match existing {
            Some(raw) => Self::parse_document(&raw)?.fields,
            None => Map::new(),
        };

        // Merge: only the patch's present top-level fields overwrite.
        let patch_value = serde_json::to_value(patch)?;
        if let Value::Object(patch_fields) = patch_value {
            for (key, value) in patch_fields {
                fields.insert(key, value);
            }
        }

        let doc = serde_json::to_string(&Value::Object(fields))?;
        let now = Timestamp::now().to_string();

        tx.execute(UPSERT_DOC_SQL, params![uid, doc, now])
            .store_context("Failed to write user document")?;

        tx.commit().store_context("Failed to commit transaction")?;

        Ok(())
    }
}
