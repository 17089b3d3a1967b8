//! Local ephemeral key-value storage for daily backup slots.
//!
//! One slot per calendar day, keyed `backup-<ISO-date>`; later snapshots the
//! same day overwrite the slot. Anonymous edits never reach this storage;
//! it exists for the signed-in backup/restore subsystem.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use jiff::civil::Date;

use crate::error::{FileSystemResultExt, Result, SyncError};

/// Prefix shared by all backup slot keys.
pub const BACKUP_PREFIX: &str = "backup-";

/// The slot key for a calendar day.
pub fn backup_key(date: Date) -> String {
    format!("{BACKUP_PREFIX}{date}")
}

/// String key-value slots with enumeration.
pub trait SlotStorage: Send + Sync {
    /// Reads a slot, or None when absent.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Writes (or overwrites) a slot.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// All slot keys, sorted.
    fn keys(&self) -> Result<Vec<String>>;
}

/// Slot storage backed by one file per slot under a directory.
pub struct DirStorage {
    dir: PathBuf,
}

impl DirStorage {
    /// Uses (and creates) the given directory.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).fs_context(&dir)?;
        Ok(Self { dir })
    }

    /// Uses the XDG data directory:
    /// `$XDG_DATA_HOME/compass/backups` or `~/.local/share/compass/backups`.
    pub fn from_xdg() -> Result<Self> {
        let dir = xdg::BaseDirectories::with_prefix("compass")
            .create_data_directory("backups")
            .map_err(|e| SyncError::XdgDirectory(e.to_string()))?;
        Self::open(dir)
    }
}

impl SlotStorage for DirStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.dir.join(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SyncError::FileSystem { path, source: e }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.dir.join(key);
        std::fs::write(&path, value).fs_context(&path)
    }

    fn keys(&self) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(&self.dir).fs_context(&self.dir)?;

        let mut keys: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        keys.sort();
        Ok(keys)
    }
}

/// In-memory slot storage for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryStorage {
    slots: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.lock().expect("storage lock poisoned").get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.slots
            .lock()
            .expect("storage lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self
            .slots
            .lock()
            .expect("storage lock poisoned")
            .keys()
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_key_format() {
        let date = Date::new(2024, 1, 1).unwrap();
        assert_eq!(backup_key(date), "backup-2024-01-01");
    }

    #[test]
    fn test_memory_storage_overwrites_and_sorts() {
        let storage = MemoryStorage::new();
        storage.write("backup-2024-01-02", "b").unwrap();
        storage.write("backup-2024-01-01", "a").unwrap();
        storage.write("backup-2024-01-01", "c").unwrap();

        assert_eq!(storage.read("backup-2024-01-01").unwrap().unwrap(), "c");
        assert_eq!(
            storage.keys().unwrap(),
            vec!["backup-2024-01-01", "backup-2024-01-02"]
        );
    }

    #[test]
    fn test_dir_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = DirStorage::open(dir.path()).unwrap();

        assert_eq!(storage.read("backup-2024-01-01").unwrap(), None);
        storage.write("backup-2024-01-01", "[]").unwrap();
        assert_eq!(storage.read("backup-2024-01-01").unwrap().unwrap(), "[]");
        assert_eq!(storage.keys().unwrap(), vec!["backup-2024-01-01"]);
    }
}
