use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use compass_core::{
    DocumentPatch, DocumentStore, Notifier, SlotStorage, SqliteStore, StaticIdentity, SyncEngine,
    SyncEngineBuilder, UserDocument,
};
use tempfile::TempDir;

/// Document store decorator that counts operations.
pub struct CountingStore {
    inner: SqliteStore,
    pub gets: AtomicUsize,
    pub writes: AtomicUsize,
}

impl CountingStore {
    pub fn new(inner: SqliteStore) -> Self {
        Self {
            inner,
            gets: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
        }
    }
}

impl DocumentStore for CountingStore {
    fn get(&self, uid: &str) -> compass_core::Result<Option<UserDocument>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(uid)
    }

    fn set_merge(&self, uid: &str, patch: &DocumentPatch) -> compass_core::Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set_merge(uid, patch)
    }
}

/// Notifier that records every notice for assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn contains(&self, needle: &str) -> bool {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .any(|m| m.contains(needle))
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

pub struct TestEnv {
    pub _temp_dir: TempDir,
    pub engine: SyncEngine,
    pub store: Arc<CountingStore>,
    pub backups: Arc<compass_core::DirStorage>,
    pub notifier: Arc<RecordingNotifier>,
    pub identity: Arc<StaticIdentity>,
}

/// Helper function to create a test engine over a real SQLite store and a
/// real backup directory.
pub fn create_test_env(uid: Option<&str>) -> TestEnv {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let store = Arc::new(CountingStore::new(
        SqliteStore::open(temp_dir.path().join("test.db")).expect("Failed to open store"),
    ));
    let backups = Arc::new(
        compass_core::DirStorage::open(temp_dir.path().join("backups"))
            .expect("Failed to open backup storage"),
    );
    let notifier = Arc::new(RecordingNotifier::default());
    let identity = Arc::new(match uid {
        Some(uid) => StaticIdentity::signed_in(uid),
        None => StaticIdentity::anonymous(),
    });

    let engine = SyncEngineBuilder::new()
        .with_store(Arc::clone(&store) as Arc<dyn DocumentStore>)
        .with_identity(Arc::clone(&identity) as Arc<dyn compass_core::IdentityProvider>)
        .with_backups(Arc::clone(&backups) as Arc<dyn SlotStorage>)
        .with_notifier(Arc::clone(&notifier) as Arc<dyn Notifier>)
        .with_debounce(Duration::from_millis(20))
        .build()
        .expect("Failed to build engine");

    TestEnv {
        _temp_dir: temp_dir,
        engine,
        store,
        backups,
        notifier,
        identity,
    }
}
