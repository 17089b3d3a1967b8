//! Identity provider: "current authenticated user or none".
//!
//! The engine is pulled, not pushed, for identity: every operation asks for
//! the current uid at its own start. Consumers that need to react to
//! sign-in/sign-out transitions clear the engine caches at the transition.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{FileSystemResultExt, Result, SyncError};

/// Synchronous accessor for the current authenticated user.
pub trait IdentityProvider: Send + Sync {
    /// The signed-in user's id, or None when anonymous.
    fn current_uid(&self) -> Option<String>;
}

/// Identity persisted in a session file across CLI invocations.
///
/// The file holds the bare uid; a missing or empty file means anonymous.
pub struct SessionIdentity {
    session_file: PathBuf,
}

impl SessionIdentity {
    /// Uses the given session file path.
    pub fn new<P: AsRef<Path>>(session_file: P) -> Self {
        Self {
            session_file: session_file.as_ref().to_path_buf(),
        }
    }

    /// Uses the XDG state directory:
    /// `$XDG_STATE_HOME/compass/session` or `~/.local/state/compass/session`.
    pub fn from_xdg() -> Result<Self> {
        let session_file = xdg::BaseDirectories::with_prefix("compass")
            .place_state_file("session")
            .map_err(|e| SyncError::XdgDirectory(e.to_string()))?;
        Ok(Self::new(session_file))
    }

    /// Records the signed-in user.
    pub fn sign_in(&self, uid: &str) -> Result<()> {
        if let Some(parent) = self.session_file.parent() {
            std::fs::create_dir_all(parent).fs_context(parent)?;
        }
        std::fs::write(&self.session_file, uid).fs_context(&self.session_file)
    }

    /// Returns to anonymous.
    pub fn sign_out(&self) -> Result<()> {
        match std::fs::remove_file(&self.session_file) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SyncError::FileSystem {
                path: self.session_file.clone(),
                source: e,
            }),
        }
    }
}

impl IdentityProvider for SessionIdentity {
    fn current_uid(&self) -> Option<String> {
        let raw = std::fs::read_to_string(&self.session_file).ok()?;
        let uid = raw.trim();
        if uid.is_empty() {
            None
        } else {
            Some(uid.to_string())
        }
    }
}

/// Fixed identity, switchable at runtime. Used by tests.
#[derive(Default)]
pub struct StaticIdentity {
    uid: Mutex<Option<String>>,
}

impl StaticIdentity {
    /// A provider already signed in as `uid`.
    pub fn signed_in(uid: impl Into<String>) -> Self {
        Self {
            uid: Mutex::new(Some(uid.into())),
        }
    }

    /// An anonymous provider.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Switches the current user.
    pub fn set(&self, uid: Option<String>) {
        *self.uid.lock().expect("identity lock poisoned") = uid;
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_uid(&self) -> Option<String> {
        self.uid.lock().expect("identity lock poisoned").clone()
    }
}
