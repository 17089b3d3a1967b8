//! Error types for the sync engine library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all sync engine operations.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Document store connection or query errors
    #[error("Document store error: {message}")]
    Store {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Operation requires an authenticated user
    #[error("Not signed in")]
    NotSignedIn,
    /// File system operation errors (session file, backup slots)
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating document store errors with optional context.
pub struct StoreErrorBuilder {
    message: String,
}

impl StoreErrorBuilder {
    /// Create a new store error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> SyncError {
        SyncError::Store {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> SyncError {
        SyncError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl SyncError {
    /// Creates a builder for document store errors.
    pub fn store(message: impl Into<String>) -> StoreErrorBuilder {
        StoreErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }
}

/// Specialized extension trait for document-store-related Results.
pub trait StoreResultExt<T> {
    /// Map store errors with a message.
    fn store_context(self, message: &str) -> Result<T>;
}

impl<T> StoreResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn store_context(self, message: &str) -> Result<T> {
        self.map_err(|e| SyncError::store(message).with_source(e))
    }
}

/// Extension trait for filesystem Results carrying the offending path.
pub trait FileSystemResultExt<T> {
    /// Map IO errors to [`SyncError::FileSystem`] with the given path.
    fn fs_context(self, path: &std::path::Path) -> Result<T>;
}

impl<T> FileSystemResultExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, path: &std::path::Path) -> Result<T> {
        self.map_err(|e| SyncError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Result type alias for sync engine operations
pub type Result<T> = std::result::Result<T, SyncError>;
