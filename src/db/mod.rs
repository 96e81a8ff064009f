//! Client-local key-value persistence.
//!
//! Everything the app keeps (accounts, session, records) goes through the
//! `KeyValueStore` port. Adapters: in-memory (tests), a single JSON file,
//! and SQLite. `LocalStore` layers typed JSON access on top and turns
//! storage failures into "no data" reads and skipped writes.

pub mod json_file;
pub mod local_store;
pub mod memory;
pub mod sqlite;

pub use json_file::JsonFileStore;
pub use local_store::LocalStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::sync::Arc;

use thiserror::Error;

/// Storage keys. Values are strings; collections are JSON arrays.
pub mod keys {
    pub const AUTH_STATUS: &str = "healthflow_auth_status";
    pub const CURRENT_USER: &str = "healthflow_current_user";
    pub const USERS: &str = "healthflow_users";
    pub const HEALTH_RECORDS: &str = "healthflow_health_records";
    pub const APPOINTMENTS: &str = "healthflow_appointments";
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Local storage unavailable: {0}")]
    Unavailable(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupted store file: {0}")]
    Corrupted(String),

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },

    #[error("Internal lock error")]
    LockPoisoned,
}

/// Storage port: string keys to string values.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
