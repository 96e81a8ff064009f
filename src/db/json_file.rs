use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{KeyValueStore, StorageError};

/// Store backed by one pretty-printed JSON object on disk.
///
/// Every write rewrites the whole file through a temp file + rename so a
/// crash never leaves a half-written store behind.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open (or lazily create) the store at `path`. The parent directory is
    /// created with owner-only permissions on Unix.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
                set_dir_permissions(parent)?;
            }
        }
        let store = Self {
            path: path.to_path_buf(),
            lock: Mutex::new(()),
        };
        // Fail early on an unreadable file rather than on first use
        store.load()?;
        tracing::debug!(path = %path.display(), "JSON file store opened");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| StorageError::Corrupted(e.to_string()))
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Corrupted(e.to_string()))?;
        let staging = self.path.with_extension("json.tmp");
        std::fs::write(&staging, json)?;
        std::fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::LockPoisoned)?;
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::LockPoisoned)?;
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::LockPoisoned)?;
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), StorageError> {
    use std::os::unix::fs::PermissionsExt;
    let perms = std::fs::Permissions::from_mode(0o700);
    std::fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), StorageError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn values_survive_reopen() {
        let dir = test_dir();
        let path = dir.path().join("store.json");
        {
            let store = JsonFileStore::open(&path).unwrap();
            store.set("healthflow_auth_status", "true").unwrap();
        }
        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(
            store.get("healthflow_auth_status").unwrap().as_deref(),
            Some("true")
        );
    }

    #[test]
    fn remove_deletes_key() {
        let dir = test_dir();
        let store = JsonFileStore::open(&dir.path().join("store.json")).unwrap();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.remove("a").unwrap();
        assert!(store.get("a").unwrap().is_none());
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = test_dir();
        let store = JsonFileStore::open(&dir.path().join("fresh.json")).unwrap();
        assert!(store.get("anything").unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn corrupted_file_is_rejected_on_open() {
        let dir = test_dir();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            JsonFileStore::open(&path),
            Err(StorageError::Corrupted(_))
        ));
    }

    #[test]
    #[cfg(unix)]
    fn created_parent_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let dir = test_dir();
        let nested = dir.path().join("HealthFlow");
        JsonFileStore::open(&nested.join("store.json")).unwrap();
        let mode = std::fs::metadata(&nested).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o700, "Data dir should be owner-only (0o700), got {mode:o}");
    }
}
