//! Typed JSON access over a `KeyValueStore`, with graceful degradation.
//!
//! Reads that fail (store unavailable, value unparsable) come back as
//! "no data"; writes that fail are skipped. Both are logged at warn so
//! the failure stays visible in diagnostics without reaching the user.
//! The `try_*` variants report the failure instead, for callers that
//! must not act on a value they could not read.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{KeyValueStore, StorageError};

pub struct LocalStore<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> LocalStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Raw string value, `None` when missing or unreadable.
    pub fn read_raw(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Storage read failed, treating as no data");
                None
            }
        }
    }

    /// Returns whether the value was persisted.
    pub fn write_raw(&self, key: &str, value: &str) -> bool {
        match self.backend.set(key, value) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "Storage write skipped");
                false
            }
        }
    }

    /// Returns whether the key is known to be gone.
    pub fn remove(&self, key: &str) -> bool {
        match self.backend.remove(key) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "Storage remove skipped");
                false
            }
        }
    }

    /// `Ok(None)` only when the key is missing.
    pub fn try_read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.backend.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StorageError::Corrupted(format!("{key}: {e}"))),
            None => Ok(None),
        }
    }

    pub fn try_write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value)
            .map_err(|e| StorageError::Corrupted(format!("{key}: {e}")))?;
        self.backend.set(key, &json)
    }

    pub fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_read_json(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Stored value unreadable, treating as no data");
                None
            }
        }
    }

    pub fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        match self.try_write_json(key, value) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "Storage write skipped");
                false
            }
        }
    }

    /// A stored JSON array, empty when missing or unparsable.
    pub fn read_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        self.read_json(key).unwrap_or_default()
    }

    /// A stored JSON array, empty only when the key is missing.
    pub fn try_read_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StorageError> {
        Ok(self.try_read_json(key)?.unwrap_or_default())
    }

    /// Put `item` at the front of the stored list (most-recent-first).
    ///
    /// Existing entries are carried over as raw JSON, so ones the caller's
    /// type cannot read survive. An unreadable or non-array value is left
    /// untouched and nothing is written.
    pub fn prepend<T: Serialize>(&self, key: &str, item: T) -> bool {
        let mut list: Vec<Value> = match self.try_read_list(key) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(key, error = %e, "Stored list unreadable, append skipped");
                return false;
            }
        };
        match serde_json::to_value(item) {
            Ok(value) => list.insert(0, value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Value failed to serialize, append skipped");
                return false;
            }
        }
        self.write_json(key, &list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn store() -> LocalStore<MemoryStore> {
        LocalStore::new(MemoryStore::new())
    }

    #[test]
    fn prepend_keeps_most_recent_first() {
        let store = store();
        store.prepend("list", 1);
        store.prepend("list", 2);
        store.prepend("list", 3);
        assert_eq!(store.read_list::<i32>("list"), vec![3, 2, 1]);
    }

    #[test]
    fn unparsable_list_reads_as_empty() {
        let store = store();
        store.write_raw("list", "not json at all");
        assert!(store.read_list::<i32>("list").is_empty());
        assert!(matches!(
            store.try_read_list::<i32>("list"),
            Err(StorageError::Corrupted(_))
        ));
    }

    #[test]
    fn missing_list_is_empty_not_an_error() {
        let store = store();
        assert_eq!(store.try_read_list::<i32>("list").unwrap(), Vec::<i32>::new());
    }

    #[test]
    fn prepend_keeps_entries_of_another_shape() {
        let store = store();
        store.write_raw("list", r#"[{"legacy":true},"text"]"#);
        assert!(store.prepend("list", 7));
        assert_eq!(store.read_raw("list").as_deref(), Some(r#"[7,{"legacy":true},"text"]"#));
    }

    #[test]
    fn prepend_leaves_unparsable_value_alone() {
        let store = store();
        store.write_raw("list", "not json at all");
        assert!(!store.prepend("list", 1));
        assert_eq!(store.read_raw("list").as_deref(), Some("not json at all"));

        store.write_raw("list", r#"{"not":"an array"}"#);
        assert!(!store.prepend("list", 1));
        assert_eq!(store.read_raw("list").as_deref(), Some(r#"{"not":"an array"}"#));
    }

    #[test]
    fn unavailable_backend_degrades() {
        let store = store();
        store.prepend("list", 1);
        store.backend().set_available(false);

        assert!(store.read_list::<i32>("list").is_empty());
        assert!(store.try_read_list::<i32>("list").is_err());
        assert!(!store.prepend("list", 2));
        assert!(!store.write_json("list", &[2]));
        assert!(!store.remove("list"));

        store.backend().set_available(true);
        assert_eq!(store.read_list::<i32>("list"), vec![1]);
    }

    #[test]
    fn json_round_trip_for_struct() {
        #[derive(Serialize, serde::Deserialize, PartialEq, Debug)]
        struct Flag {
            on: bool,
        }
        let store = store();
        assert!(store.write_json("flag", &Flag { on: true }));
        assert_eq!(store.read_json::<Flag>("flag"), Some(Flag { on: true }));
    }
}
