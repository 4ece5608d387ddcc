//! Secure Key/Value Storage Port
//!
//! Abstraction over the platform's secure, tamper-resistant store
//! (keychain-equivalent). Values are typed and keyed by string constants;
//! an absent value is distinct from `false`/`0`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Secure store failures
///
/// These never surface past the credential repository boundary: the caller
/// logs them and degrades to the absent value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Underlying I/O failure
    #[error("Secure store I/O failure: {0}")]
    Io(String),

    /// A value exists but does not have the requested type
    #[error("Stored value for '{key}' has the wrong type")]
    WrongType { key: String },

    /// Backend rejected the operation (locked device, revoked access)
    #[error("Secure store backend failure: {0}")]
    Backend(String),
}

/// Secure store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

// ============================================================================
// Port
// ============================================================================

/// Trait for secure key/value storage backends
///
/// Setting `None` removes the entry; reading a missing key yields
/// `Ok(None)`, never an error.
#[trait_variant::make(SecureKeyValueStore: Send)]
pub trait LocalSecureKeyValueStore {
    /// Read a string value
    async fn get_string(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write or remove a string value
    async fn set_string(&self, key: &str, value: Option<&str>) -> StoreResult<()>;

    /// Read a boolean value
    async fn get_bool(&self, key: &str) -> StoreResult<Option<bool>>;

    /// Write or remove a boolean value
    async fn set_bool(&self, key: &str, value: Option<bool>) -> StoreResult<()>;

    /// Read an integer value
    async fn get_i64(&self, key: &str) -> StoreResult<Option<i64>>;

    /// Write or remove an integer value
    async fn set_i64(&self, key: &str, value: Option<i64>) -> StoreResult<()>;

    /// Remove a value regardless of its type
    async fn remove(&self, key: &str) -> StoreResult<()>;
}

// ============================================================================
// In-memory implementation
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum StoredValue {
    Text(String),
    Flag(bool),
    Number(i64),
}

/// In-memory secure store
///
/// Backs development builds and tests. Clones share the same underlying
/// map, mirroring how every handle to the platform keychain sees the same
/// data.
#[derive(Clone, Default)]
pub struct MemorySecureStore {
    entries: Arc<Mutex<HashMap<String, StoredValue>>>,
}

impl MemorySecureStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, StoredValue>> {
        // A poisoned lock still holds valid data; writes are single-value
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn get(&self, key: &str) -> Option<StoredValue> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: Option<StoredValue>) {
        let mut entries = self.entries();
        match value {
            Some(value) => {
                entries.insert(key.to_string(), value);
            }
            None => {
                entries.remove(key);
            }
        }
    }
}

impl SecureKeyValueStore for MemorySecureStore {
    async fn get_string(&self, key: &str) -> StoreResult<Option<String>> {
        match self.get(key) {
            None => Ok(None),
            Some(StoredValue::Text(value)) => Ok(Some(value)),
            Some(_) => Err(StoreError::WrongType {
                key: key.to_string(),
            }),
        }
    }

    async fn set_string(&self, key: &str, value: Option<&str>) -> StoreResult<()> {
        self.set(key, value.map(|v| StoredValue::Text(v.to_string())));
        Ok(())
    }

    async fn get_bool(&self, key: &str) -> StoreResult<Option<bool>> {
        match self.get(key) {
            None => Ok(None),
            Some(StoredValue::Flag(value)) => Ok(Some(value)),
            Some(_) => Err(StoreError::WrongType {
                key: key.to_string(),
            }),
        }
    }

    async fn set_bool(&self, key: &str, value: Option<bool>) -> StoreResult<()> {
        self.set(key, value.map(StoredValue::Flag));
        Ok(())
    }

    async fn get_i64(&self, key: &str) -> StoreResult<Option<i64>> {
        match self.get(key) {
            None => Ok(None),
            Some(StoredValue::Number(value)) => Ok(Some(value)),
            Some(_) => Err(StoreError::WrongType {
                key: key.to_string(),
            }),
        }
    }

    async fn set_i64(&self, key: &str, value: Option<i64>) -> StoreResult<()> {
        self.set(key, value.map(StoredValue::Number));
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.set(key, None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MemorySecureStore, SecureKeyValueStore, StoreError};

    #[tokio::test]
    async fn test_string_roundtrip() {
        let store = MemorySecureStore::new();
        assert_eq!(store.get_string("k").await.unwrap(), None);

        store.set_string("k", Some("7391")).await.unwrap();
        assert_eq!(store.get_string("k").await.unwrap(), Some("7391".into()));

        store.set_string("k", None).await.unwrap();
        assert_eq!(store.get_string("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_bool_absent_vs_false() {
        let store = MemorySecureStore::new();
        assert_eq!(store.get_bool("flag").await.unwrap(), None);

        store.set_bool("flag", Some(false)).await.unwrap();
        assert_eq!(store.get_bool("flag").await.unwrap(), Some(false));

        store.set_bool("flag", None).await.unwrap();
        assert_eq!(store.get_bool("flag").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_i64_roundtrip() {
        let store = MemorySecureStore::new();
        store.set_i64("count", Some(3)).await.unwrap();
        assert_eq!(store.get_i64("count").await.unwrap(), Some(3));
    }

    #[tokio::test]
    async fn test_wrong_type() {
        let store = MemorySecureStore::new();
        store.set_string("k", Some("text")).await.unwrap();

        let err = store.get_bool("k").await.unwrap_err();
        assert_eq!(err, StoreError::WrongType { key: "k".into() });
    }

    #[tokio::test]
    async fn test_remove_any_type() {
        let store = MemorySecureStore::new();
        store.set_i64("count", Some(3)).await.unwrap();
        store.remove("count").await.unwrap();
        assert_eq!(store.get_i64("count").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clones_share_data() {
        let store = MemorySecureStore::new();
        let other = store.clone();
        store.set_bool("flag", Some(true)).await.unwrap();
        assert_eq!(other.get_bool("flag").await.unwrap(), Some(true));
    }
}
