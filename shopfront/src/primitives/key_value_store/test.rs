use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use super::*;

/// In-memory implementation of [`DeviceKeyValueStore`] for testing
pub struct InMemoryDeviceKeyValueStore {
    store: Mutex<HashMap<String, String>>,
    failing_writes: Mutex<HashSet<String>>,
}

impl InMemoryDeviceKeyValueStore {
    /// Creates a new empty in-memory key-value store
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Mutex::new(HashMap::new()),
            failing_writes: Mutex::new(HashSet::new()),
        }
    }

    /// Seeds a value without going through `set`
    pub fn insert(&self, key: &str, value: &str) {
        self.store
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    /// Returns the raw stored value, if any
    pub fn raw(&self, key: &str) -> Option<String> {
        self.store.lock().unwrap().get(key).cloned()
    }

    /// Makes every subsequent `set` of `key` fail with `UpdateFailure`
    pub fn fail_writes_to(&self, key: &str) {
        self.failing_writes.lock().unwrap().insert(key.to_string());
    }

    /// Number of keys currently stored
    pub fn key_count(&self) -> usize {
        self.store.lock().unwrap().len()
    }
}

impl Default for InMemoryDeviceKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceKeyValueStore for InMemoryDeviceKeyValueStore {
    fn get(&self, key: String) -> Result<String, KeyValueStoreError> {
        let value = self.store.lock().unwrap().get(&key).cloned();
        value.ok_or(KeyValueStoreError::KeyNotFound)
    }

    fn set(&self, key: String, value: String) -> Result<(), KeyValueStoreError> {
        if self.failing_writes.lock().unwrap().contains(&key) {
            return Err(KeyValueStoreError::UpdateFailure);
        }
        self.store.lock().unwrap().insert(key, value);
        Ok(())
    }

    fn delete(&self, key: String) -> Result<(), KeyValueStoreError> {
        self.store
            .lock()
            .unwrap()
            .remove(&key)
            .map(|_| ())
            .ok_or(KeyValueStoreError::KeyNotFound)
    }
}

/// Store whose every operation fails as if the device storage were unavailable
pub struct UnavailableKeyValueStore;

impl DeviceKeyValueStore for UnavailableKeyValueStore {
    fn get(&self, _key: String) -> Result<String, KeyValueStoreError> {
        Err(KeyValueStoreError::UnexpectedUniFFICallbackError(
            "storage unavailable".to_string(),
        ))
    }

    fn set(&self, _key: String, _value: String) -> Result<(), KeyValueStoreError> {
        Err(KeyValueStoreError::UpdateFailure)
    }

    fn delete(&self, _key: String) -> Result<(), KeyValueStoreError> {
        Err(KeyValueStoreError::UpdateFailure)
    }
}

#[test]
fn test_get_optional_maps_missing_key_to_none() {
    let store = InMemoryDeviceKeyValueStore::new();
    assert_eq!(get_optional(&store, "users").unwrap(), None);

    store.insert("users", "[]");
    assert_eq!(get_optional(&store, "users").unwrap(), Some("[]".to_string()));
}

#[test]
fn test_get_optional_propagates_other_errors() {
    let err = get_optional(&UnavailableKeyValueStore, "users").unwrap_err();
    assert!(matches!(
        err,
        KeyValueStoreError::UnexpectedUniFFICallbackError(_)
    ));
}

#[test]
fn test_delete_if_present_ignores_missing_keys() {
    let store = InMemoryDeviceKeyValueStore::new();
    delete_if_present(&store, "avatar").unwrap();

    store.insert("avatar", "file:///a.png");
    delete_if_present(&store, "avatar").unwrap();
    assert_eq!(store.raw("avatar"), None);
    assert_eq!(store.key_count(), 0);
}
