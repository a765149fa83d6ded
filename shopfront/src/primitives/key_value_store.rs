use thiserror::Error;

/// Errors that can occur when interacting with the device key-value store
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone, PartialEq, Eq, Error, uniffi::Error)]
pub enum KeyValueStoreError {
    /// The requested key was not found in the store
    #[error("key not found")]
    KeyNotFound,
    /// The store could not read back the value it holds for the key
    #[error("failed to parse value")]
    ParsingFailure,
    /// Failed to write or delete the value (e.g. the device is out of space)
    #[error("failed to update value")]
    UpdateFailure,
    /// An unexpected error occurred in the foreign callback
    #[error("unexpected error in foreign callback: {0}")]
    UnexpectedUniFFICallbackError(String),
}

impl From<uniffi::UnexpectedUniFFICallbackError> for KeyValueStoreError {
    fn from(e: uniffi::UnexpectedUniFFICallbackError) -> Self {
        Self::UnexpectedUniFFICallbackError(e.reason)
    }
}

/// A string key-value store persisted on the device, implemented by the native app.
///
/// Android backs it with `SharedPreferences`, iOS with `UserDefaults`. Values survive app
/// restarts but not uninstalls. Structured values are stored as JSON strings.
///
/// This is **not a secure store**: there is no encryption and no integrity guarantee. Values
/// may be corrupted or edited at any time, so every reader must tolerate garbage.
#[uniffi::export(with_foreign)]
pub trait DeviceKeyValueStore: Send + Sync {
    /// Get a value from the key-value store
    ///
    /// # Errors
    /// - `KeyValueStoreError::KeyNotFound` if the key is not found
    /// - `KeyValueStoreError::ParsingFailure` if something goes wrong while parsing the value
    fn get(&self, key: String) -> Result<String, KeyValueStoreError>;

    /// Set a value in the key-value store
    ///
    /// # Errors
    /// - `KeyValueStoreError::UpdateFailure` if something goes wrong while updating the value
    fn set(&self, key: String, value: String) -> Result<(), KeyValueStoreError>;

    /// Delete a value from the key-value store
    ///
    /// # Errors
    /// - `KeyValueStoreError::KeyNotFound` if the key is not found
    /// - `KeyValueStoreError::UpdateFailure` if something goes wrong while updating the value
    fn delete(&self, key: String) -> Result<(), KeyValueStoreError>;
}

/// Reads `key`, mapping `KeyNotFound` to `None`.
///
/// # Errors
/// Any store error other than `KeyNotFound`.
pub fn get_optional(
    store: &dyn DeviceKeyValueStore,
    key: &str,
) -> Result<Option<String>, KeyValueStoreError> {
    match store.get(key.to_string()) {
        Ok(value) => Ok(Some(value)),
        Err(KeyValueStoreError::KeyNotFound) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Deletes `key`, treating a missing key as already deleted.
///
/// # Errors
/// Any store error other than `KeyNotFound`.
pub fn delete_if_present(
    store: &dyn DeviceKeyValueStore,
    key: &str,
) -> Result<(), KeyValueStoreError> {
    match store.delete(key.to_string()) {
        Ok(()) | Err(KeyValueStoreError::KeyNotFound) => Ok(()),
        Err(e) => Err(e),
    }
}

/// Test doubles for the key-value store
#[cfg(test)]
pub mod test;
