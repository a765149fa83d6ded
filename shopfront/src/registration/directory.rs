use std::sync::Arc;

use crate::primitives::key_value_store::{get_optional, DeviceKeyValueStore, KeyValueStoreError};

use super::UserRecord;

/// Key holding the JSON array of registered accounts.
pub const USERS_KEY: &str = "users";

/// Errors raised by [`UserDirectory`]
#[crate::shopfront_error]
pub enum UserDirectoryError {
    /// The device store failed
    #[error(transparent)]
    KeyValueStore(#[from] KeyValueStoreError),
    /// The stored list is not a valid JSON array of accounts
    #[error("stored user list is corrupted: {message}")]
    Corrupted {
        /// The decoding error
        message: String,
    },
    /// The list could not be encoded
    #[error("failed to serialize user list: {message}")]
    Serialization {
        /// The error message from `serde_json`
        message: String,
    },
}

/// The ordered list of accounts registered on this device.
///
/// Kept as one JSON array under [`USERS_KEY`]; every append rewrites the whole list.
pub struct UserDirectory {
    kv_store: Arc<dyn DeviceKeyValueStore>,
}

impl UserDirectory {
    /// Creates a directory over the device key-value store.
    #[must_use]
    pub fn new(kv_store: Arc<dyn DeviceKeyValueStore>) -> Self {
        Self { kv_store }
    }

    /// All registered accounts, oldest first. Empty if nothing was ever stored.
    ///
    /// # Errors
    /// - `UserDirectoryError::KeyValueStore` if the device store fails
    /// - `UserDirectoryError::Corrupted` if the stored list cannot be decoded; it is left as is
    pub fn list(&self) -> Result<Vec<UserRecord>, UserDirectoryError> {
        let Some(json) = get_optional(self.kv_store.as_ref(), USERS_KEY)? else {
            return Ok(Vec::new());
        };

        // A literal `null` was written by older builds for an empty list.
        serde_json::from_str::<Option<Vec<UserRecord>>>(&json)
            .map(Option::unwrap_or_default)
            .map_err(|e| UserDirectoryError::Corrupted {
                message: e.to_string(),
            })
    }

    /// Appends `record` after the existing accounts and returns the new count.
    ///
    /// Uniqueness is the caller's concern.
    ///
    /// # Errors
    /// Same as [`list`](Self::list), plus `UserDirectoryError::Serialization` and write failures.
    pub fn append(&self, record: UserRecord) -> Result<usize, UserDirectoryError> {
        let mut users = self.list()?;
        users.push(record);

        let json = serde_json::to_string(&users).map_err(|e| UserDirectoryError::Serialization {
            message: e.to_string(),
        })?;
        self.kv_store.set(USERS_KEY.to_string(), json)?;

        Ok(users.len())
    }
}
