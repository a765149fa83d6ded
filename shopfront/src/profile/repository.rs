use std::sync::Arc;

use crate::primitives::key_value_store::{
    delete_if_present, get_optional, DeviceKeyValueStore, KeyValueStoreError,
};
use crate::primitives::CalendarDate;

use super::{StoredProfile, UserProfile};

/// Key holding the JSON-serialized profile.
pub const PROFILE_KEY: &str = "profile";

/// Per-field keys written by app versions that predate [`PROFILE_KEY`]:
/// name, email, gender, birth date (ISO timestamp) and avatar locator.
pub const LEGACY_KEYS: [&str; 5] = ["username", "email", "gender", "birthDate", "avatar"];

/// Errors raised by [`ProfileRepository`]
#[crate::shopfront_error]
pub enum ProfileStoreError {
    /// The device store failed
    #[error(transparent)]
    KeyValueStore(#[from] KeyValueStoreError),
    /// The profile could not be serialized
    #[error("failed to serialize profile: {message}")]
    Serialization {
        /// The error message from `serde_json`
        message: String,
    },
}

impl From<serde_json::Error> for ProfileStoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization {
            message: e.to_string(),
        }
    }
}

/// Durable storage for the profile of the signed-in user.
///
/// Stateless: every [`load`](Self::load) reads the device store again, so two repositories
/// over the same store always agree.
///
/// ## Storage layout
///
/// The whole profile is one JSON record under `profile`, written with a single `set`, so a
/// failed save leaves the previous profile intact. When `profile` is absent the legacy
/// per-field keys are read instead; the first successful save removes them.
#[derive(uniffi::Object)]
pub struct ProfileRepository {
    kv_store: Arc<dyn DeviceKeyValueStore>,
}

#[crate::shopfront_export]
impl ProfileRepository {
    /// Creates a repository over the device key-value store.
    #[uniffi::constructor]
    pub fn new(kv_store: Arc<dyn DeviceKeyValueStore>) -> Arc<Self> {
        Arc::new(Self { kv_store })
    }

    /// Reads the stored profile. Missing data is not an error: absent fields are `None`.
    ///
    /// A corrupted record is logged and treated as absent.
    ///
    /// # Errors
    /// `ProfileStoreError::KeyValueStore` if the device store fails for a reason other than
    /// a missing key.
    pub fn load(&self) -> Result<StoredProfile, ProfileStoreError> {
        let Some(json) = get_optional(self.kv_store.as_ref(), PROFILE_KEY)? else {
            return self.load_legacy();
        };

        match serde_json::from_str::<StoredProfile>(&json) {
            Ok(stored) => Ok(stored),
            Err(e) => {
                crate::warn!("profile.corrupted key={PROFILE_KEY} error={e}, resetting");
                Ok(StoredProfile::default())
            }
        }
    }

    /// Replaces the stored profile with `profile` in a single write.
    ///
    /// An empty avatar locator means no avatar and is stored as `None`.
    ///
    /// # Errors
    /// - `ProfileStoreError::Serialization` if the record cannot be encoded
    /// - `ProfileStoreError::KeyValueStore` if the write fails; the previous profile is kept
    pub fn save(&self, mut profile: UserProfile) -> Result<(), ProfileStoreError> {
        profile.avatar_uri = profile.avatar_uri.filter(|uri| !uri.is_empty());
        let json = serde_json::to_string(&profile)?;
        self.kv_store.set(PROFILE_KEY.to_string(), json)?;
        crate::debug!(
            "profile.saved has_avatar={} birth_date={}",
            profile.avatar_uri.is_some(),
            profile.birth_date
        );

        self.remove_legacy_keys();
        Ok(())
    }
}

impl ProfileRepository {
    /// [`load`](Self::load) with the gaps filled, see [`StoredProfile::with_defaults`].
    ///
    /// # Errors
    /// Same as [`load`](Self::load).
    pub fn load_with_defaults(
        &self,
        today: CalendarDate,
    ) -> Result<UserProfile, ProfileStoreError> {
        Ok(self.load()?.with_defaults(today))
    }

    /// Reads the per-field layout. Each key is read on its own; a missing key is `None`.
    fn load_legacy(&self) -> Result<StoredProfile, ProfileStoreError> {
        let [name_key, email_key, gender_key, birth_date_key, avatar_key] = LEGACY_KEYS;
        let store = self.kv_store.as_ref();

        let birth_date = get_optional(store, birth_date_key)?.and_then(|raw| {
            raw.parse::<CalendarDate>()
                .map_err(|e| crate::warn!("profile.legacy_birth_date_unreadable error={e}"))
                .ok()
        });

        let stored = StoredProfile {
            name: get_optional(store, name_key)?,
            email: get_optional(store, email_key)?,
            gender: get_optional(store, gender_key)?,
            birth_date,
            avatar_uri: get_optional(store, avatar_key)?,
        };

        if !stored.is_empty() {
            crate::info!("profile.legacy_layout_read");
        }
        Ok(stored)
    }

    /// Best-effort cleanup after the record has been written.
    fn remove_legacy_keys(&self) {
        for key in LEGACY_KEYS {
            if let Err(e) = delete_if_present(self.kv_store.as_ref(), key) {
                crate::warn!("profile.legacy_cleanup_failed key={key} error={e}");
            }
        }
    }
}
