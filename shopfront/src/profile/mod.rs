//! The signed-in user's profile
//!
//! A single [`UserProfile`] per device, persisted in the [`DeviceKeyValueStore`] as one JSON
//! record under [`PROFILE_KEY`]. Older app versions wrote every field under its own key; those
//! keys are still read (see [`repository::LEGACY_KEYS`]) until the next save replaces them.
//!
//! [`DeviceKeyValueStore`]: crate::primitives::key_value_store::DeviceKeyValueStore

use serde::{Deserialize, Serialize};

use crate::primitives::CalendarDate;

mod repository;

pub use repository::{ProfileRepository, ProfileStoreError, LEGACY_KEYS, PROFILE_KEY};

/// The profile of the signed-in user, with every field present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Free-form gender label, whatever the shell offered
    pub gender: String,
    /// Birth date
    pub birth_date: CalendarDate,
    /// Locator of the avatar image chosen on the device, if any. The image itself is
    /// owned by the host.
    #[serde(rename = "avatar", default, skip_serializing_if = "Option::is_none")]
    pub avatar_uri: Option<String>,
}

/// The profile as found in storage. A field is `None` when nothing was ever stored for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredProfile {
    /// Stored display name
    pub name: Option<String>,
    /// Stored email
    pub email: Option<String>,
    /// Stored gender label
    pub gender: Option<String>,
    /// Stored birth date
    pub birth_date: Option<CalendarDate>,
    /// Stored avatar locator
    #[serde(rename = "avatar")]
    pub avatar_uri: Option<String>,
}

impl StoredProfile {
    /// Whether nothing at all is stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.gender.is_none()
            && self.birth_date.is_none()
            && self.avatar_uri.is_none()
    }

    /// Fills the gaps: empty strings for text, `today` for the birth date, no avatar.
    #[must_use]
    pub fn with_defaults(self, today: CalendarDate) -> UserProfile {
        UserProfile {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            gender: self.gender.unwrap_or_default(),
            birth_date: self.birth_date.unwrap_or(today),
            avatar_uri: self.avatar_uri.filter(|uri| !uri.is_empty()),
        }
    }
}

impl From<UserProfile> for StoredProfile {
    fn from(profile: UserProfile) -> Self {
        Self {
            name: Some(profile.name),
            email: Some(profile.email),
            gender: Some(profile.gender),
            birth_date: Some(profile.birth_date),
            avatar_uri: profile.avatar_uri,
        }
    }
}

/// What the shell should render as the avatar.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum AvatarSource {
    /// The image behind this locator
    Stored {
        /// Locator of the image chosen on the device
        uri: String,
    },
    /// The placeholder bundled with the shell
    Placeholder,
}

impl AvatarSource {
    /// `Placeholder` for a missing or empty locator.
    #[must_use]
    pub fn from_uri(uri: Option<&str>) -> Self {
        match uri {
            Some(uri) if !uri.is_empty() => Self::Stored {
                uri: uri.to_string(),
            },
            _ => Self::Placeholder,
        }
    }
}

/// Fills the gaps of a stored profile, see [`StoredProfile::with_defaults`].
#[uniffi::export]
#[must_use]
pub fn profile_with_defaults(stored: StoredProfile, today: CalendarDate) -> UserProfile {
    stored.with_defaults(today)
}
