//! The edit-profile screen
//!
//! [`ProfileEditor::open`] loads the stored profile with defaults applied;
//! [`ProfileEditor::save`] checks the edited profile against the [`ProfileEditPolicy`] and
//! persists it in one write.

use std::sync::Arc;

use crate::primitives::config::current_config;
use crate::primitives::key_value_store::DeviceKeyValueStore;
use crate::primitives::CalendarDate;
use crate::profile::{AvatarSource, ProfileRepository, ProfileStoreError, UserProfile};
use crate::registration::validator::is_valid_gmail_address;

/// Checks applied when the edited profile is saved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, uniffi::Enum)]
pub enum ProfileEditPolicy {
    /// Name and email must be non-empty
    #[default]
    Lenient,
    /// Lenient, plus a Gmail email and a birth date that is not in the future
    Strict,
}

/// The profile as presented on the edit screen.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct EditableProfile {
    /// Profile values, defaults applied
    pub profile: UserProfile,
    /// What to render as the avatar
    pub avatar: AvatarSource,
}

/// Errors raised by [`ProfileEditor`]. The display text is the notice shown to the user.
#[crate::shopfront_error]
pub enum ProfileEditError {
    /// Name or email is empty
    #[error("Name and Email cannot be empty.")]
    MissingField,
    /// Strict policy only: the email is not a Gmail address
    #[error("Only Gmail accounts are allowed.")]
    BadEmailFormat,
    /// Strict policy only: the birth date is after today
    #[error("Birth date cannot be in the future.")]
    BirthDateInFuture,
    /// The profile could not be read or written. Details are logged, not shown.
    #[error("Something went wrong.")]
    Storage {
        /// What failed, for diagnostics
        detail: String,
    },
}

impl From<ProfileStoreError> for ProfileEditError {
    fn from(e: ProfileStoreError) -> Self {
        crate::error!("profile_editor.storage_failed error={e}");
        Self::Storage {
            detail: e.to_string(),
        }
    }
}

/// Checks `profile` against `policy` on `today`.
///
/// # Errors
/// The first failing check: empty fields, then (strict only) email format, then birth date.
pub fn check_profile(
    profile: &UserProfile,
    policy: ProfileEditPolicy,
    today: CalendarDate,
) -> Result<(), ProfileEditError> {
    if profile.name.is_empty() || profile.email.is_empty() {
        return Err(ProfileEditError::MissingField);
    }

    if policy == ProfileEditPolicy::Strict {
        if !is_valid_gmail_address(&profile.email) {
            return Err(ProfileEditError::BadEmailFormat);
        }
        if profile.birth_date > today {
            return Err(ProfileEditError::BirthDateInFuture);
        }
    }

    Ok(())
}

/// Drives the edit-profile screen.
#[derive(uniffi::Object)]
pub struct ProfileEditor {
    repository: Arc<ProfileRepository>,
    policy: ProfileEditPolicy,
}

#[crate::shopfront_export]
impl ProfileEditor {
    /// Creates an editor using the configured edit policy.
    #[uniffi::constructor]
    pub fn new(kv_store: Arc<dyn DeviceKeyValueStore>) -> Arc<Self> {
        Self::with_policy(kv_store, current_config().edit_policy())
    }

    /// Creates an editor with an explicit edit policy.
    #[uniffi::constructor]
    pub fn with_policy(
        kv_store: Arc<dyn DeviceKeyValueStore>,
        policy: ProfileEditPolicy,
    ) -> Arc<Self> {
        Arc::new(Self {
            repository: ProfileRepository::new(kv_store),
            policy,
        })
    }

    /// The policy applied on save.
    #[must_use]
    pub fn policy(&self) -> ProfileEditPolicy {
        self.policy
    }

    /// Loads the profile for display, filling gaps with defaults.
    ///
    /// # Errors
    /// `ProfileEditError::Storage` if the device store fails.
    pub fn open(&self) -> Result<EditableProfile, ProfileEditError> {
        self.open_on(CalendarDate::today())
    }

    /// Checks and saves the edited profile. On failure nothing is written.
    ///
    /// # Errors
    /// - `ProfileEditError::MissingField`, `BadEmailFormat` or `BirthDateInFuture` if a
    ///   check fails
    /// - `ProfileEditError::Storage` if the write fails
    pub fn save(&self, profile: UserProfile) -> Result<(), ProfileEditError> {
        self.save_on(profile, CalendarDate::today())
    }
}

impl ProfileEditor {
    /// [`open`](Self::open) with an explicit current date.
    ///
    /// # Errors
    /// See [`open`](Self::open).
    pub fn open_on(&self, today: CalendarDate) -> Result<EditableProfile, ProfileEditError> {
        let profile = self.repository.load_with_defaults(today)?;
        let avatar = AvatarSource::from_uri(profile.avatar_uri.as_deref());
        crate::debug!(
            "profile_editor.opened has_avatar={}",
            avatar != AvatarSource::Placeholder
        );
        Ok(EditableProfile { profile, avatar })
    }

    /// [`save`](Self::save) with an explicit current date.
    ///
    /// # Errors
    /// See [`save`](Self::save).
    pub fn save_on(
        &self,
        profile: UserProfile,
        today: CalendarDate,
    ) -> Result<(), ProfileEditError> {
        if let Err(e) = check_profile(&profile, self.policy, today) {
            crate::info!("profile_editor.rejected policy={:?} reason={e}", self.policy);
            return Err(e);
        }

        self.repository.save(profile)?;
        crate::info!("profile_editor.saved");
        Ok(())
    }
}
