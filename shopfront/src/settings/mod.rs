//! The settings screen
//!
//! A header with the stored display name and avatar, then a fixed menu. Only two entries
//! do anything: the profile entry opens the editor and "Log out" leads back to the login
//! screen after confirmation. Logging out keeps the stored profile.

use std::sync::Arc;

use crate::primitives::key_value_store::DeviceKeyValueStore;
use crate::profile::{AvatarSource, ProfileRepository, StoredProfile};
use crate::NavigationTarget;

/// Shown in the header when no name is stored.
pub const FALLBACK_DISPLAY_NAME: &str = "username";

/// Label of the menu entry that logs out.
pub const LOG_OUT_LABEL: &str = "Log out";

/// Label of the menu entry that opens the profile editor.
pub const PROFILE_LABEL: &str = "Profile";

/// Special behavior attached to a menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum SettingsAction {
    /// Ends the session after confirmation
    LogOut,
}

/// One row of the settings menu.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct SettingsOption {
    /// Text of the row
    pub label: String,
    /// Name of the icon the shell draws next to it
    pub icon: String,
    /// What selecting it does beyond navigation, if anything
    pub action: Option<SettingsAction>,
}

/// Top of the settings screen.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct SettingsHeader {
    /// Stored name, or [`FALLBACK_DISPLAY_NAME`]
    pub display_name: String,
    /// What to render as the avatar
    pub avatar: AvatarSource,
}

/// What the shell should do after a menu entry was selected.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum SettingsOutcome {
    /// Push the given screen
    Navigate {
        /// Screen to open
        target: NavigationTarget,
    },
    /// Ask the user to confirm logging out, then call [`SettingsMenu::confirm_log_out`]
    ConfirmLogOut,
    /// Nothing happens
    NoOp,
}

const MENU: [(&str, &str, Option<SettingsAction>); 8] = [
    (PROFILE_LABEL, "person-outline", None),
    ("History", "time-outline", None),
    ("Personal Details", "person-outline", None),
    ("Address", "location-outline", None),
    ("Payment Method", "card-outline", None),
    ("About", "information-circle-outline", None),
    ("Help", "help-circle-outline", None),
    (LOG_OUT_LABEL, "log-out-outline", Some(SettingsAction::LogOut)),
];

/// Drives the settings screen.
#[derive(uniffi::Object)]
pub struct SettingsMenu {
    repository: Arc<ProfileRepository>,
}

#[crate::shopfront_export]
impl SettingsMenu {
    /// Creates the menu over the device key-value store.
    #[uniffi::constructor]
    pub fn new(kv_store: Arc<dyn DeviceKeyValueStore>) -> Arc<Self> {
        Arc::new(Self {
            repository: ProfileRepository::new(kv_store),
        })
    }

    /// Name and avatar for the header. Never fails: a storage error is logged and the
    /// fallback header is returned.
    #[must_use]
    pub fn header(&self) -> SettingsHeader {
        let stored = self.repository.load().unwrap_or_else(|e| {
            crate::warn!("settings.header_load_failed error={e}");
            StoredProfile::default()
        });

        SettingsHeader {
            display_name: stored
                .name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| FALLBACK_DISPLAY_NAME.to_string()),
            avatar: AvatarSource::from_uri(stored.avatar_uri.as_deref()),
        }
    }

    /// The menu entries, in display order.
    #[must_use]
    #[allow(clippy::unused_self)] // uniffi has no associated functions
    pub fn options(&self) -> Vec<SettingsOption> {
        MENU.iter()
            .map(|(label, icon, action)| SettingsOption {
                label: (*label).to_string(),
                icon: (*icon).to_string(),
                action: *action,
            })
            .collect()
    }

    /// Reacts to the header or a menu entry being tapped. The header uses
    /// [`PROFILE_LABEL`].
    #[must_use]
    #[allow(clippy::unused_self)] // uniffi has no associated functions
    pub fn select(&self, label: &str) -> SettingsOutcome {
        let outcome = match label {
            PROFILE_LABEL => SettingsOutcome::Navigate {
                target: NavigationTarget::EditProfile,
            },
            LOG_OUT_LABEL => SettingsOutcome::ConfirmLogOut,
            _ => SettingsOutcome::NoOp,
        };
        crate::debug!("settings.selected label={label} outcome={outcome:?}");
        outcome
    }

    /// Logs out: the shell replaces its navigation stack with the returned screen.
    /// The stored profile is kept.
    #[must_use]
    #[allow(clippy::unused_self)] // uniffi has no associated functions
    pub fn confirm_log_out(&self) -> NavigationTarget {
        crate::info!("settings.logged_out");
        NavigationTarget::Login
    }
}
