//! Account registration
//!
//! A [`RegistrationForm`] is checked in a fixed order (see [`validator`]) and, when accepted,
//! appended to the local [`UserDirectory`]. Accounts exist only on the device; there is no
//! server-side registration.

use serde::{Deserialize, Serialize};

use crate::primitives::key_value_store::KeyValueStoreError;
use crate::primitives::CalendarDate;

mod directory;
mod flow;
/// Registration form checks.
pub mod validator;

pub use directory::{UserDirectory, UserDirectoryError, USERS_KEY};
pub use flow::{RegistrationFlow, RegistrationOutcome};
pub use validator::{RequiredField, ValidationError};

/// What the user typed into the registration screen.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct RegistrationForm {
    /// Full name
    pub name: String,
    /// Email, must be a Gmail address
    pub email: String,
    /// Password, stored as entered
    pub password: String,
    /// Repeated password
    pub confirm_password: String,
    /// Gender label picked in the form
    pub gender: String,
    /// Birth date
    pub birth_date: CalendarDate,
}

/// A registered account as kept in the [`UserDirectory`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Full name
    pub name: String,
    /// Email, unique across the directory
    pub email: String,
    /// Password, stored as entered
    pub password: String,
    /// Gender label
    pub gender: String,
    /// Birth date
    pub birth_date: CalendarDate,
}

impl From<RegistrationForm> for UserRecord {
    fn from(form: RegistrationForm) -> Self {
        Self {
            name: form.name,
            email: form.email,
            password: form.password,
            gender: form.gender,
            birth_date: form.birth_date,
        }
    }
}

/// Errors raised by [`RegistrationFlow`]
#[crate::shopfront_error]
pub enum RegistrationError {
    /// The form was rejected; the message is the notice to show
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The user directory could not be read or written. Details are logged, not shown.
    #[error("Something went wrong.")]
    Storage {
        /// What failed, for diagnostics
        detail: String,
    },
}

impl From<UserDirectoryError> for RegistrationError {
    fn from(e: UserDirectoryError) -> Self {
        crate::error!("registration.storage_failed error={e}");
        Self::Storage {
            detail: e.to_string(),
        }
    }
}

impl From<KeyValueStoreError> for RegistrationError {
    fn from(e: KeyValueStoreError) -> Self {
        UserDirectoryError::from(e).into()
    }
}
