use std::sync::Arc;

use crate::primitives::key_value_store::DeviceKeyValueStore;
use crate::primitives::CalendarDate;
use crate::NavigationTarget;

use super::validator::{check_form, check_unique_email};
use super::{RegistrationError, RegistrationForm, UserDirectory, UserRecord};

/// Result of an accepted registration.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct RegistrationOutcome {
    /// Number of accounts on the device, including the new one
    pub registered_count: u64,
    /// Where the shell goes next
    pub next: NavigationTarget,
}

/// Drives the registration screen: validates the form and records the account.
#[derive(uniffi::Object)]
pub struct RegistrationFlow {
    directory: UserDirectory,
}

#[crate::shopfront_export]
impl RegistrationFlow {
    /// Creates a flow over the device key-value store.
    #[uniffi::constructor]
    pub fn new(kv_store: Arc<dyn DeviceKeyValueStore>) -> Arc<Self> {
        Arc::new(Self {
            directory: UserDirectory::new(kv_store),
        })
    }

    /// Validates `form` against today's date on the device calendar and, if accepted,
    /// appends the account.
    ///
    /// The form checks run before storage is touched, so a rejected form never reads the
    /// user list. Nothing is written unless every check passes.
    ///
    /// # Errors
    /// - `RegistrationError::Validation` with the first failing check
    /// - `RegistrationError::Storage` if the user list cannot be read or written
    pub fn register(
        &self,
        form: RegistrationForm,
    ) -> Result<RegistrationOutcome, RegistrationError> {
        self.register_on(form, CalendarDate::today())
    }

    /// Every account registered on this device, oldest first.
    ///
    /// # Errors
    /// `RegistrationError::Storage` if the user list cannot be read.
    pub fn registered_users(&self) -> Result<Vec<UserRecord>, RegistrationError> {
        Ok(self.directory.list()?)
    }
}

impl RegistrationFlow {
    /// [`register`](Self::register) with an explicit current date.
    ///
    /// # Errors
    /// See [`register`](Self::register).
    pub fn register_on(
        &self,
        form: RegistrationForm,
        today: CalendarDate,
    ) -> Result<RegistrationOutcome, RegistrationError> {
        check_form(&form, today).inspect_err(log_rejection)?;

        let existing = self.directory.list()?;
        check_unique_email(&form.email, &existing).inspect_err(log_rejection)?;

        let count = self.directory.append(UserRecord::from(form))?;
        crate::info!("registration.accepted registered_count={count}");

        Ok(RegistrationOutcome {
            registered_count: count as u64,
            next: NavigationTarget::Login,
        })
    }
}

fn log_rejection(e: &super::ValidationError) {
    crate::info!("registration.rejected reason={}", e.code());
}
