use once_cell::sync::Lazy;
use regex::Regex;

use crate::primitives::CalendarDate;

use super::{RegistrationForm, UserRecord};

/// Shortest accepted password, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Minimum age, in whole years, to register.
pub const MIN_REGISTRATION_AGE: i32 = 18;

/// Only Gmail addresses are accepted.
static GMAIL_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@gmail\.com$").expect("static regex is valid")
});

/// Form fields that must not be empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum RequiredField {
    /// Full name
    Name,
    /// Email address
    Email,
    /// Password
    Password,
    /// Password confirmation
    ConfirmPassword,
    /// Gender
    Gender,
}

impl RequiredField {
    /// Field name as used in log lines.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirm_password",
            Self::Gender => "gender",
        }
    }
}

impl std::fmt::Display for RequiredField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a registration form was rejected.
///
/// The display text is the notice shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, uniffi::Error)]
pub enum ValidationError {
    /// A required field is empty
    #[error("All fields are required.")]
    MissingField {
        /// The first empty field, in form order
        field: RequiredField,
    },
    /// The email is not a `<local>@gmail.com` address
    #[error("Only Gmail accounts are allowed.")]
    BadEmailFormat,
    /// The password is shorter than [`MIN_PASSWORD_LENGTH`]
    #[error("Password must be at least 8 characters.")]
    WeakPassword,
    /// Password and confirmation differ
    #[error("Passwords do not match.")]
    PasswordMismatch,
    /// Younger than [`MIN_REGISTRATION_AGE`]
    #[error("You must be at least 18 years old to register.")]
    Underage,
    /// An account with this email already exists
    #[error("Email is already registered.")]
    DuplicateEmail,
}

impl ValidationError {
    /// Short machine-readable reason for logs.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::BadEmailFormat => "bad_email_format",
            Self::WeakPassword => "weak_password",
            Self::PasswordMismatch => "password_mismatch",
            Self::Underage => "underage",
            Self::DuplicateEmail => "duplicate_email",
        }
    }
}

/// Whether `email` is a `<local>@gmail.com` address.
#[uniffi::export]
#[must_use]
pub fn is_valid_gmail_address(email: &str) -> bool {
    GMAIL_ADDRESS.is_match(email)
}

/// Whether `password` is long enough. Composition is not checked.
#[uniffi::export]
#[must_use]
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

/// Age in whole years on `today` for someone born on `birth_date`.
#[uniffi::export]
#[must_use]
pub fn age_on(birth_date: CalendarDate, today: CalendarDate) -> i32 {
    birth_date.years_until(today)
}

/// Runs the checks that need no stored data, in order, stopping at the first failure:
/// required fields, email format, password strength, confirmation, age.
///
/// # Errors
/// The first failing check.
pub fn check_form(form: &RegistrationForm, today: CalendarDate) -> Result<(), ValidationError> {
    let required = [
        (RequiredField::Name, &form.name),
        (RequiredField::Email, &form.email),
        (RequiredField::Password, &form.password),
        (RequiredField::ConfirmPassword, &form.confirm_password),
        (RequiredField::Gender, &form.gender),
    ];
    if let Some((field, _)) = required.iter().find(|(_, value)| value.is_empty()) {
        return Err(ValidationError::MissingField { field: *field });
    }

    if !is_valid_gmail_address(&form.email) {
        return Err(ValidationError::BadEmailFormat);
    }

    if !is_strong_password(&form.password) {
        return Err(ValidationError::WeakPassword);
    }

    if form.password != form.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }

    if age_on(form.birth_date, today) < MIN_REGISTRATION_AGE {
        return Err(ValidationError::Underage);
    }

    Ok(())
}

/// Rejects `email` if any existing record already uses it.
///
/// # Errors
/// `ValidationError::DuplicateEmail`
pub fn check_unique_email(email: &str, existing: &[UserRecord]) -> Result<(), ValidationError> {
    if existing.iter().any(|user| user.email == email) {
        return Err(ValidationError::DuplicateEmail);
    }
    Ok(())
}

/// Runs the full check chain against the given registered users.
///
/// # Errors
/// The first failing check, see [`check_form`] and [`check_unique_email`].
#[uniffi::export]
#[allow(clippy::needless_pass_by_value)] // uniffi lifts records by value
pub fn validate_registration(
    form: RegistrationForm,
    today: CalendarDate,
    existing: Vec<UserRecord>,
) -> Result<(), ValidationError> {
    check_form(&form, today)?;
    check_unique_email(&form.email, &existing)
}
