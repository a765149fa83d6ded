#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

//! `shopfront` is the shared core of the ILivaShop mobile app.
//!
//! The native shells (Swift/Kotlin) render the screens; this crate owns what happens
//! behind them: the locally persisted user profile, the registration form checks and the
//! registered-user list, the settings menu and the product home feed. Device storage,
//! networking and logging are provided by the host through foreign traits.

use shopfront_macros::{shopfront_error, shopfront_export};

/// Host-provided primitives: device key-value storage, HTTP, logging, configuration and
/// the calendar date type shared across the FFI boundary.
pub mod primitives;

/// Error handling utilities shared by every error enum of the crate.
pub mod shopfront_error;

/// The locally persisted profile of the signed-in user.
pub mod profile;

/// Registration form checks and the persisted list of registered users.
pub mod registration;

/// The edit-profile screen flow.
pub mod editor;

/// The settings screen: header, static menu and log-out.
pub mod settings;

/// The product home feed: categories, products, search and the banner carousel.
pub mod feed;

/// Screens the core can ask the shell to navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum NavigationTarget {
    /// The login screen.
    Login,
    /// The edit-profile screen.
    EditProfile,
}

uniffi::setup_scaffolding!("shopfront");
