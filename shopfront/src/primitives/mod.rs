/// Device key-value storage implemented by the host app.
pub mod key_value_store;

/// HTTP client implemented by the host app.
pub mod http_client;

/// Logging that forwards to the host app's logger.
pub mod logger;

/// Process-wide configuration.
pub mod config;

/// Calendar dates as they cross the FFI boundary and land in storage.
pub mod date;

pub use date::CalendarDate;
