//! Error handling utilities
//!
//! Every FFI error enum of the crate is declared with `#[crate::shopfront_error]`, which
//! combines strongly typed variants for the cases callers act on with a `Generic` variant
//! for anything arriving as an `anyhow` error chain.

/// Re-export anyhow for convenience
pub use anyhow;

/// Flattens an `anyhow` error chain into a single message
pub trait AnyhowErrorExt {
    /// The outer error followed by ` (caused by: a -> b)` when there are causes
    fn to_generic_message(self) -> String;

    /// Same as `to_generic_message` with `prefix: ` in front
    fn to_generic_message_with_prefix(self, prefix: &str) -> String;
}

impl AnyhowErrorExt for anyhow::Error {
    fn to_generic_message(self) -> String {
        let mut message = self.to_string();

        let chain: Vec<String> = self.chain().skip(1).map(ToString::to_string).collect();
        if !chain.is_empty() {
            message.push_str(" (caused by: ");
            message.push_str(&chain.join(" -> "));
            message.push(')');
        }

        message
    }

    fn to_generic_message_with_prefix(self, prefix: &str) -> String {
        format!("{}: {}", prefix, self.to_generic_message())
    }
}
