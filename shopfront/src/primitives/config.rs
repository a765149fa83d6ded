use std::sync::OnceLock;

use crate::editor::ProfileEditPolicy;

/// Global configuration for the core
static CONFIG_INSTANCE: OnceLock<ShopfrontConfig> = OnceLock::new();

/// Base URL used when the host never configured one.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Remote request timeout used when the host never configured one.
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 15;

/// Deployment environment of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum ShopEnvironment {
    /// Staging backend
    Staging,
    /// Production backend
    Production,
}

impl ShopEnvironment {
    /// Returns the string representation of the environment
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

impl std::fmt::Display for ShopEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Process-wide configuration, set once by the host at startup.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Object)]
pub struct ShopfrontConfig {
    environment: ShopEnvironment,
    api_base_url: String,
    request_timeout_seconds: u64,
    edit_policy: ProfileEditPolicy,
}

#[crate::shopfront_export]
impl ShopfrontConfig {
    /// Creates a configuration.
    ///
    /// A trailing `/` on `api_base_url` is dropped. A zero timeout falls back to
    /// [`DEFAULT_REQUEST_TIMEOUT_SECONDS`].
    ///
    /// # Examples
    ///
    /// ## Swift
    ///
    /// ```swift
    /// let config = ShopfrontConfig(
    ///     environment: .production,
    ///     apiBaseUrl: "https://api.ilivashop.vn",
    ///     requestTimeoutSeconds: 15,
    ///     editPolicy: .lenient
    /// )
    /// Shopfront.initShopfrontConfig(config: config)
    /// ```
    #[uniffi::constructor]
    #[must_use]
    pub fn new(
        environment: ShopEnvironment,
        api_base_url: String,
        request_timeout_seconds: u64,
        edit_policy: ProfileEditPolicy,
    ) -> Self {
        let request_timeout_seconds = if request_timeout_seconds == 0 {
            crate::warn!(
                "config.timeout_fallback requested=0 used={DEFAULT_REQUEST_TIMEOUT_SECONDS}"
            );
            DEFAULT_REQUEST_TIMEOUT_SECONDS
        } else {
            request_timeout_seconds
        };

        Self {
            environment,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            request_timeout_seconds,
            edit_policy,
        }
    }

    /// Gets the environment
    #[must_use]
    pub fn environment(&self) -> ShopEnvironment {
        self.environment
    }

    /// Base URL of the shop backend, without a trailing `/`
    #[must_use]
    pub fn api_base_url(&self) -> String {
        self.api_base_url.clone()
    }

    /// Timeout applied to every remote request
    #[must_use]
    pub fn request_timeout_seconds(&self) -> u64 {
        self.request_timeout_seconds
    }

    /// Checks applied when the edit-profile screen saves
    #[must_use]
    pub fn edit_policy(&self) -> ProfileEditPolicy {
        self.edit_policy
    }
}

impl Default for ShopfrontConfig {
    fn default() -> Self {
        Self {
            environment: ShopEnvironment::Production,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            edit_policy: ProfileEditPolicy::default(),
        }
    }
}

/// Installs the global configuration.
///
/// Call once at app startup, before creating any flow. Later calls are ignored with a
/// warning. Returns whether this call installed the configuration.
#[uniffi::export]
pub fn init_shopfront_config(config: std::sync::Arc<ShopfrontConfig>) -> bool {
    let environment = config.environment;
    match CONFIG_INSTANCE.set((*config).clone()) {
        Ok(()) => {
            crate::info!("config.initialized environment={environment}");
            true
        }
        Err(_) => {
            crate::warn!("config.already_initialized ignoring=true");
            false
        }
    }
}

/// The installed configuration, or the defaults when none was installed.
#[must_use]
pub fn current_config() -> ShopfrontConfig {
    CONFIG_INSTANCE.get().cloned().unwrap_or_else(|| {
        crate::debug!("config.not_initialized using_defaults=true");
        ShopfrontConfig::default()
    })
}

/// Checks if the configuration has been installed.
#[uniffi::export]
#[must_use]
pub fn is_config_initialized() -> bool {
    CONFIG_INSTANCE.get().is_some()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serial_test::serial;

    use super::*;

    #[test]
    fn test_environment_display() {
        assert_eq!(ShopEnvironment::Staging.to_string(), "staging");
        assert_eq!(ShopEnvironment::Production.as_str(), "production");
    }

    #[test]
    fn test_new_normalizes_inputs() {
        let config = ShopfrontConfig::new(
            ShopEnvironment::Staging,
            "http://172.16.53.247:5000/".to_string(),
            0,
            ProfileEditPolicy::Strict,
        );

        assert_eq!(config.api_base_url(), "http://172.16.53.247:5000");
        assert_eq!(config.request_timeout_seconds(), DEFAULT_REQUEST_TIMEOUT_SECONDS);
        assert_eq!(config.edit_policy(), ProfileEditPolicy::Strict);
    }

    #[test]
    fn test_defaults() {
        let config = ShopfrontConfig::default();
        assert_eq!(config.environment(), ShopEnvironment::Production);
        assert_eq!(config.api_base_url(), DEFAULT_API_BASE_URL);
        assert_eq!(config.edit_policy(), ProfileEditPolicy::Lenient);
    }

    #[test]
    #[serial]
    fn test_init_only_once() {
        // Same values as the defaults so other tests reading the global are unaffected.
        let config = Arc::new(ShopfrontConfig::default());

        init_shopfront_config(config.clone());
        assert!(is_config_initialized());
        assert!(!init_shopfront_config(config));
        assert_eq!(current_config(), ShopfrontConfig::default());
    }
}
