/// HTTP client that native applications implement so the core can reach the shop backend.
///
/// Requests go through the native networking stack, which owns TLS, proxies and any
/// platform-specific networking policy. Native implementations should map platform errors to
/// the matching `HttpError` variant.
#[uniffi::export(with_foreign)]
#[async_trait::async_trait]
pub trait ShopHttpClient: Send + Sync {
    /// Performs a `GET` request and returns the raw response body.
    ///
    /// # Arguments
    /// * `url` - Absolute URL of the resource
    ///
    /// # Errors
    /// * `HttpError::BadStatusCode` - For 4xx/5xx responses, with the response body
    /// * `HttpError::NoConnectivity` - When no internet connection is available
    /// * `HttpError::Timeout` - When the request times out
    /// * `HttpError::DnsResolutionFailed` - When DNS lookup fails
    /// * `HttpError::ConnectionRefused` - When the server refuses the connection
    /// * `HttpError::Cancelled` - When the request is cancelled
    /// * `HttpError::Generic` - For other unexpected errors
    async fn fetch(&self, url: String) -> Result<Vec<u8>, HttpError>;
}

/// Represents HTTP-related errors that can occur during network requests.
#[crate::shopfront_error]
pub enum HttpError {
    /// HTTP error with specific status code (4xx, 5xx responses)
    #[error("Bad status code {code}")]
    BadStatusCode {
        /// The HTTP status code that was returned
        code: u64,
        /// The response body, which may contain error details
        response_body: Vec<u8>,
    },
    /// No internet connectivity available
    #[error("No internet connectivity")]
    NoConnectivity,
    /// Request timed out
    #[error("Request timed out after {seconds} seconds")]
    Timeout {
        /// Number of seconds before timeout occurred
        seconds: u64,
    },
    /// DNS resolution failed for the hostname
    #[error("DNS resolution failed for {hostname}")]
    DnsResolutionFailed {
        /// The hostname that failed to resolve
        hostname: String,
    },
    /// Connection was refused by the server
    #[error("Connection refused by {host}")]
    ConnectionRefused {
        /// The host that refused the connection
        host: String,
    },
    /// The request was cancelled before completion
    #[error("Request was cancelled")]
    Cancelled,
}

/// Unexpected foreign errors (uncaught exceptions in Swift/Kotlin) arrive here instead of
/// panicking. A bare numeric reason is read as a status code.
impl From<uniffi::UnexpectedUniFFICallbackError> for HttpError {
    fn from(error: uniffi::UnexpectedUniFFICallbackError) -> Self {
        error.reason.trim().parse::<u64>().map_or_else(
            |_| Self::Generic {
                message: error.reason.clone(),
            },
            |code| Self::BadStatusCode {
                code,
                response_body: Vec::new(),
            },
        )
    }
}

/// Runs `request`, failing with `HttpError::Timeout` once `timeout_seconds` elapse.
///
/// # Errors
/// `HttpError::Timeout` on expiry, otherwise whatever `request` returns.
pub async fn with_timeout<T, F>(timeout_seconds: u64, request: F) -> Result<T, HttpError>
where
    F: std::future::Future<Output = Result<T, HttpError>>,
{
    tokio::time::timeout(std::time::Duration::from_secs(timeout_seconds), request)
        .await
        .unwrap_or(Err(HttpError::Timeout {
            seconds: timeout_seconds,
        }))
}
