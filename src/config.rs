//! Interceptor configuration.

use crate::refresh::DEFAULT_REFRESH_PATH;
use crate::store::StorageBackend;

/// Storage slot holding the long-lived refresh credential.
pub const DEFAULT_REFRESH_KEY: &str = "refresh_token";

/// Configuration for [`crate::AuthMiddleware`].
///
/// Built once at setup and consumed by the middleware builder; the middleware
/// never mutates it afterwards.
///
/// # Example
/// ```
/// use tokenward::{InterceptorConfig, StorageBackend};
///
/// let config = InterceptorConfig::new(StorageBackend::Persistent, "access_token")
///     .with_refresh_url("https://api.example.com/auth/token");
/// ```
#[derive(Debug, Clone)]
pub struct InterceptorConfig {
    /// Which storage surface holds the credentials.
    pub storage: StorageBackend,
    /// Key under which the access credential is stored and retrieved.
    pub credential_key: String,
    /// Key under which the refresh credential is stored.
    pub refresh_key: String,
    /// Refresh endpoint: an absolute URL, or a path resolved against the
    /// failing request's origin.
    pub refresh_url: String,
}

impl InterceptorConfig {
    pub fn new(storage: StorageBackend, credential_key: impl Into<String>) -> Self {
        Self {
            storage,
            credential_key: credential_key.into(),
            refresh_key: DEFAULT_REFRESH_KEY.to_string(),
            refresh_url: DEFAULT_REFRESH_PATH.to_string(),
        }
    }

    pub fn with_refresh_key(mut self, key: impl Into<String>) -> Self {
        self.refresh_key = key.into();
        self
    }

    pub fn with_refresh_url(mut self, url: impl Into<String>) -> Self {
        self.refresh_url = url.into();
        self
    }
}
