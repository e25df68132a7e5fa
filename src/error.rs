//! Error types for tokenward.

use thiserror::Error;

/// Normalized errors across the credential stores and the refresh exchange.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The configured storage surface cannot be used at all (poisoned lock,
    /// unreadable base directory). Fatal configuration territory.
    #[error("Storage backend unavailable: {0}")]
    BackendUnavailable(String),
    /// The refresh exchange did not produce a new credential. Every cause
    /// (non-201 status, transport failure, malformed body) collapses into
    /// this one variant; callers never see the distinction.
    #[error("Failed to refresh token")]
    RefreshFailed,
    /// A stored credential cannot be encoded as an HTTP header value.
    #[error("Credential is not a valid header value")]
    InvalidCredential,
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for AuthError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<toml::de::Error> for AuthError {
    fn from(error: toml::de::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

impl From<toml::ser::Error> for AuthError {
    fn from(error: toml::ser::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, AuthError>;
