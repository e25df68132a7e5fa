//! Credential storage backends.

pub mod cookie;
pub mod file;
pub mod memory;

pub use cookie::CookieStore;
pub use file::{FileStore, FileStoreConfig};
pub use memory::MemoryStore;

use crate::error::AuthError;

/// Which storage surface holds credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Ephemeral in-process storage; contents vanish with the store value.
    Session,
    /// File-backed storage that survives process restarts.
    Persistent,
    /// A browser-style `key=value; key=value` cookie line.
    Cookie,
}

/// Storage abstraction for named credentials.
///
/// A missing key reads as `Ok(None)`; only backend-level failures (a poisoned
/// lock, an unreadable file) surface as errors.
pub trait CredentialStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, AuthError>;
    fn write(&self, key: &str, value: &str) -> Result<(), AuthError>;
}
