use std::collections::HashMap;
use std::sync::Mutex;

use super::CredentialStore;
use crate::error::AuthError;

/// In-process credential store backing the session backend.
///
/// Entries live exactly as long as the store value itself, which makes this
/// the ephemeral counterpart to [`super::FileStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, AuthError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| AuthError::BackendUnavailable("session store lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), AuthError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AuthError::BackendUnavailable("session store lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let store = MemoryStore::new();
        assert!(store.read("access_token").unwrap().is_none());
    }

    #[test]
    fn write_then_read_round_trips() {
        let store = MemoryStore::new();
        store.write("access_token", "abc123").unwrap();
        assert_eq!(store.read("access_token").unwrap().as_deref(), Some("abc123"));
    }

    #[test]
    fn write_overwrites_previous_value() {
        let store = MemoryStore::new();
        store.write("access_token", "old").unwrap();
        store.write("access_token", "new").unwrap();
        assert_eq!(store.read("access_token").unwrap().as_deref(), Some("new"));
    }
}
