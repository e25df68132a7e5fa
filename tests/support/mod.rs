#![allow(dead_code)]

use std::sync::Arc;

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use tokenward::store::MemoryStore;
use tokenward::{AuthError, AuthMiddleware, CredentialStore, InterceptorConfig, StorageBackend};

/// Store whose backend is permanently down. Every call fails.
pub struct FailingStore;

impl CredentialStore for FailingStore {
    fn read(&self, _key: &str) -> Result<Option<String>, AuthError> {
        Err(AuthError::BackendUnavailable(
            "simulated backend outage".into(),
        ))
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), AuthError> {
        Err(AuthError::BackendUnavailable(
            "simulated backend outage".into(),
        ))
    }
}

/// Compose a middleware into a fresh client, the way callers are expected to.
pub fn client_with(middleware: AuthMiddleware) -> ClientWithMiddleware {
    ClientBuilder::new(reqwest::Client::new())
        .with(middleware)
        .build()
}

/// A client wired to a memory-backed store, plus the store for seeding and
/// inspection.
pub fn memory_client(refresh_url: &str) -> (ClientWithMiddleware, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let config = InterceptorConfig::new(StorageBackend::Session, "access_token")
        .with_refresh_url(refresh_url);
    let middleware = AuthMiddleware::builder(config).store(store.clone()).build();
    (client_with(middleware), store)
}
