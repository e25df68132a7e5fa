//! Tokenward — bearer-credential middleware for reqwest.
//!
//! Injects a stored access credential into outgoing requests and, when the
//! server answers 401, exchanges a refresh credential for a new one and
//! replays the failed request exactly once. A 401 from the refresh endpoint
//! itself never triggers a refresh, and a replayed request never refreshes a
//! second time.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tokenward::store::MemoryStore;
//! use tokenward::{AuthMiddleware, InterceptorConfig, StorageBackend};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(MemoryStore::new());
//! let config = InterceptorConfig::new(StorageBackend::Session, "access_token")
//!     .with_refresh_url("https://api.example.com/auth/token");
//! let middleware = AuthMiddleware::builder(config).store(store).build();
//!
//! let client = reqwest_middleware::ClientBuilder::new(reqwest::Client::new())
//!     .with(middleware)
//!     .build();
//! let response = client.get("https://api.example.com/orders").send().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod refresh;
pub mod store;

pub use config::{InterceptorConfig, DEFAULT_REFRESH_KEY};
pub use error::AuthError;
pub use middleware::{AuthMiddleware, AuthMiddlewareBuilder};
pub use refresh::{RefreshClient, DEFAULT_REFRESH_PATH};
pub use store::{CredentialStore, StorageBackend};
