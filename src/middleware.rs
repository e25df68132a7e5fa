//! Bearer-credential injection and 401 refresh-and-retry.
//!
//! [`AuthMiddleware`] implements [`reqwest_middleware::Middleware`]: before
//! dispatch it injects the stored access credential, and on a 401 it refreshes
//! the credential and replays the original request exactly once.

use std::sync::Arc;

use async_trait::async_trait;
use http::Extensions;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Request, Response, StatusCode, Url};
use reqwest_middleware::{Middleware, Next, Result as MiddlewareResult};

use crate::config::InterceptorConfig;
use crate::error::AuthError;
use crate::refresh::RefreshClient;
use crate::store::{CookieStore, CredentialStore, FileStore, MemoryStore, StorageBackend};

/// Marker recorded on a request's extensions once a refresh-driven replay has
/// been attempted. Its presence blocks any further refresh for that request.
#[derive(Debug, Clone, Copy)]
struct RetryAttempted;

/// Authentication middleware for a [`reqwest_middleware`] client.
///
/// Composed explicitly into the client by the caller; nothing is registered
/// globally:
///
/// ```no_run
/// use tokenward::{AuthMiddleware, InterceptorConfig, StorageBackend};
///
/// let config = InterceptorConfig::new(StorageBackend::Session, "access_token")
///     .with_refresh_url("https://api.example.com/auth/token");
/// let client = reqwest_middleware::ClientBuilder::new(reqwest::Client::new())
///     .with(AuthMiddleware::builder(config).build())
///     .build();
/// ```
pub struct AuthMiddleware {
    credential_key: String,
    refresh_key: String,
    refresh_url: String,
    store: Arc<dyn CredentialStore>,
    refresher: RefreshClient,
}

/// Builder returned by [`AuthMiddleware::builder`].
pub struct AuthMiddlewareBuilder {
    config: InterceptorConfig,
    store: Option<Arc<dyn CredentialStore>>,
    client: Option<reqwest::Client>,
}

impl AuthMiddlewareBuilder {
    /// Inject the credential store to use instead of the backend default.
    pub fn store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Reuse an existing reqwest client for the refresh exchange.
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> AuthMiddleware {
        let store = self
            .store
            .unwrap_or_else(|| default_store(self.config.storage));
        let refresher = match self.client {
            Some(client) => RefreshClient::with_client(client),
            None => RefreshClient::new(),
        };
        AuthMiddleware {
            credential_key: self.config.credential_key,
            refresh_key: self.config.refresh_key,
            refresh_url: self.config.refresh_url,
            store,
            refresher,
        }
    }
}

impl AuthMiddleware {
    pub fn builder(config: InterceptorConfig) -> AuthMiddlewareBuilder {
        AuthMiddlewareBuilder {
            config,
            store: None,
            client: None,
        }
    }

    /// The store this middleware reads and writes credentials through.
    pub fn store(&self) -> Arc<dyn CredentialStore> {
        self.store.clone()
    }

    /// Request interceptor: inject the stored access credential, or fall back
    /// to a JSON content type when none is stored.
    fn prepare_request(&self, request: &mut Request) -> Result<(), AuthError> {
        match self.store.read(&self.credential_key)? {
            Some(credential) => {
                let value = HeaderValue::from_str(&format!("Bearer {credential}"))
                    .map_err(|_| AuthError::InvalidCredential)?;
                request.headers_mut().insert(AUTHORIZATION, value);
            }
            None => {
                request
                    .headers_mut()
                    .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            }
        }
        Ok(())
    }

    /// Whether `url` targets the refresh endpoint itself. A 401 from there
    /// must never trigger another refresh.
    fn is_refresh_request(&self, url: &Url) -> bool {
        match Url::parse(&self.refresh_url) {
            Ok(endpoint) => {
                url.scheme() == endpoint.scheme()
                    && url.host_str() == endpoint.host_str()
                    && url.port_or_known_default() == endpoint.port_or_known_default()
                    && url.path() == endpoint.path()
            }
            // Relative endpoint: compare paths only.
            Err(_) => url.path() == self.refresh_url,
        }
    }

    /// Resolve the configured refresh endpoint, joining a relative path onto
    /// the failing request's origin.
    fn refresh_endpoint(&self, original: &Url) -> Result<Url, AuthError> {
        match Url::parse(&self.refresh_url) {
            Ok(endpoint) => Ok(endpoint),
            Err(_) => original
                .join(&self.refresh_url)
                .map_err(|_| AuthError::RefreshFailed),
        }
    }
}

#[async_trait]
impl Middleware for AuthMiddleware {
    async fn handle(
        &self,
        mut request: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> MiddlewareResult<Response> {
        self.prepare_request(&mut request).map_err(middleware_err)?;

        let replay = request.try_clone();
        let url = request.url().clone();
        let response = next.clone().run(request, extensions).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }
        if self.is_refresh_request(&url) {
            tracing::debug!(%url, "401 from the refresh endpoint itself; surfacing it");
            return Ok(response);
        }
        if extensions.get::<RetryAttempted>().is_some() {
            tracing::debug!(%url, "request already replayed once; surfacing 401");
            return Ok(response);
        }
        let Some(mut replay) = replay else {
            // Streaming bodies cannot be cloned for a replay.
            tracing::debug!(%url, "request body is not replayable; surfacing 401");
            return Ok(response);
        };
        extensions.insert(RetryAttempted);

        let refresh_credential = match self.store.read(&self.refresh_key).map_err(middleware_err)? {
            Some(credential) => credential,
            None => {
                tracing::debug!(%url, "no refresh credential stored; surfacing 401");
                return Ok(response);
            }
        };

        let endpoint = self.refresh_endpoint(&url).map_err(middleware_err)?;
        let new_credential = self
            .refresher
            .refresh(&endpoint, &refresh_credential)
            .await
            .map_err(middleware_err)?;
        self.store
            .write(&self.credential_key, &new_credential)
            .map_err(middleware_err)?;
        tracing::debug!(%url, "credential refreshed; replaying request");

        // Re-run the request interceptor so the replay picks up the freshly
        // written credential.
        self.prepare_request(&mut replay).map_err(middleware_err)?;
        next.run(replay, extensions).await
    }
}

fn middleware_err(error: AuthError) -> reqwest_middleware::Error {
    reqwest_middleware::Error::Middleware(error.into())
}

fn default_store(backend: StorageBackend) -> Arc<dyn CredentialStore> {
    match backend {
        StorageBackend::Session => Arc::new(MemoryStore::new()),
        StorageBackend::Persistent => Arc::new(FileStore::new_default()),
        StorageBackend::Cookie => Arc::new(CookieStore::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    fn middleware(refresh_url: &str) -> AuthMiddleware {
        let config = InterceptorConfig::new(StorageBackend::Session, "access_token")
            .with_refresh_url(refresh_url);
        AuthMiddleware::builder(config).build()
    }

    fn url(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    #[test]
    fn relative_refresh_url_matches_by_path() {
        let mw = middleware("/auth/token");
        assert!(mw.is_refresh_request(&url("https://api.example.com/auth/token")));
        assert!(mw.is_refresh_request(&url("https://other.example.com/auth/token")));
        assert!(!mw.is_refresh_request(&url("https://api.example.com/orders")));
    }

    #[test]
    fn absolute_refresh_url_matches_origin_and_path() {
        let mw = middleware("https://api.example.com/auth/token");
        assert!(mw.is_refresh_request(&url("https://api.example.com/auth/token")));
        assert!(!mw.is_refresh_request(&url("https://other.example.com/auth/token")));
        assert!(!mw.is_refresh_request(&url("https://api.example.com/orders")));
    }

    #[test]
    fn relative_refresh_endpoint_joins_onto_failing_origin() {
        let mw = middleware("/auth/token");
        let endpoint = mw
            .refresh_endpoint(&url("https://api.example.com/orders"))
            .unwrap();
        assert_eq!(endpoint.as_str(), "https://api.example.com/auth/token");
    }

    #[test]
    fn absolute_refresh_endpoint_is_used_verbatim() {
        let mw = middleware("https://auth.example.com/token");
        let endpoint = mw
            .refresh_endpoint(&url("https://api.example.com/orders"))
            .unwrap();
        assert_eq!(endpoint.as_str(), "https://auth.example.com/token");
    }

    #[test]
    fn prepare_request_sets_bearer_header_when_credential_present() {
        let mw = middleware("/auth/token");
        mw.store().write("access_token", "abc123").unwrap();
        let mut request = Request::new(Method::GET, url("https://api.example.com/orders"));
        mw.prepare_request(&mut request).unwrap();
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Bearer abc123"
        );
        assert!(request.headers().get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn prepare_request_falls_back_to_json_content_type() {
        let mw = middleware("/auth/token");
        let mut request = Request::new(Method::GET, url("https://api.example.com/orders"));
        mw.prepare_request(&mut request).unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());
        assert_eq!(
            request.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn prepare_request_overwrites_stale_authorization() {
        let mw = middleware("/auth/token");
        mw.store().write("access_token", "fresh").unwrap();
        let mut request = Request::new(Method::GET, url("https://api.example.com/orders"));
        request
            .headers_mut()
            .insert(AUTHORIZATION, HeaderValue::from_static("Bearer stale"));
        mw.prepare_request(&mut request).unwrap();
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Bearer fresh"
        );
    }

    #[test]
    fn prepare_request_rejects_header_unsafe_credential() {
        let mw = middleware("/auth/token");
        mw.store().write("access_token", "bad\ntoken").unwrap();
        let mut request = Request::new(Method::GET, url("https://api.example.com/orders"));
        let result = mw.prepare_request(&mut request);
        assert!(matches!(result, Err(AuthError::InvalidCredential)));
    }
}
