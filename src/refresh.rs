//! Exchange of a refresh credential for a new access credential.

use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Default path of the refresh endpoint, resolved against the failing
/// request's origin when no absolute URL is configured.
pub const DEFAULT_REFRESH_PATH: &str = "/auth/token";

/// Client for the refresh-token exchange.
///
/// Performs a single `POST <endpoint>` with `{ "refresh_token": <string> }`
/// and expects `201 Created` with `{ "token": <string> }`. Everything else
/// is [`AuthError::RefreshFailed`]; there is no internal retry.
#[derive(Debug, Clone, Default)]
pub struct RefreshClient {
    client: reqwest::Client,
}

impl RefreshClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing reqwest client for the exchange.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub async fn refresh(
        &self,
        endpoint: &Url,
        refresh_credential: &str,
    ) -> Result<String, AuthError> {
        tracing::debug!(endpoint = %endpoint, "exchanging refresh credential");
        let response = self
            .client
            .post(endpoint.clone())
            .json(&RefreshRequest {
                refresh_token: refresh_credential,
            })
            .send()
            .await
            .map_err(|_| AuthError::RefreshFailed)?;
        if response.status() != StatusCode::CREATED {
            tracing::warn!(status = %response.status(), "refresh exchange rejected");
            return Err(AuthError::RefreshFailed);
        }
        let payload: RefreshResponse = response.json().await.map_err(|_| AuthError::RefreshFailed)?;
        Ok(payload.token)
    }
}

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    token: String,
}
