//! Token acquisition for the hash API
//!
//! Exchanges username/password or a refresh token for a new token pair via
//! the unauthenticated `/auth/token` and `/auth/refresh` routes, and decodes
//! the access token's expiry claim.

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hashapi_domain::constants::{AUTH_REFRESH_PATH, AUTH_TOKEN_PATH};
use hashapi_domain::{
    Credential, CredentialsRequest, HashApiError, RefreshRequest, TokenResponse,
};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::errors::{auth_result, parse_body};
use crate::http::HttpClient;

/// Trait for exchanging secrets for a token pair
///
/// This trait allows dependency injection and testing with fake issuers.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Exchange account credentials for a token pair.
    async fn issue(&self, username: &str, password: &str) -> Result<TokenResponse, HashApiError>;

    /// Exchange a refresh token for a new token pair.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, HashApiError>;
}

/// HTTP implementation of [`TokenIssuer`] against the API's auth routes
///
/// Every failure, including an unreachable endpoint, is reported as
/// `HashApiError::Auth`; transport failures carry no status.
#[derive(Clone, Debug)]
pub struct AuthEndpoint {
    http_client: HttpClient,
    base_url: String,
}

impl AuthEndpoint {
    /// Create an endpoint rooted at `base_url` (origin plus version prefix).
    pub fn new(http_client: HttpClient, base_url: impl Into<String>) -> Self {
        Self { http_client, base_url: base_url.into().trim_end_matches('/').to_string() }
    }

    async fn post_without_bearer<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<TokenResponse, HashApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "POST token request");

        let request = self.http_client.request(Method::POST, &url).json(body);
        let response = self.http_client.send(request).await.map_err(|err| {
            warn!(path = %path, error = %err, "token endpoint unreachable");
            HashApiError::auth_message(err.to_string())
        })?;
        let status = response.status();
        let text = response.text().await.map_err(|err| {
            HashApiError::auth_message(format!("Failed to read token response: {err}"))
        })?;

        auth_result(status, parse_body(&text)).inspect_err(|err| {
            warn!(path = %path, status = status.as_u16(), error = %err, "token exchange rejected");
        })
    }
}

#[async_trait]
impl TokenIssuer for AuthEndpoint {
    #[instrument(skip(self, password))]
    async fn issue(&self, username: &str, password: &str) -> Result<TokenResponse, HashApiError> {
        self.post_without_bearer(AUTH_TOKEN_PATH, &CredentialsRequest { username, password })
            .await
    }

    #[instrument(skip_all)]
    async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, HashApiError> {
        self.post_without_bearer(AUTH_REFRESH_PATH, &RefreshRequest { refresh_token }).await
    }
}

/// Read the `exp` claim from a JWT access token without verifying it.
///
/// Returns 0 when the token is not a JWT, the payload is not JSON, or the
/// claim is absent.
pub fn decode_expiry(access_token: &str) -> i64 {
    let Some(payload) = access_token.split('.').nth(1) else {
        return 0;
    };

    let Ok(bytes) = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')) else {
        return 0;
    };

    let Ok(claims) = serde_json::from_slice::<Value>(&bytes) else {
        return 0;
    };

    claims
        .get("exp")
        .and_then(|exp| exp.as_i64().or_else(|| exp.as_f64().map(|secs| secs as i64)))
        .unwrap_or(0)
}

/// Build a credential from a freshly issued pair, decoding its expiry.
pub fn credential_from_tokens(access_token: String, refresh_token: String) -> Credential {
    let expires_at = decode_expiry(&access_token);
    Credential::new(access_token, refresh_token, expires_at)
}

/// Build a credential from a token endpoint response.
pub fn credential_from_response(tokens: TokenResponse) -> Credential {
    credential_from_tokens(tokens.access_token, tokens.refresh_token)
}
