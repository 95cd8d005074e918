//! Authenticated API client with transparent token refresh
//!
//! Every authenticated verb sends the current bearer token. When the server
//! answers 401 with exactly the expired-token message, the client refreshes
//! the credential and re-issues the same request once. The second response is
//! final, whatever it is.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hashapi_domain::constants::NO_CREDENTIAL_BEARER;
use hashapi_domain::{ClientConfig, Credential, HashApiError};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

use super::auth::{credential_from_response, credential_from_tokens, AuthEndpoint, TokenIssuer};
use super::errors::{is_expired_token, parse_body, resource_result};
use crate::errors::InfraError;
use crate::http::HttpClient;

/// HTTP client that owns a [`Credential`] and keeps it fresh
///
/// The client is `Send + Sync`; share it behind an `Arc` to issue calls from
/// several tasks. Refreshes triggered by concurrent expired-token responses
/// are coalesced into a single exchange.
pub struct AuthenticatingHttpClient {
    http_client: HttpClient,
    issuer: Arc<dyn TokenIssuer>,
    base_url: String,
    credential: RwLock<Option<Credential>>,
    refresh_gate: Mutex<()>,
    refreshing: AtomicBool,
}

/// Marks a refresh exchange as running until dropped.
///
/// Dropping clears the flag even when the refreshing future is cancelled.
struct RefreshInFlight<'a>(&'a AtomicBool);

impl<'a> RefreshInFlight<'a> {
    fn start(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self(flag)
    }
}

impl Drop for RefreshInFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl AuthenticatingHttpClient {
    /// Create a new client
    ///
    /// # Arguments
    ///
    /// * `config` - Client configuration
    /// * `access_token` - Pre-issued access token
    /// * `refresh_token` - Pre-issued refresh token
    ///
    /// The credential is populated only when both tokens are supplied;
    /// otherwise the client starts unauthenticated and `authenticate` must be
    /// called first.
    ///
    /// # Errors
    ///
    /// Returns `HashApiError::Config` if the base URL is invalid or the HTTP
    /// client cannot be built
    pub fn new(
        config: ClientConfig,
        access_token: Option<String>,
        refresh_token: Option<String>,
    ) -> Result<Self, HashApiError> {
        Self::builder().config(config).tokens(access_token, refresh_token).build()
    }

    /// Create a client using the tokens carried by `config`, if any.
    ///
    /// # Errors
    ///
    /// Same as [`AuthenticatingHttpClient::new`]
    pub fn from_config(config: ClientConfig) -> Result<Self, HashApiError> {
        let access_token = config.access_token.clone();
        let refresh_token = config.refresh_token.clone();
        Self::new(config, access_token, refresh_token)
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> AuthenticatingHttpClientBuilder {
        AuthenticatingHttpClientBuilder::default()
    }

    /// Snapshot of the current credential, `None` if unauthenticated.
    ///
    /// `refresh_in_flight` is true only while a refresh exchange is running.
    pub async fn credential(&self) -> Option<Credential> {
        self.credential.read().await.clone().map(|mut credential| {
            credential.refresh_in_flight = self.refreshing.load(Ordering::Acquire);
            credential
        })
    }

    /// True once a credential is held, from construction or `authenticate`.
    pub async fn is_authenticated(&self) -> bool {
        self.credential.read().await.is_some()
    }

    /// Base URL every path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchange username and password for a new credential
    ///
    /// Replaces any credential the client already holds.
    ///
    /// # Errors
    ///
    /// `HashApiError::Auth` if the server rejects the credentials or the
    /// token endpoint is unreachable
    #[instrument(skip(self, password))]
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Credential, HashApiError> {
        let tokens = self.issuer.issue(username, password).await?;
        let credential = credential_from_response(tokens);

        *self.credential.write().await = Some(credential.clone());

        info!(expires_at = credential.expires_at_epoch_seconds, "authenticated with credentials");
        Ok(credential)
    }

    /// Exchange the current refresh token for a new credential
    ///
    /// # Errors
    ///
    /// `HashApiError::Auth` if the client holds no credential or the refresh
    /// token is rejected; this is terminal for the session.
    #[instrument(skip(self))]
    pub async fn refresh_auth_token(&self) -> Result<Credential, HashApiError> {
        let _gate = self.refresh_gate.lock().await;
        self.exchange_refresh_token().await
    }

    /// Execute an authenticated GET request
    ///
    /// # Errors
    ///
    /// `Network` on transport failure, `Api` for any status ≥ 400 (after at
    /// most one refresh-and-retry), `Auth` if the refresh itself fails
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, HashApiError> {
        self.execute(Method::GET, path, None).await
    }

    /// Execute an authenticated POST request with a JSON body
    ///
    /// # Errors
    ///
    /// See [`AuthenticatingHttpClient::get`]; additionally `InvalidRequest`
    /// if the body cannot be serialized
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, HashApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode_body(body)?;
        self.execute(Method::POST, path, Some(body)).await
    }

    /// Execute an authenticated PUT request with a JSON body
    ///
    /// # Errors
    ///
    /// See [`AuthenticatingHttpClient::post`]
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, HashApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode_body(body)?;
        self.execute(Method::PUT, path, Some(body)).await
    }

    /// Execute an authenticated DELETE request
    ///
    /// # Errors
    ///
    /// See [`AuthenticatingHttpClient::get`]
    #[instrument(skip(self), fields(path = %path))]
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, HashApiError> {
        self.execute(Method::DELETE, path, None).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, HashApiError> {
        let url = self.endpoint(path);
        let token = self.access_token().await;

        let (status, payload) =
            self.dispatch(&method, &url, body.as_ref(), token.as_deref()).await?;

        if !is_expired_token(status, &payload) {
            return resource_result(status, payload);
        }

        info!(%method, path = %path, "access token expired, refreshing before retry");
        let fresh_token = self.refresh_after_expiry(token.as_deref()).await?;

        let (status, payload) =
            self.dispatch(&method, &url, body.as_ref(), Some(&fresh_token)).await?;

        if is_expired_token(status, &payload) {
            warn!(%method, path = %path, "retried request still reports an expired token");
        }

        resource_result(status, payload)
    }

    async fn dispatch(
        &self,
        method: &Method,
        url: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<(StatusCode, Value), HashApiError> {
        debug!(%method, url = %url, "authenticated request");

        let bearer = token.unwrap_or(NO_CREDENTIAL_BEARER);
        let mut request = self
            .http_client
            .request(method.clone(), url)
            .header(AUTHORIZATION, format!("Bearer {bearer}"));

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = self.http_client.send(request).await?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| HashApiError::Network(format!("Failed to read response body: {err}")))?;

        Ok((status, parse_body(&text)))
    }

    /// Refresh after the server rejected `rejected_token` as expired.
    ///
    /// Callers queue on the refresh gate. Whoever gets through first performs
    /// the exchange; the others find a different access token installed and
    /// reuse it.
    async fn refresh_after_expiry(
        &self,
        rejected_token: Option<&str>,
    ) -> Result<String, HashApiError> {
        let _gate = self.refresh_gate.lock().await;

        if let Some(current) = self.credential.read().await.as_ref() {
            if rejected_token != Some(current.access_token.as_str()) {
                debug!("credential already refreshed by a concurrent request");
                return Ok(current.access_token.clone());
            }
        }

        let credential = self.exchange_refresh_token().await?;
        Ok(credential.access_token)
    }

    /// Run the refresh exchange. Must be called with the refresh gate held.
    async fn exchange_refresh_token(&self) -> Result<Credential, HashApiError> {
        let Some(refresh_token) =
            self.credential.read().await.as_ref().map(|c| c.refresh_token.clone())
        else {
            warn!("refresh requested without a credential");
            return Err(HashApiError::auth_message(
                "No refresh token available; authenticate first",
            ));
        };

        let _in_flight = RefreshInFlight::start(&self.refreshing);

        match self.issuer.refresh(&refresh_token).await {
            Ok(tokens) => {
                let credential = credential_from_response(tokens);
                *self.credential.write().await = Some(credential.clone());
                info!(
                    expires_at = credential.expires_at_epoch_seconds,
                    "access token refreshed"
                );
                Ok(credential)
            }
            Err(err) => {
                warn!(error = %err, "token refresh failed");
                Err(err)
            }
        }
    }

    async fn access_token(&self) -> Option<String> {
        self.credential.read().await.as_ref().map(|c| c.access_token.clone())
    }

    fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl std::fmt::Debug for AuthenticatingHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatingHttpClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<Value, HashApiError> {
    serde_json::to_value(body)
        .map_err(|e| HashApiError::InvalidRequest(format!("Failed to serialize body: {e}")))
}

/// Builder for [`AuthenticatingHttpClient`]
#[derive(Default)]
pub struct AuthenticatingHttpClientBuilder {
    config: Option<ClientConfig>,
    access_token: Option<String>,
    refresh_token: Option<String>,
    issuer: Option<Arc<dyn TokenIssuer>>,
}

impl AuthenticatingHttpClientBuilder {
    /// Set the client configuration
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a pre-issued token pair; ignored unless both are present
    pub fn tokens(mut self, access_token: Option<String>, refresh_token: Option<String>) -> Self {
        self.access_token = access_token;
        self.refresh_token = refresh_token;
        self
    }

    /// Replace the HTTP token issuer (used by tests and custom auth flows)
    pub fn issuer(mut self, issuer: Arc<dyn TokenIssuer>) -> Self {
        self.issuer = Some(issuer);
        self
    }

    /// Build the client
    ///
    /// # Errors
    ///
    /// Returns `HashApiError::Config` if the base URL is invalid or the HTTP
    /// client cannot be built
    pub fn build(self) -> Result<AuthenticatingHttpClient, HashApiError> {
        let config = self.config.unwrap_or_default();

        url::Url::parse(&config.base_url).map_err(|e| HashApiError::from(InfraError::from(e)))?;
        let base_url = config.base_url.trim_end_matches('/').to_string();

        let mut http_builder = HttpClient::builder().timeout(config.timeout());
        if let Some(agent) = &config.user_agent {
            http_builder = http_builder.user_agent(agent.clone());
        }
        let http_client = http_builder.build()?;

        let issuer: Arc<dyn TokenIssuer> = match self.issuer {
            Some(issuer) => issuer,
            None => Arc::new(AuthEndpoint::new(http_client.clone(), base_url.clone())),
        };

        let credential = match (self.access_token, self.refresh_token) {
            (Some(access), Some(refresh)) => Some(credential_from_tokens(access, refresh)),
            _ => None,
        };

        Ok(AuthenticatingHttpClient {
            http_client,
            issuer,
            base_url,
            credential: RwLock::new(credential),
            refresh_gate: Mutex::new(()),
            refreshing: AtomicBool::new(false),
        })
    }
}
