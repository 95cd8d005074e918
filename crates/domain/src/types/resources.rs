//! Request and response bodies for the API routes
//!
//! Field names follow the server's camelCase wire format; the token
//! endpoints use snake_case in their responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body for `POST /hashitems`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashItemRequest {
    /// Hex-encoded SHA-256 digest
    pub hash: String,
    /// Caller-defined label; omitted from the body when `None`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl HashItemRequest {
    /// Build the body, copying the tag only when one is given.
    pub fn new(hash: impl Into<String>, tag: Option<&str>) -> Self {
        Self { hash: hash.into(), tag: tag.map(str::to_string) }
    }
}

/// A submitted hash awaiting anchoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashItem {
    /// Id to pass to `GET /receipts/{id}` once anchored
    pub receipt_id: String,
    /// Submission time, seconds since the epoch
    pub timestamp: i64,
}

/// Receipt record returned by `GET /receipts/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Chainpoint receipt, JSON-encoded as a string by the server
    pub receipt: String,
}

impl Receipt {
    /// Decode the embedded receipt document.
    ///
    /// # Errors
    /// Returns the JSON error if the receipt string is not valid JSON.
    pub fn parsed(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.receipt)
    }
}

/// Body for creating or updating a block subscription
///
/// Converts from a bare callback URL for compatibility with callers that
/// only ever pass the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSubscriptionParams {
    /// URL the server posts block notifications to
    pub callback_url: String,
    /// Optional display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl BlockSubscriptionParams {
    /// Params with only a callback URL.
    pub fn new(callback_url: impl Into<String>) -> Self {
        Self { callback_url: callback_url.into(), label: None }
    }

    /// Attach a label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl From<&str> for BlockSubscriptionParams {
    fn from(callback_url: &str) -> Self {
        Self::new(callback_url)
    }
}

impl From<String> for BlockSubscriptionParams {
    fn from(callback_url: String) -> Self {
        Self::new(callback_url)
    }
}

impl From<&String> for BlockSubscriptionParams {
    fn from(callback_url: &String) -> Self {
        Self::new(callback_url.as_str())
    }
}

/// A registered block webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSubscription {
    /// Server-assigned id
    pub id: String,
    /// URL the server posts block notifications to
    pub callback_url: String,
    /// Optional display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Body for `POST /auth/token`
#[derive(Debug, Clone, Serialize)]
pub struct CredentialsRequest<'a> {
    /// Account name
    pub username: &'a str,
    /// Account password
    pub password: &'a str,
}

/// Body for `POST /auth/refresh`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest<'a> {
    /// Refresh token of the current credential
    pub refresh_token: &'a str,
}

/// Token pair returned by both auth endpoints
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    /// New bearer token (a JWT)
    pub access_token: String,
    /// Refresh token to keep for the next exchange
    pub refresh_token: String,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse").finish_non_exhaustive()
    }
}
