//! Error types used throughout the client

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Main error type for the hash API client
///
/// `Auth` and `Api` carry the server's parsed response body verbatim so
/// callers can match on the `error` message text.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum HashApiError {
    /// Transport failure; no response was received.
    #[error("Network error: {0}")]
    Network(String),

    /// Credential or refresh-token exchange rejected or unreachable.
    #[error("Authentication error: {}", describe(.status.as_ref(), .body))]
    Auth {
        /// Response status; `None` when no response was received
        status: Option<u16>,
        /// Parsed response body, or `{ "error": <message> }`
        body: Value,
    },

    /// Non-2xx response from a resource route.
    #[error("API error: {}", describe(Some(.status), .body))]
    Api {
        /// Response status
        status: u16,
        /// Parsed response body; non-JSON text is kept as a string
        body: Value,
    },

    /// Request body could not be encoded.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Response could not be decoded into the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid configuration or client setup.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl HashApiError {
    /// Build an `Auth` error from a plain message (no server response).
    pub fn auth_message(message: impl Into<String>) -> Self {
        Self::Auth { status: None, body: error_body(message) }
    }

    /// The `error` field of the server body, when present.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Auth { body, .. } | Self::Api { body, .. } => {
                body.get("error").and_then(Value::as_str)
            }
            _ => None,
        }
    }

    /// HTTP status attached to the error, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { status, .. } => *status,
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for transport failures.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// True for token exchange failures.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// True for resource-route rejections.
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }
}

/// `{ "error": message }`, the server's error envelope.
pub fn error_body(message: impl Into<String>) -> Value {
    serde_json::json!({ "error": message.into() })
}

fn describe(status: Option<&u16>, body: &Value) -> String {
    let detail = match body.get("error").and_then(Value::as_str) {
        Some(message) => message.to_string(),
        None => body.to_string(),
    };
    match status {
        Some(code) => format!("status {code}: {detail}"),
        None => detail,
    }
}

/// Result type alias for hash API operations
pub type Result<T> = std::result::Result<T, HashApiError>;
