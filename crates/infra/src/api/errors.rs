//! Response classification
//!
//! Turns raw status/body pairs into either a decoded value or a
//! [`HashApiError`], and recognises the server's expired-token signal.

use hashapi_domain::constants::EXPIRED_TOKEN_MESSAGE;
use hashapi_domain::HashApiError;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::InfraError;

/// Parse a response body.
///
/// Empty bodies become `null`; bodies that are not JSON are kept as a JSON
/// string so error details are never dropped.
pub fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// True only for a 401 whose `error` field is exactly the expiry message.
///
/// Any other 401 (malformed token, revoked token, missing header) must not
/// start a refresh.
pub fn is_expired_token(status: StatusCode, body: &Value) -> bool {
    status == StatusCode::UNAUTHORIZED
        && body.get("error").and_then(Value::as_str) == Some(EXPIRED_TOKEN_MESSAGE)
}

/// Map a resource-route response to its result.
///
/// # Errors
/// `HashApiError::Api` for status ≥ 400, `HashApiError::InvalidResponse`
/// when a success body does not match `T`.
pub fn resource_result<T: DeserializeOwned>(
    status: StatusCode,
    body: Value,
) -> Result<T, HashApiError> {
    if status.as_u16() >= 400 {
        return Err(HashApiError::Api { status: status.as_u16(), body });
    }
    decode(body)
}

/// Map a token-endpoint response to its result.
///
/// # Errors
/// `HashApiError::Auth` for status ≥ 400, `HashApiError::InvalidResponse`
/// when a success body does not match `T`.
pub fn auth_result<T: DeserializeOwned>(status: StatusCode, body: Value) -> Result<T, HashApiError> {
    if status.as_u16() >= 400 {
        return Err(HashApiError::Auth { status: Some(status.as_u16()), body });
    }
    decode(body)
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, HashApiError> {
    serde_json::from_value(body).map_err(|err| InfraError::from(err).into())
}
