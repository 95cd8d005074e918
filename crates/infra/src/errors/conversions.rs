//! Conversions from external infrastructure errors into domain errors.

use hashapi_domain::HashApiError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub HashApiError);

impl From<InfraError> for HashApiError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<HashApiError> for InfraError {
    fn from(value: HashApiError) -> Self {
        InfraError(value)
    }
}

trait IntoHashApiError {
    fn into_hashapi(self) -> HashApiError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → HashApiError */
/* -------------------------------------------------------------------------- */

impl IntoHashApiError for HttpError {
    fn into_hashapi(self) -> HashApiError {
        if self.is_builder() {
            return HashApiError::Config(format!("invalid HTTP request: {self}"));
        }

        if self.is_decode() {
            return HashApiError::InvalidResponse(format!("failed to decode body: {self}"));
        }

        if self.is_timeout() {
            return HashApiError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return HashApiError::Network(format!("HTTP connection failure: {self}"));
        }

        HashApiError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_hashapi())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → HashApiError */
/* -------------------------------------------------------------------------- */

impl IntoHashApiError for JsonError {
    fn into_hashapi(self) -> HashApiError {
        HashApiError::InvalidResponse(format!("unexpected JSON shape: {self}"))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_hashapi())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → HashApiError */
/* -------------------------------------------------------------------------- */

impl IntoHashApiError for UrlError {
    fn into_hashapi(self) -> HashApiError {
        HashApiError::Config(format!("invalid base URL: {self}"))
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        InfraError(value.into_hashapi())
    }
}
