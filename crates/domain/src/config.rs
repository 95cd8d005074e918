//! Client configuration structures

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Configuration for the hash API client
///
/// Every field has a default, so a config file only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Origin plus version prefix (e.g., "https://hashapi.tierion.com/v1")
    pub base_url: String,
    /// Transport timeout applied to every request
    pub timeout_secs: u64,
    /// Optional User-Agent header
    pub user_agent: Option<String>,
    /// Pre-issued access token; only used together with `refresh_token`
    pub access_token: Option<String>,
    /// Pre-issued refresh token; only used together with `access_token`
    pub refresh_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            access_token: None,
            refresh_token: None,
        }
    }
}

impl ClientConfig {
    /// Defaults with a different base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }

    /// Transport timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
