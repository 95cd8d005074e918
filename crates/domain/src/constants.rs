//! Wire constants
//!
//! Values the server and the client must agree on byte-for-byte.

/// Production API origin plus version prefix.
pub const DEFAULT_BASE_URL: &str = "https://hashapi.tierion.com/v1";

/// Default transport timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Error message the server returns (with HTTP 401) when the bearer token has
/// expired. Only this exact text triggers a token refresh.
pub const EXPIRED_TOKEN_MESSAGE: &str = "Your access token has expired.";

/// Bearer value sent when the client holds no credential.
pub const NO_CREDENTIAL_BEARER: &str = "none";

// Routes (relative to the base URL)

/// Credential exchange; unauthenticated.
pub const AUTH_TOKEN_PATH: &str = "/auth/token";
/// Refresh-token exchange; unauthenticated.
pub const AUTH_REFRESH_PATH: &str = "/auth/refresh";
/// Hash submission.
pub const HASH_ITEMS_PATH: &str = "/hashitems";
/// Receipt lookup by id.
pub const RECEIPTS_PATH: &str = "/receipts";
/// Block webhook collection.
pub const BLOCK_SUBSCRIPTIONS_PATH: &str = "/blocksubscriptions";
