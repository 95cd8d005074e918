//! Bearer credential held by an authenticated client

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access/refresh token pair with the access token's decoded expiry
///
/// A client either holds a fully populated `Credential` or none at all; the
/// pair is always replaced as a whole.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Short-lived bearer token sent on every authenticated request
    pub access_token: String,

    /// Longer-lived token used only to obtain a new pair
    pub refresh_token: String,

    /// `exp` claim of the access token, or 0 when the token carries none
    pub expires_at_epoch_seconds: i64,

    /// True only while a refresh exchange for this credential is running
    pub refresh_in_flight: bool,
}

impl Credential {
    /// Build a credential from a freshly issued pair.
    #[must_use]
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_at_epoch_seconds: i64,
    ) -> Self {
        Self { access_token, refresh_token, expires_at_epoch_seconds, refresh_in_flight: false }
    }

    /// Expiry as a UTC timestamp; `None` when the token had no `exp` claim.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        if self.expires_at_epoch_seconds == 0 {
            return None;
        }
        DateTime::from_timestamp(self.expires_at_epoch_seconds, 0)
    }

    /// Whether the access token is past its expiry at `now`.
    ///
    /// Tokens without an expiry claim are never considered expired; the
    /// server remains the authority and signals expiry with a 401.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|expires_at| now >= expires_at)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at_epoch_seconds", &self.expires_at_epoch_seconds)
            .field("refresh_in_flight", &self.refresh_in_flight)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_not_refreshing() {
        let credential = Credential::new("a".into(), "r".into(), 1_469_134_464);
        assert!(!credential.refresh_in_flight);
        assert_eq!(credential.expires_at_epoch_seconds, 1_469_134_464);
    }

    #[test]
    fn test_zero_expiry_never_expires() {
        let credential = Credential::new("a".into(), "r".into(), 0);
        assert!(credential.expires_at().is_none());
        assert!(!credential.is_expired_at(Utc::now()));
    }

    #[test]
    fn test_past_expiry_is_expired() {
        let credential = Credential::new("a".into(), "r".into(), 1_469_134_464);
        assert!(credential.is_expired_at(Utc::now()));

        let future = Utc::now().timestamp() + 3600;
        let credential = Credential::new("a".into(), "r".into(), future);
        assert!(!credential.is_expired_at(Utc::now()));
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let credential = Credential::new("secret-access".into(), "secret-refresh".into(), 0);
        let rendered = format!("{credential:?}");
        assert!(!rendered.contains("secret-access"));
        assert!(!rendered.contains("secret-refresh"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
