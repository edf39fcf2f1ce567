//! Token types
//!
//! The access token as decoded from the token endpoint, plus the absolute
//! expiry computed when it was fetched.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;

/// A token is refreshed once it is this many seconds from expiry
pub const REFRESH_MARGIN_SECS: i64 = 300;

/// Bearer token issued by the password grant
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    /// The access token
    pub access_token: String,
    /// Token type as reported by the issuer (normally "Bearer")
    pub token_type: String,
    /// Lifetime in seconds as reported by the issuer
    pub expires_in: i64,
    /// When the token expires, computed at fetch time
    pub expires_at: DateTime<Utc>,
}

impl Token {
    /// Create a token that expires `expires_in` seconds after `fetched_at`
    pub fn new(
        access_token: impl Into<String>,
        token_type: impl Into<String>,
        expires_in: i64,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        // Out-of-range lifetimes saturate toward their own sign
        let (lifetime_limit, instant_limit) = if expires_in < 0 {
            (TimeDelta::MIN, DateTime::<Utc>::MIN_UTC)
        } else {
            (TimeDelta::MAX, DateTime::<Utc>::MAX_UTC)
        };
        let lifetime = TimeDelta::try_seconds(expires_in).unwrap_or(lifetime_limit);
        let expires_at = fetched_at
            .checked_add_signed(lifetime)
            .unwrap_or(instant_limit);
        Self {
            access_token: access_token.into(),
            token_type: token_type.into(),
            expires_in,
            expires_at,
        }
    }

    /// True while more than [`REFRESH_MARGIN_SECS`] remain before expiry at `now`
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.signed_duration_since(now) > TimeDelta::seconds(REFRESH_MARGIN_SECS)
    }

    /// True while more than [`REFRESH_MARGIN_SECS`] remain before expiry
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"***")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Token endpoint response body
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: String,
    /// Missing expiry decodes as zero, making the token stale immediately
    #[serde(default)]
    expires_in: i64,
}

impl TokenResponse {
    pub(crate) fn into_token(self, fetched_at: DateTime<Utc>) -> Token {
        Token::new(
            self.access_token,
            self.token_type,
            self.expires_in,
            fetched_at,
        )
    }
}
