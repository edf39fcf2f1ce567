//! Token manager
//!
//! Owns the client's single token slot and refreshes it with a password grant
//! when it is missing or close to expiry.

use super::types::{Token, TokenResponse};
use crate::config::Credentials;
use crate::error::{Error, Result};
use chrono::Utc;
use reqwest::Client;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Memoizing token source for one client
pub struct TokenManager {
    credentials: Credentials,
    token_url: String,
    /// Current token, absent until first use
    cached_token: RwLock<Option<Token>>,
    /// HTTP client for token requests
    http_client: Client,
    /// Bound on a single exchange
    timeout: Duration,
}

/// Exchange timeout used unless [`TokenManager::with_timeout`] overrides it
pub const DEFAULT_TOKEN_TIMEOUT: Duration = Duration::from_secs(30);

impl TokenManager {
    /// Create a token manager that exchanges `credentials` at `token_url`
    pub fn new(credentials: Credentials, token_url: impl Into<String>, http_client: Client) -> Self {
        Self {
            credentials,
            token_url: token_url.into(),
            cached_token: RwLock::new(None),
            http_client,
            timeout: DEFAULT_TOKEN_TIMEOUT,
        }
    }

    /// Bound each token exchange by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Return a token with more than five minutes left, fetching one if needed.
    ///
    /// A valid cached token is returned without touching the network. The
    /// slot lock is not held across the exchange, so concurrent callers that
    /// all see a stale token each perform an exchange and the last one to
    /// finish is kept.
    pub async fn get_token(&self) -> Result<Token> {
        if let Some(token) = self.cached().await {
            if token.is_valid() {
                return Ok(token);
            }
        }

        let token = self.fetch_new_token().await?;
        *self.cached_token.write().await = Some(token.clone());
        Ok(token)
    }

    /// Snapshot of the cached token, valid or not
    pub async fn cached(&self) -> Option<Token> {
        self.cached_token.read().await.clone()
    }

    /// Install a token obtained elsewhere, replacing the current one
    pub async fn set_token(&self, token: Token) {
        *self.cached_token.write().await = Some(token);
    }

    /// Clear the cached token, forcing an exchange on next use
    pub async fn clear_cache(&self) {
        *self.cached_token.write().await = None;
    }

    /// Perform the password grant
    async fn fetch_new_token(&self) -> Result<Token> {
        debug!(url = %self.token_url, "Requesting access token");
        let fetched_at = Utc::now();

        let response = self
            .http_client
            .post(&self.token_url)
            .form(&self.credentials.password_grant_form())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Error::from_transport(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::auth(format!(
                "token request failed with status {}: {body}",
                status.as_u16()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::from_transport(e, self.timeout))?;
        let token_response: TokenResponse = serde_json::from_slice(&body)
            .map_err(|e| Error::auth(format!("invalid token response: {e}")))?;

        let token = token_response.into_token(fetched_at);
        info!(expires_at = %token.expires_at, "Obtained access token");
        Ok(token)
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("credentials", &self.credentials)
            .field("token_url", &self.token_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
