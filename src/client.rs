//! The client
//!
//! Aggregates credentials, the memoized token, the rate limiter and the HTTP
//! transport. Clones share all of that state, so one client (or its clones)
//! should be reused across calls and tasks.

use crate::auth::{Token, TokenManager};
use crate::config::{ClientConfig, Credentials};
use crate::error::Result;
use crate::http::{ApiRequest, RateLimiter, RequestExecutor};
use crate::pagination::Paginator;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Entry point to the Smart Accounts API
#[derive(Clone)]
pub struct Client {
    executor: Arc<RequestExecutor>,
    config: Arc<ClientConfig>,
    cancel: CancellationToken,
}

impl Client {
    /// Create a client against the vendor endpoints with default settings
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        Self::with_config(
            Credentials::new(client_id, client_secret, username, password),
            ClientConfig::default(),
        )
    }

    /// Create a client with custom configuration
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let tokens = Arc::new(
            TokenManager::new(credentials, config.endpoints.token_url.clone(), http.clone())
                .with_timeout(config.timeout),
        );
        let executor = RequestExecutor::new(
            http,
            tokens,
            RateLimiter::new(&config.rate_limit),
            config.timeout,
        );

        Ok(Self {
            executor: Arc::new(executor),
            config: Arc::new(config),
            cancel: CancellationToken::new(),
        })
    }

    /// A clone bound to `cancel`.
    ///
    /// The clone shares the token and the rate limiter with `self`; cancelling
    /// the token aborts calls made through the clone with
    /// [`Error::Cancelled`](crate::Error::Cancelled).
    #[must_use]
    pub fn with_cancellation(&self, cancel: CancellationToken) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
            config: Arc::clone(&self.config),
            cancel,
        }
    }

    /// The cancellation token calls on this client observe
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The token manager shared by all clones
    pub fn token_manager(&self) -> &Arc<TokenManager> {
        self.executor.tokens()
    }

    /// A token with more than five minutes left, refreshing if needed
    pub async fn token(&self) -> Result<Token> {
        self.executor.tokens().get_token().await
    }

    /// Execute an arbitrary request through the authenticated pipeline.
    ///
    /// `Ok(None)` means the upstream answered 201.
    pub async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<Option<T>> {
        self.executor.execute(request, &self.cancel).await
    }

    /// Execute a request, treating a 201 as `T::default()`
    pub async fn fetch<T: DeserializeOwned + Default>(&self, request: ApiRequest) -> Result<T> {
        self.executor.fetch(request, &self.cancel).await
    }

    /// Paginator configured from this client's page settings
    pub fn paginator(&self) -> Paginator {
        Paginator::new(self.config.page_size, self.config.max_pages)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("executor", &self.executor)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod client_tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_new_uses_defaults() {
        let client = Client::new("id", "secret", "user", "pass").unwrap();
        assert_eq!(client.config().page_size, 100);
        assert_eq!(client.paginator().page_size(), 100);
    }

    #[tokio::test]
    async fn test_cancellation_clone_shares_token_slot() {
        let client = Client::new("id", "secret", "user", "pass").unwrap();
        let bound = client.with_cancellation(CancellationToken::new());

        let token = Token::new("shared", "Bearer", 3600, Utc::now());
        client.token_manager().set_token(token.clone()).await;

        assert_eq!(bound.token().await.unwrap(), token);
        assert!(Arc::ptr_eq(client.token_manager(), bound.token_manager()));
    }

    #[test]
    fn test_cancelling_clone_leaves_original_alone() {
        let client = Client::new("id", "secret", "user", "pass").unwrap();
        let cancel = CancellationToken::new();
        let bound = client.with_cancellation(cancel.clone());

        cancel.cancel();
        assert!(bound.cancellation_token().is_cancelled());
        assert!(!client.cancellation_token().is_cancelled());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let client = Client::new("id", "very-secret", "user", "hunter2").unwrap();
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("very-secret"));
        assert!(!rendered.contains("hunter2"));
    }
}
