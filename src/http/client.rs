//! Request executor
//!
//! The single path every endpoint call takes:
//! - Bearer token from the token manager
//! - Standard JSON headers
//! - A permit from the shared rate limiter
//! - Dispatch with the configured timeout, raced against cancellation
//! - Status classification and decoding into the caller's type

use super::rate_limit::RateLimiter;
use crate::auth::TokenManager;
use crate::error::{Error, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

/// Description of one API call
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL, query included
    pub url: Url,
    /// JSON body
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Create a request
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            body: None,
        }
    }

    /// Create a GET request
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// Create a POST request
    pub fn post(url: Url) -> Self {
        Self::new(Method::POST, url)
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `body` and set it as the JSON body
    pub fn json_from<B: Serialize>(self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| Error::config(format!("failed to encode request body: {e}")))?;
        Ok(self.json(value))
    }
}

/// Authenticated, rate-limited request execution
pub struct RequestExecutor {
    client: Client,
    tokens: Arc<TokenManager>,
    rate_limiter: RateLimiter,
    timeout: Duration,
}

impl RequestExecutor {
    /// Create an executor from its parts
    pub fn new(
        client: Client,
        tokens: Arc<TokenManager>,
        rate_limiter: RateLimiter,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            tokens,
            rate_limiter,
            timeout,
        }
    }

    /// The token manager this executor authenticates with
    pub fn tokens(&self) -> &Arc<TokenManager> {
        &self.tokens
    }

    /// The rate limiter every call passes through
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// Execute a request and decode a 200 body into `T`.
    ///
    /// Returns `Ok(None)` for 201, whose body is never read. Every other
    /// non-200 status is returned as its status error without reading the
    /// body. The response is dropped, and its connection released, on every
    /// path out of this function.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<Option<T>> {
        let token = cancellable(cancel, self.tokens.get_token()).await??;

        let mut req = self
            .client
            .request(request.method.clone(), request.url.clone())
            .bearer_auth(&token.access_token)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .timeout(self.timeout);

        if let Some(ref body) = request.body {
            req = req.json(body);
        }

        self.rate_limiter.acquire(cancel).await?;

        debug!(method = %request.method, url = %request.url, "Sending request");
        let response = cancellable(cancel, req.send())
            .await?
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if let Some(err) = Error::from_status(status) {
            debug!(
                method = %request.method,
                url = %request.url,
                status = status.as_u16(),
                "Request rejected"
            );
            return Err(err);
        }

        if status == StatusCode::CREATED {
            return Ok(None);
        }

        let body = cancellable(cancel, response.bytes())
            .await?
            .map_err(|e| self.transport_error(e))?;
        let value = serde_json::from_slice(&body)?;
        Ok(Some(value))
    }

    /// Execute a request, treating a 201 as `T::default()`
    pub async fn fetch<T: DeserializeOwned + Default>(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<T> {
        Ok(self.execute(request, cancel).await?.unwrap_or_default())
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        Error::from_transport(err, self.timeout)
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("tokens", &self.tokens)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Run `fut` unless `cancel` fires first
async fn cancellable<F: Future>(cancel: &CancellationToken, fut: F) -> Result<F::Output> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(Error::Cancelled),
        out = fut => Ok(out),
    }
}
