//! Error types for the Smart Accounts client
//!
//! Every call made through the client ends in `Result<T, Error>`. The variants
//! form a closed taxonomy so callers can match exhaustively on what went wrong:
//! the transport, the token exchange, the upstream status, or the payload.

use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// The main error type for the Smart Accounts client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Request cancelled")]
    Cancelled,

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Token exchange failed: {message}")]
    Auth { message: String },

    // ============================================================================
    // Upstream Status Errors
    // ============================================================================
    #[error("ccw: bad request")]
    BadRequest,

    #[error("ccw: unauthorized request")]
    Unauthorized,

    #[error("ccw: forbidden")]
    Forbidden,

    #[error("ccw: not found")]
    NotFound,

    #[error("ccw: internal error")]
    InternalError,

    #[error("unknown error: {status_text}")]
    UnknownUpstream { status: u16, status_text: String },

    // ============================================================================
    // Payload Errors
    // ============================================================================
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    // ============================================================================
    // Construction Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Map a reqwest failure, reporting an elapsed `timeout` as [`Error::Timeout`]
    pub(crate) fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                timeout_ms: timeout.as_millis() as u64,
            }
        } else {
            Self::Transport(err)
        }
    }

    /// Classify a response status.
    ///
    /// Returns `None` for the two success codes the API uses (200 and 201),
    /// otherwise the matching status error. Codes without a dedicated variant
    /// become [`Error::UnknownUpstream`] carrying the status line.
    pub fn from_status(status: StatusCode) -> Option<Self> {
        let err = match status {
            StatusCode::OK | StatusCode::CREATED => return None,
            StatusCode::BAD_REQUEST => Self::BadRequest,
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::FORBIDDEN => Self::Forbidden,
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::INTERNAL_SERVER_ERROR => Self::InternalError,
            other => Self::UnknownUpstream {
                status: other.as_u16(),
                status_text: status_line(other),
            },
        };
        Some(err)
    }

    /// The HTTP status behind a status error, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest => Some(400),
            Self::Unauthorized => Some(401),
            Self::Forbidden => Some(403),
            Self::NotFound => Some(404),
            Self::InternalError => Some(500),
            Self::UnknownUpstream { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True when the upstream answered with a status the client classified
    pub fn is_classified(&self) -> bool {
        matches!(
            self,
            Self::BadRequest
                | Self::Unauthorized
                | Self::Forbidden
                | Self::NotFound
                | Self::InternalError
                | Self::UnknownUpstream { .. }
        )
    }

    /// True for network, timeout and cancellation failures
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Timeout { .. } | Self::Cancelled
        )
    }
}

/// Render a status the way it appears on the wire, e.g. `418 I'm a teapot`
fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}

/// Result type alias for the Smart Accounts client
pub type Result<T> = std::result::Result<T, Error>;
