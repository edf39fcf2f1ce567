//! Authentication module
//!
//! Password-grant token exchange with single-slot memoization. A token is
//! reused until it is within five minutes of expiry.

mod manager;
mod types;

pub use manager::{TokenManager, DEFAULT_TOKEN_TIMEOUT};
pub use types::{Token, REFRESH_MARGIN_SECS};
