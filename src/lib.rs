//! # Smart Accounts
//!
//! Client for the Smart Accounts and Licensing REST API: accounts, virtual
//! accounts, license usage, subscriptions and EA consumption reports.
//!
//! ## Features
//!
//! - **Token Memoization**: Password-grant token reused until five minutes before expiry
//! - **Rate Limiting**: Token bucket shared by every call on a client (100/s by default)
//! - **Typed Errors**: Closed error enum classifying transport, auth, status and payload failures
//! - **Pagination**: Offset/limit walking that keeps partial results when a page fails
//! - **Cancellation**: Calls observe a `CancellationToken` at every suspension point
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use smart_accounts::{Client, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::new("client-id", "client-secret", "user", "password")?;
//!
//!     let account = client.find_smart_account_by_domain("example.com").await?;
//!     if let Some(account) = account {
//!         let subs = client.search_subscriptions(account.id, &account.domain).await?;
//!         println!("{} offers", subs.offer_details.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    Endpoint methods (api)                 │
//! └──────────────────────────────┬───────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴──────────┬────────────────┐
//! │  Pagination  │     Request executor     │     Errors     │
//! ├──────────────┼──────────┬───────────────┼────────────────┤
//! │ Offset/limit │  Token   │  Rate limiter │ Status classes │
//! │ Partial res. │ manager  │ (governor)    │ Decode/Auth    │
//! └──────────────┴──────────┴───────────────┴────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Credentials, endpoints and client settings
pub mod config;

/// Token exchange and memoization
pub mod auth;

/// Request executor and rate limiting
pub mod http;

/// Offset/limit pagination
pub mod pagination;

/// The client
pub mod client;

/// Endpoint methods and wire shapes
pub mod api;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::Client;
pub use config::{ClientConfig, Credentials, Endpoints};
pub use error::{Error, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
