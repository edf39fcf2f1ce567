//! CLI module
//!
//! Command-line front end over the endpoint methods.
//!
//! # Commands
//!
//! - `search` - Substring search of customer smart accounts
//! - `find` - Exact-domain lookup
//! - `accounts` - List accessible smart accounts
//! - `virtual-accounts` - List virtual accounts of a domain
//! - `usage` - License usage across virtual accounts
//! - `subscriptions` - Subscription search
//! - `consumption` - EA consumption report

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
