//! CLI commands and argument parsing

use crate::config::{ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_PASSWORD, ENV_USERNAME};
use clap::{Parser, Subcommand};

/// Smart Accounts and Licensing API CLI
#[derive(Parser, Debug)]
#[command(name = "smart-accounts")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// OAuth2 client id
    #[arg(long, global = true, env = ENV_CLIENT_ID, hide_env_values = true)]
    pub client_id: Option<String>,

    /// OAuth2 client secret
    #[arg(long, global = true, env = ENV_CLIENT_SECRET, hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Account username
    #[arg(long, global = true, env = ENV_USERNAME, hide_env_values = true)]
    pub username: Option<String>,

    /// Account password
    #[arg(long, global = true, env = ENV_PASSWORD, hide_env_values = true)]
    pub password: Option<String>,

    /// Send every request to this host instead of the vendor endpoints
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "30")]
    pub timeout: u64,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search customer smart accounts by domain (substring match)
    Search {
        #[arg(long)]
        domain: String,
    },

    /// Find the smart account whose domain matches exactly
    Find {
        #[arg(long)]
        domain: String,
    },

    /// List all accessible smart accounts
    Accounts,

    /// List the virtual accounts of a smart account
    VirtualAccounts {
        #[arg(long)]
        domain: String,
    },

    /// License usage across all virtual accounts of a smart account
    Usage {
        #[arg(long)]
        domain: String,
    },

    /// Search subscriptions of a smart account
    Subscriptions {
        #[arg(long)]
        domain: String,

        /// Numeric smart account id (looked up by domain when omitted)
        #[arg(long)]
        account_id: Option<i64>,
    },

    /// EA consumption report for a subscription
    Consumption {
        #[arg(long)]
        domain: String,

        #[arg(long)]
        subscription: String,
    },
}
