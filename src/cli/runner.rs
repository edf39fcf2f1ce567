//! CLI runner - executes commands

use crate::api::SmartAccount;
use crate::cli::commands::{Cli, Commands};
use crate::client::Client;
use crate::config::{ClientConfig, Credentials, Endpoints};
use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::json;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, aborting in-flight calls when `cancel` fires
    pub async fn run(&self, cancel: CancellationToken) -> Result<()> {
        let client = self.build_client()?.with_cancellation(cancel);

        match &self.cli.command {
            Commands::Search { domain } => {
                print_json(&client.search_smart_accounts_by_domain(domain).await?)
            }
            Commands::Find { domain } => {
                match client.find_smart_account_by_domain(domain).await? {
                    Some(account) => print_json(&account),
                    None => Err(no_exact_match(domain)),
                }
            }
            Commands::Accounts => print_json(&client.get_all_smart_accounts().await?),
            Commands::VirtualAccounts { domain } => {
                print_json(&client.get_virtual_accounts(domain).await?)
            }
            Commands::Usage { domain } => self.usage(&client, domain).await,
            Commands::Subscriptions { domain, account_id } => {
                self.subscriptions(&client, domain, *account_id).await
            }
            Commands::Consumption {
                domain,
                subscription,
            } => print_json(
                &client
                    .get_ea_consumption_report(domain, subscription)
                    .await?,
            ),
        }
    }

    /// Build the client from flags and environment
    fn build_client(&self) -> Result<Client> {
        let credentials = Credentials::new(
            required(self.cli.client_id.as_deref(), "client id")?,
            required(self.cli.client_secret.as_deref(), "client secret")?,
            required(self.cli.username.as_deref(), "username")?,
            required(self.cli.password.as_deref(), "password")?,
        );

        let endpoints = match &self.cli.base_url {
            Some(base) => Endpoints::with_base(base),
            None => Endpoints::default(),
        };
        let config = ClientConfig::builder()
            .endpoints(endpoints)
            .timeout(Duration::from_secs(self.cli.timeout))
            .build();

        Client::with_config(credentials, config)
    }

    async fn usage(&self, client: &Client, domain: &str) -> Result<()> {
        let usage = client
            .get_smart_license_usage(&SmartAccount::from_domain(domain))
            .await?;

        let failures: Vec<_> = usage
            .failures
            .iter()
            .map(|f| json!({"virtualAccount": f.virtual_account, "error": f.error.to_string()}))
            .collect();
        print_json(&json!({
            "licenses": usage.licenses,
            "failures": failures,
        }))
    }

    async fn subscriptions(
        &self,
        client: &Client,
        domain: &str,
        account_id: Option<i64>,
    ) -> Result<()> {
        let account_id = match account_id {
            Some(id) => id,
            None => {
                let account = client
                    .find_smart_account_by_domain(domain)
                    .await?
                    .ok_or_else(|| no_exact_match(domain))?;
                info!(domain, id = account.id, "Resolved smart account id");
                account.id
            }
        };
        print_json(&client.search_subscriptions(account_id, domain).await?)
    }
}

fn required(value: Option<&str>, what: &str) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(Error::config(format!(
            "{what} not provided (flag or SMART_ACCOUNTS_* environment variable)"
        ))),
    }
}

/// Search returned accounts but none carries exactly this domain
fn no_exact_match(domain: &str) -> Error {
    Error::config(format!("no smart account matches domain {domain} exactly"))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| Error::config(format!("failed to render output: {e}")))?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod runner_tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_missing_credentials_is_config_error() {
        let cli = Cli::try_parse_from([
            "smart-accounts",
            "--client-id",
            "",
            "--client-secret",
            "s",
            "--username",
            "u",
            "--password",
            "p",
            "accounts",
        ])
        .unwrap();
        let err = Runner::new(cli).build_client().unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_no_exact_match_is_local_error() {
        let err = no_exact_match("example.com");
        assert!(err.to_string().contains("example.com"));
        assert_ne!(err.to_string(), Error::NotFound.to_string());
        assert!(!err.is_classified());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_base_url_routes_every_endpoint() {
        let cli = Cli::try_parse_from([
            "smart-accounts",
            "--client-id",
            "i",
            "--client-secret",
            "s",
            "--username",
            "u",
            "--password",
            "p",
            "--base-url",
            "http://127.0.0.1:8080",
            "--timeout",
            "5",
            "search",
            "--domain",
            "example.com",
        ])
        .unwrap();
        let client = Runner::new(cli).build_client().unwrap();
        assert_eq!(
            client.config().endpoints,
            Endpoints::with_base("http://127.0.0.1:8080")
        );
        assert_eq!(client.config().timeout, Duration::from_secs(5));
    }
}
