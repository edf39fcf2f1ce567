//! Smart account and virtual account endpoints

use super::licenses::License;
use super::{endpoint_url, lenient_bool};
use crate::client::Client;
use crate::error::Result;
use crate::http::ApiRequest;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result cap the search endpoint applies to every query
const SEARCH_LIMIT: &str = "1000";

/// Response to listing all accessible smart accounts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SmartAccountResponse {
    pub accounts: Vec<SmartAccount>,
    pub status_message: String,
    pub status: String,
}

/// A smart account.
///
/// `virtual_accounts` and `licenses` are not sent by the listing endpoint;
/// callers fill them in to drive [`Client::get_smart_license_usage`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SmartAccount {
    pub account_status: String,
    pub account_domain: String,
    pub account_name: String,
    pub account_type: String,
    pub roles: Vec<Role>,
    pub virtual_accounts: Option<Vec<VirtualAccount>>,
    pub licenses: Option<Vec<License>>,
}

impl SmartAccount {
    /// A bare smart account identified by its domain
    pub fn from_domain(domain: impl Into<String>) -> Self {
        Self {
            account_domain: domain.into(),
            ..Self::default()
        }
    }
}

/// Role the caller holds on a smart account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Role {
    pub role: String,
}

/// Response to listing the virtual accounts of a domain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VirtualAccountResponse {
    pub virtual_accounts: Vec<VirtualAccount>,
    pub status_message: String,
    pub status: String,
}

/// A virtual account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VirtualAccount {
    /// Sent as a quoted string by the upstream
    #[serde(deserialize_with = "lenient_bool")]
    pub is_default: bool,
    pub name: String,
    pub description: String,
    pub commerce_access_level: String,
}

/// Response to an account search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchResponse {
    pub total_records: u64,
    pub accounts: Vec<SearchAccount>,
    pub status_message: String,
    pub status: String,
}

/// An account as returned by search, which unlike [`SmartAccount`] carries
/// the numeric id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchAccount {
    pub domain: String,
    pub name: String,
    pub id: i64,
    #[serde(rename = "type")]
    pub account_type: String,
    pub status: String,
}

impl Client {
    /// Search customer smart accounts by domain.
    ///
    /// The upstream matches substrings, so `work.com` also returns
    /// `wework.com`, and caps the response at 1000 accounts. Use
    /// [`Client::find_smart_account_by_domain`] for an exact match.
    pub async fn search_smart_accounts_by_domain(&self, domain: &str) -> Result<SearchResponse> {
        let mut url = endpoint_url(
            &self.config().endpoints.licensing_url,
            &["v1", "accounts", "search"],
        )?;
        url.query_pairs_mut()
            .append_pair("domain", domain)
            .append_pair("type", "CUSTOMER")
            .append_pair("limit", SEARCH_LIMIT)
            .append_pair("offset", "0");

        self.fetch(ApiRequest::get(url)).await
    }

    /// Search by domain and keep only the account whose domain matches exactly
    /// (ignoring ASCII case)
    pub async fn find_smart_account_by_domain(&self, domain: &str) -> Result<Option<SearchAccount>> {
        let response = self.search_smart_accounts_by_domain(domain).await?;
        debug!(
            domain,
            candidates = response.accounts.len(),
            "Filtering search results"
        );
        Ok(response
            .accounts
            .into_iter()
            .find(|account| account.domain.eq_ignore_ascii_case(domain)))
    }

    /// List every smart account the user can access.
    ///
    /// The listing omits numeric account ids; cross-reference with
    /// [`Client::search_smart_accounts_by_domain`] when you need them.
    pub async fn get_all_smart_accounts(&self) -> Result<Vec<SmartAccount>> {
        let url = endpoint_url(&self.config().endpoints.licensing_admin_url, &["v2", "accounts"])?;
        let response: SmartAccountResponse = self.fetch(ApiRequest::get(url)).await?;
        Ok(response.accounts)
    }

    /// List the virtual accounts of a smart account domain
    pub async fn get_virtual_accounts(&self, domain: &str) -> Result<Vec<VirtualAccount>> {
        let url = endpoint_url(
            &self.config().endpoints.licensing_admin_url,
            &["v1", "accounts", domain, "customer", "virtual-accounts"],
        )?;
        let response: VirtualAccountResponse = self.fetch(ApiRequest::get(url)).await?;
        Ok(response.virtual_accounts)
    }
}
