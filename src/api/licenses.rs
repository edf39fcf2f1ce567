//! License usage endpoints

use super::accounts::SmartAccount;
use super::endpoint_url;
use crate::client::Client;
use crate::error::{Error, Result};
use crate::http::ApiRequest;
use crate::pagination::{Page, PagedResult};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Body of a license listing request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseRequest {
    pub virtual_accounts: Vec<String>,
    pub limit: u32,
    pub offset: u64,
}

/// One page of licenses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LicenseResponse {
    pub total_records: u64,
    pub licenses: Vec<License>,
    pub status_message: String,
    pub status: String,
}

/// Usage of one license in a virtual account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct License {
    pub license_substitutions: Vec<LicenseSubstitution>,
    pub is_portable: bool,
    pub license: String,
    pub virtual_account: String,
    pub quantity: i64,
    pub in_use: i64,
    pub available: i64,
    pub status: String,
    /// PREPAID or USAGE
    pub billing_type: String,
    pub aha_apps: bool,
    pub pending_quantity: i64,
    pub reserved: i64,
    pub license_details: Vec<LicenseDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LicenseSubstitution {
    pub license_name: String,
    pub substituted_license: String,
    pub substituted_quantity: i64,
    pub substitution_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LicenseDetail {
    /// TERM, DEMO or PERPETUAL
    pub license_type: String,
    pub quantity: i64,
    pub start_date: String,
    pub end_date: String,
    pub subscription_id: String,
    pub status: String,
}

/// Licenses gathered across the virtual accounts of a smart account
#[derive(Debug, Default)]
pub struct LicenseUsage {
    pub licenses: Vec<License>,
    /// Virtual accounts whose listing stopped early
    pub failures: Vec<VirtualAccountFailure>,
}

impl LicenseUsage {
    /// True when every virtual account was listed to the end
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A virtual account whose license listing failed part way
#[derive(Debug)]
pub struct VirtualAccountFailure {
    pub virtual_account: String,
    pub error: Error,
}

impl Client {
    /// Fetch one page of licenses for the given virtual accounts
    pub async fn get_licenses(
        &self,
        domain: &str,
        virtual_accounts: &[String],
        offset: u64,
        limit: u32,
    ) -> Result<LicenseResponse> {
        let url = endpoint_url(
            &self.config().endpoints.licensing_url,
            &["v1", "accounts", domain, "licenses"],
        )?;
        let body = LicenseRequest {
            virtual_accounts: virtual_accounts.to_vec(),
            limit,
            offset,
        };
        self.fetch(ApiRequest::post(url).json_from(&body)?).await
    }

    /// Every license in one virtual account, page by page.
    ///
    /// A failing page ends the listing; what was fetched before it is kept.
    pub async fn get_virtual_account_licenses(
        &self,
        domain: &str,
        virtual_account: &str,
    ) -> PagedResult<License> {
        let names: &[String] = &[virtual_account.to_string()];
        self.paginator()
            .paginate(|offset, limit| async move {
                let page = self.get_licenses(domain, names, offset, limit).await?;
                Ok(Page::new(page.licenses, page.total_records))
            })
            .await
    }

    /// License usage across all virtual accounts of a smart account.
    ///
    /// Uses `account.virtual_accounts` when populated, otherwise lists them
    /// first (failure to list them is the only hard error). A failure in one
    /// virtual account is recorded in [`LicenseUsage::failures`] and the
    /// remaining virtual accounts are still listed.
    pub async fn get_smart_license_usage(&self, account: &SmartAccount) -> Result<LicenseUsage> {
        let domain = account.account_domain.as_str();
        let virtual_accounts = match &account.virtual_accounts {
            Some(list) => list.clone(),
            None => self.get_virtual_accounts(domain).await?,
        };

        let mut usage = LicenseUsage::default();
        for va in &virtual_accounts {
            let result = self.get_virtual_account_licenses(domain, &va.name).await;
            usage.licenses.extend(result.items);
            if let Some(error) = result.error {
                warn!(domain, virtual_account = %va.name, error = %error, "Error retrieving licenses");
                usage.failures.push(VirtualAccountFailure {
                    virtual_account: va.name.clone(),
                    error,
                });
            }
        }

        info!(
            domain,
            virtual_accounts = virtual_accounts.len(),
            licenses = usage.licenses.len(),
            failures = usage.failures.len(),
            "Collected license usage"
        );
        Ok(usage)
    }
}
