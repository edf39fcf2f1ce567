//! Enterprise agreement consumption report

use super::endpoint_url;
use crate::client::Client;
use crate::error::Result;
use crate::http::ApiRequest;
use serde::{Deserialize, Serialize};

/// Consumption report for the EA subscriptions of a smart account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EaConsumptionReport {
    pub subscriptions: Vec<EaSubscription>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EaSubscription {
    #[serde(rename = "subscriptionID")]
    pub subscription_id: String,
    pub status: String,
    pub start_date: String,
    pub end_date: String,
    pub duration: i64,
    pub remaining_duration: i64,
    pub duration_in_months: i64,
    pub remaining_duration_in_months: i64,
    pub next_true_forward: String,
    pub architecture_name: String,
    pub accounts: Vec<EaAccount>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EaAccount {
    pub smart_account_id: i64,
    pub smart_account_name: String,
    /// The upstream spells this key `vitualAccounts`
    #[serde(rename = "vitualAccounts", alias = "virtualAccounts")]
    pub virtual_accounts: Vec<EaVirtualAccount>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EaVirtualAccount {
    pub virtual_account_id: i64,
    pub virtual_account_name: String,
    pub suites: Vec<EaSuite>,
}

/// Entitlement and consumption totals for one suite
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EaSuite {
    pub cust_suite_id: i64,
    pub suite_name: String,
    pub cust_suite_name: String,
    pub purchased_entitlements: i64,
    pub premier_entitlements: i64,
    pub growth_allowance: i64,
    pub total_entitlements: i64,
    #[serde(rename = "preEAConsumption")]
    pub pre_ea_consumption: i64,
    pub license_generated: i64,
    pub license_migrated: i64,
    #[serde(rename = "c1ToDNAMigratedCount")]
    pub c1_to_dna_migrated_count: i64,
    pub total_consumption: i64,
    pub remaining_entitlements: i64,
    pub software_downloads: i64,
    pub health_message: String,
    pub calculation_method: String,
    pub commitment_type: String,
    pub commerce_skus: Vec<EaCommerceSku>,
}

/// A purchased line item within a suite
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EaCommerceSku {
    pub eol: bool,
    pub cust_suite_id: i64,
    pub commerce_sku: String,
    pub commerce_sku_description: String,
    pub suite_name: String,
    pub cust_suite_name: String,
    pub eol_message: String,
    pub purchased_entitlements: i64,
    pub premier_entitlements: i64,
    pub growth_allowance: i64,
    pub total_entitlements: i64,
    #[serde(rename = "preEAConsumption")]
    pub pre_ea_consumption: i64,
    pub license_generated: i64,
    pub license_migrated: i64,
    #[serde(rename = "c1ToDNAMigratedCount")]
    pub c1_to_dna_migrated_count: i64,
    pub total_consumption: i64,
    pub remaining_entitlements: i64,
    pub software_downloads: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub health_message: String,
    pub calculation_method: String,
    pub commitment_type: String,
}

impl Client {
    /// Consumption report for one EA subscription of a smart account.
    ///
    /// The upstream answers 400 when the account has no matching
    /// subscription, which surfaces as [`Error::BadRequest`](crate::Error::BadRequest).
    pub async fn get_ea_consumption_report(
        &self,
        smart_account_domain: &str,
        subscription_id: &str,
    ) -> Result<EaConsumptionReport> {
        let url = endpoint_url(
            &self.config().endpoints.enterprise_url,
            &[
                "v1",
                "subscription",
                "account",
                smart_account_domain,
                "subscription",
                subscription_id,
                "consumption",
            ],
        )?;
        self.fetch(ApiRequest::get(url)).await
    }
}
