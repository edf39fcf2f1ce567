//! Subscription search

use super::endpoint_url;
use crate::client::Client;
use crate::error::Result;
use crate::http::ApiRequest;
use serde::{Deserialize, Serialize};

/// Body of a subscription search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSearchRequest {
    pub source: String,
    #[serde(rename = "smartAccount")]
    pub smart_accounts: Vec<SubscriptionSearchAccount>,
}

/// Smart account id/domain pair to search under
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSearchAccount {
    pub smart_account_id: i64,
    pub domain: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubscriptionSearchResponse {
    pub source: String,
    pub status: String,
    pub offer_details: Vec<SubscriptionSearchOfferDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubscriptionSearchOfferDetails {
    /// A string here, unlike in the request
    pub smart_account_id: String,
    pub subscriptions: Vec<SubscriptionSearchSubscription>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubscriptionSearchSubscription {
    pub sub_ref_id: String,
    #[serde(rename = "vaDetails")]
    pub virtual_account_details: Vec<SubscriptionSearchVirtualAccount>,
    pub suites: Vec<SubscriptionSearchSuite>,
    #[serde(rename = "additionalParams")]
    pub additional_parameters: Vec<SubscriptionSearchAdditionalParameter>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubscriptionSearchVirtualAccount {
    pub virtual_account_id: String,
    pub virtual_account_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubscriptionSearchSuite {
    pub suite_name: String,
    pub ato_name: String,
    pub architecture: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionSearchAdditionalParameter {
    #[serde(rename = "paramName")]
    pub parameter_name: String,
    pub value: String,
}

impl Client {
    /// Search subscriptions under a smart account.
    ///
    /// This is a search: the response may list the same subscription more
    /// than once and is returned as received.
    pub async fn search_subscriptions(
        &self,
        smart_account_id: i64,
        smart_account_domain: &str,
    ) -> Result<SubscriptionSearchResponse> {
        let url = endpoint_url(
            &self.config().endpoints.licensing_admin_url,
            &["v1", "subscription", "search"],
        )?;
        let body = SubscriptionSearchRequest {
            source: String::new(),
            smart_accounts: vec![SubscriptionSearchAccount {
                smart_account_id,
                domain: smart_account_domain.to_string(),
            }],
        };
        self.fetch(ApiRequest::post(url).json_from(&body)?).await
    }
}
