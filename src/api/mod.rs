//! Endpoint methods
//!
//! Each submodule adds methods to [`Client`](crate::Client) for one area of
//! the API, together with the wire shapes those methods decode. Response
//! shapes default missing fields, matching how the upstream omits empty ones.

mod accounts;
mod consumption;
mod licenses;
mod subscriptions;

pub use accounts::{
    Role, SearchAccount, SearchResponse, SmartAccount, SmartAccountResponse, VirtualAccount,
    VirtualAccountResponse,
};
pub use consumption::{
    EaAccount, EaCommerceSku, EaConsumptionReport, EaSubscription, EaSuite, EaVirtualAccount,
};
pub use licenses::{
    License, LicenseDetail, LicenseRequest, LicenseResponse, LicenseSubstitution, LicenseUsage,
    VirtualAccountFailure,
};
pub use subscriptions::{
    SubscriptionSearchAccount, SubscriptionSearchAdditionalParameter,
    SubscriptionSearchOfferDetails, SubscriptionSearchRequest, SubscriptionSearchResponse,
    SubscriptionSearchSubscription, SubscriptionSearchSuite, SubscriptionSearchVirtualAccount,
};

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer};
use url::Url;

/// Append percent-encoded path segments to a base URL
pub(crate) fn endpoint_url(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|()| Error::config(format!("base URL cannot carry a path: {base}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Accept a boolean sent either as JSON `true` or as the string `"true"`
pub(crate) fn lenient_bool<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<Repr>::deserialize(deserializer)? {
        Some(Repr::Bool(value)) => value,
        Some(Repr::Text(text)) => text.trim().eq_ignore_ascii_case("true"),
        None => false,
    })
}
