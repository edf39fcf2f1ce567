//! Integration tests using mock HTTP server
//!
//! Tests the full flow: endpoint method → token exchange → rate limiter →
//! HTTP call → classification → typed result

use pretty_assertions::assert_eq;
use serde_json::json;
use smart_accounts::api::SmartAccount;
use smart_accounts::http::RateLimiterConfig;
use smart_accounts::{Client, ClientConfig, Credentials, Error};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const LICENSING: &str = "/services/api/smart-accounts-and-licensing";
const ENTERPRISE: &str = "/services/api/enterprise-agreements";

fn client_for(server: &MockServer) -> Client {
    let config = ClientConfig::builder()
        .base_url(server.uri())
        .rate_limit(RateLimiterConfig::new(1_000, 10))
        .timeout(Duration::from_secs(5))
        .build();
    Client::with_config(Credentials::new("cid", "csecret", "alice", "pw"), config).unwrap()
}

async fn mount_token(server: &MockServer, expected_exchanges: u64) {
    Mock::given(method("POST"))
        .and(path("/as/token.oauth2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "integration-token",
            "token_type": "Bearer",
            "expires_in": 3599
        })))
        .expect(expected_exchanges)
        .mount(server)
        .await;
}

// ============================================================================
// Token + Executor
// ============================================================================

#[tokio::test]
async fn test_token_is_fetched_once_across_calls() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, 1).await;

    Mock::given(method("GET"))
        .and(path(format!("{LICENSING}/v2/accounts")))
        .and(header("authorization", "Bearer integration-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accounts": [
                {"accountDomain": "example.com", "accountName": "Example", "roles": [{"role": "SMART_ACCOUNT_ADMIN"}]}
            ],
            "status": "SUCCESS"
        })))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    for _ in 0..3 {
        let accounts = client.get_all_smart_accounts().await.unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].roles[0].role, "SMART_ACCOUNT_ADMIN");
    }
}

#[tokio::test]
async fn test_concurrent_calls_through_one_client() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, 1).await;

    Mock::given(method("GET"))
        .and(path(format!("{LICENSING}/v1/accounts/example.com/customer/virtual-accounts")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "virtualAccounts": [{"isDefault": "true", "name": "DEFAULT"}]
        })))
        .expect(10)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    // Warm the token so the concurrent calls below share it
    client.token().await.unwrap();

    let calls = (0..10).map(|_| {
        let client = client.clone();
        async move { client.get_virtual_accounts("example.com").await }
    });
    for result in futures::future::join_all(calls).await {
        let vas = result.unwrap();
        assert!(vas[0].is_default);
    }
}

#[tokio::test]
async fn test_classified_error_reaches_endpoint_caller() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, 1).await;

    Mock::given(method("GET"))
        .and(path(format!("{LICENSING}/v1/accounts/nope.com/customer/virtual-accounts")))
        .respond_with(ResponseTemplate::new(403).set_body_string("denied"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.get_virtual_accounts("nope.com").await.unwrap_err();
    assert!(matches!(err, Error::Forbidden), "{err:?}");
}

#[tokio::test]
async fn test_cancelled_client_aborts_call() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, 1).await;

    Mock::given(method("GET"))
        .and(path(format!("{LICENSING}/v2/accounts")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"accounts": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let cancel = CancellationToken::new();
    let client = client_for(&mock_server).with_cancellation(cancel.clone());
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let err = client.get_all_smart_accounts().await.unwrap_err();
    assert!(matches!(err, Error::Cancelled), "{err:?}");
}

// ============================================================================
// Account Search
// ============================================================================

async fn mount_search(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("{LICENSING}/v1/accounts/search")))
        .and(query_param("domain", "work.com"))
        .and(query_param("type", "CUSTOMER"))
        .and(query_param("limit", "1000"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalRecords": 3,
            "accounts": [
                {"domain": "wework.com", "name": "We Work", "id": 1, "type": "CUSTOMER", "status": "ACTIVE"},
                {"domain": "work.com", "name": "Work", "id": 2, "type": "CUSTOMER", "status": "ACTIVE"},
                {"domain": "work.com", "name": "Work", "id": 2, "type": "CUSTOMER", "status": "ACTIVE"}
            ],
            "status": "SUCCESS"
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_search_is_repeatable_and_keeps_duplicates() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, 1).await;
    mount_search(&mock_server).await;

    let client = client_for(&mock_server);
    let first = client.search_smart_accounts_by_domain("work.com").await.unwrap();
    let second = client.search_smart_accounts_by_domain("work.com").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.total_records, 3);
    assert_eq!(first.accounts.len(), 3);
}

#[tokio::test]
async fn test_find_filters_exact_domain() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, 1).await;
    mount_search(&mock_server).await;

    let client = client_for(&mock_server);
    let account = client
        .find_smart_account_by_domain("work.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(account.id, 2);
    assert_eq!(account.domain, "work.com");
}

// ============================================================================
// Subscriptions
// ============================================================================

#[tokio::test]
async fn test_subscription_search_returns_duplicates_verbatim() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, 1).await;

    let subscription = json!({
        "subRefId": "SR-1",
        "vaDetails": [{"virtualAccountId": "11", "virtualAccountName": "DEFAULT"}],
        "suites": [],
        "additionalParams": []
    });
    Mock::given(method("POST"))
        .and(path(format!("{LICENSING}/v1/subscription/search")))
        .and(body_json(json!({
            "source": "",
            "smartAccount": [{"smartAccountId": 2, "domain": "example.com"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "source": "",
            "status": "SUCCESS",
            "offerDetails": [{
                "smartAccountId": "2",
                "subscriptions": [subscription.clone(), subscription]
            }]
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let first = client.search_subscriptions(2, "example.com").await.unwrap();
    let second = client.search_subscriptions(2, "example.com").await.unwrap();

    assert_eq!(first, second);
    let subs = &first.offer_details[0].subscriptions;
    assert_eq!(subs.len(), 2);
    assert_eq!(subs[0], subs[1]);
}

// ============================================================================
// License Usage
// ============================================================================

fn license_page(request: &Request, total: u64, virtual_account: &str) -> ResponseTemplate {
    let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
    let offset = body["offset"].as_u64().unwrap();
    let limit = body["limit"].as_u64().unwrap();
    let count = total.saturating_sub(offset).min(limit);
    let licenses: Vec<_> = (offset..offset + count)
        .map(|i| json!({"license": format!("L{i}"), "virtualAccount": virtual_account, "quantity": 1}))
        .collect();
    ResponseTemplate::new(200).set_body_json(json!({
        "totalRecords": total,
        "licenses": licenses,
        "status": "SUCCESS"
    }))
}

#[tokio::test]
async fn test_license_usage_paginates_each_virtual_account() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, 1).await;

    Mock::given(method("POST"))
        .and(path(format!("{LICENSING}/v1/accounts/example.com/licenses")))
        .and(body_partial_json(json!({"virtualAccounts": ["DEFAULT"]})))
        .respond_with(|req: &Request| license_page(req, 250, "DEFAULT"))
        .expect(3)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!("{LICENSING}/v1/accounts/example.com/licenses")))
        .and(body_partial_json(json!({"virtualAccounts": ["LAB"]})))
        .respond_with(|req: &Request| license_page(req, 20, "LAB"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut account = SmartAccount::from_domain("example.com");
    account.virtual_accounts = Some(
        serde_json::from_value(json!([{"name": "DEFAULT"}, {"name": "LAB"}])).unwrap(),
    );

    let usage = client.get_smart_license_usage(&account).await.unwrap();
    assert!(usage.is_complete());
    assert_eq!(usage.licenses.len(), 270);
    assert_eq!(usage.licenses[249].license, "L249");
    assert_eq!(usage.licenses[250].virtual_account, "LAB");
}

#[tokio::test]
async fn test_license_usage_keeps_partial_results_on_failure() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, 1).await;

    Mock::given(method("GET"))
        .and(path(format!("{LICENSING}/v1/accounts/example.com/customer/virtual-accounts")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "virtualAccounts": [{"name": "BROKEN"}, {"name": "DEFAULT"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // BROKEN fails on its second page
    Mock::given(method("POST"))
        .and(path(format!("{LICENSING}/v1/accounts/example.com/licenses")))
        .and(body_partial_json(json!({"virtualAccounts": ["BROKEN"], "offset": 100})))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("{LICENSING}/v1/accounts/example.com/licenses")))
        .and(body_partial_json(json!({"virtualAccounts": ["BROKEN"], "offset": 0})))
        .respond_with(|req: &Request| license_page(req, 300, "BROKEN"))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("{LICENSING}/v1/accounts/example.com/licenses")))
        .and(body_partial_json(json!({"virtualAccounts": ["DEFAULT"]})))
        .respond_with(|req: &Request| license_page(req, 5, "DEFAULT"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let usage = client
        .get_smart_license_usage(&SmartAccount::from_domain("example.com"))
        .await
        .unwrap();

    assert!(!usage.is_complete());
    assert_eq!(usage.licenses.len(), 105);
    assert_eq!(usage.failures.len(), 1);
    assert_eq!(usage.failures[0].virtual_account, "BROKEN");
    assert!(matches!(usage.failures[0].error, Error::InternalError));
}

#[tokio::test]
async fn test_license_usage_fails_when_virtual_accounts_cannot_be_listed() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, 1).await;

    Mock::given(method("GET"))
        .and(path(format!("{LICENSING}/v1/accounts/example.com/customer/virtual-accounts")))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get_smart_license_usage(&SmartAccount::from_domain("example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthorized));
}

// ============================================================================
// EA Consumption
// ============================================================================

#[tokio::test]
async fn test_consumption_report_decodes_upstream_spelling() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, 1).await;

    Mock::given(method("GET"))
        .and(path(format!(
            "{ENTERPRISE}/v1/subscription/account/example.com/subscription/Sub-123/consumption"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "subscriptions": [{
                "subscriptionID": "Sub-123",
                "status": "ACTIVE",
                "durationInMonths": 36,
                "accounts": [{
                    "smartAccountId": 2,
                    "smartAccountName": "Example",
                    "vitualAccounts": [{
                        "virtualAccountId": 11,
                        "virtualAccountName": "DEFAULT",
                        "suites": [{
                            "suiteName": "DNA",
                            "totalEntitlements": 100,
                            "totalConsumption": 40,
                            "commerceSkus": [{"commerceSku": "E3-N-AS", "totalConsumption": 40}]
                        }]
                    }]
                }]
            }]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let report = client
        .get_ea_consumption_report("example.com", "Sub-123")
        .await
        .unwrap();

    let subscription = &report.subscriptions[0];
    assert_eq!(subscription.subscription_id, "Sub-123");
    assert_eq!(subscription.duration_in_months, 36);
    let va = &subscription.accounts[0].virtual_accounts[0];
    assert_eq!(va.virtual_account_name, "DEFAULT");
    assert_eq!(va.suites[0].total_consumption, 40);
    assert_eq!(va.suites[0].commerce_skus[0].commerce_sku, "E3-N-AS");
}

#[tokio::test]
async fn test_consumption_report_without_subscription_is_bad_request() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, 1).await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": 400,
            "message": "No subscriptions found",
            "severity": "ERROR"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get_ea_consumption_report("example.com", "missing")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::BadRequest));
}
