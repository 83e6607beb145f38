//! Status classification and error propagation.

use carbonarc::{
    CarbonArcClient, CarbonArcError, ClientConfig, Endpoint, Product, Route, RouteTable,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn fetch_datasets_with_status(template: ResponseTemplate) -> CarbonArcError {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/library/data"))
        .respond_with(template)
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = CarbonArcClient::new("test-token", &mock_server.uri()).unwrap();
    client.data().get_datasets().await.unwrap_err()
}

#[tokio::test]
async fn test_401_is_authentication_error() {
    let err = fetch_datasets_with_status(
        ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid token"})),
    )
    .await;

    assert!(err.is_authentication());
    assert_eq!(err.status_code(), Some(401));
    assert!(err.to_string().contains("Invalid token"));
}

#[tokio::test]
async fn test_404_is_not_found() {
    let err = fetch_datasets_with_status(ResponseTemplate::new(404)).await;
    assert!(matches!(err, CarbonArcError::NotFound { .. }));
}

#[tokio::test]
async fn test_422_is_validation() {
    let err = fetch_datasets_with_status(
        ResponseTemplate::new(422).set_body_json(json!({"message": "size must be <= 1000"})),
    )
    .await;

    match err {
        CarbonArcError::Validation { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "size must be <= 1000");
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn test_429_reads_retry_after() {
    let err = fetch_datasets_with_status(
        ResponseTemplate::new(429).insert_header("retry-after", "30"),
    )
    .await;

    assert!(matches!(
        err,
        CarbonArcError::RateLimited {
            retry_after_secs: Some(30),
            ..
        }
    ));
}

#[tokio::test]
async fn test_other_status_keeps_plain_body() {
    let err = fetch_datasets_with_status(
        ResponseTemplate::new(503).set_body_string("upstream unavailable"),
    )
    .await;

    match err {
        CarbonArcError::Api {
            status_code,
            message,
            body,
        } => {
            assert_eq!(status_code, 503);
            assert_eq!(message, "upstream unavailable");
            assert_eq!(body, "upstream unavailable");
        }
        other => panic!("expected Api, got {other:?}"),
    }
}

#[tokio::test]
async fn test_other_status_keeps_full_json_body() {
    let err = fetch_datasets_with_status(
        ResponseTemplate::new(500).set_body_json(json!({"detail": "boom", "request_id": "r-42"})),
    )
    .await;

    match err {
        CarbonArcError::Api {
            status_code,
            message,
            body,
        } => {
            assert_eq!(status_code, 500);
            assert_eq!(message, "boom");
            let body: serde_json::Value = serde_json::from_str(&body).unwrap();
            assert_eq!(body["request_id"], "r-42");
        }
        other => panic!("expected Api, got {other:?}"),
    }
}

#[tokio::test]
async fn test_authentication_error_is_not_swallowed_by_iterators() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/explorer/data/data-identifiers"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = CarbonArcClient::new("bad-token", &mock_server.uri()).unwrap();
    let mut pager = client.explorer().iter_insights_data_identifiers(10);

    let first = pager.next_page().await;
    assert!(matches!(first, Some(Err(ref e)) if e.is_authentication()));
    assert!(pager.next_page().await.is_none());
}

#[tokio::test]
async fn test_registered_route_serves_placeholder() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/platform/wallet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"balance": 12.5})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig::new("test-token").with_host(mock_server.uri());
    let client = CarbonArcClient::with_config(config)
        .unwrap()
        .with_route_table(RouteTable::v2().register(
            Endpoint::PlatformWalletBalance,
            Route::new(Product::Platform, "/wallet"),
        ));

    let balance = client.platform().get_wallet_balance().await.unwrap();
    assert_eq!(balance["balance"], 12.5);

    assert!(matches!(
        client.platform().get_order_history().await,
        Err(CarbonArcError::Unsupported { operation: "get_order_history", .. })
    ));
}
