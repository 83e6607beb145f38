//! Hub client tests.

use carbonarc::{
    CarbonArcClient, CarbonArcError, ClientConfig, Endpoint, Product, Route, RouteTable,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A client whose table carries web content routes on top of v2.
fn webcontent_client(server: &MockServer) -> CarbonArcClient {
    let table = RouteTable::v2()
        .register(
            Endpoint::HubWebcontentFeeds,
            Route::new(Product::Hub, "/webcontent"),
        )
        .register(
            Endpoint::HubSubscribedFeeds,
            Route::new(Product::Hub, "/webcontent/subscribed"),
        )
        .register(
            Endpoint::HubWebcontentData,
            Route::new(Product::Hub, "/webcontent/{}"),
        );
    let config = ClientConfig::new("test-token").with_host(server.uri());
    CarbonArcClient::with_config(config)
        .unwrap()
        .with_route_table(table)
}

#[tokio::test]
async fn test_webcontent_is_unsupported_on_default_table() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = CarbonArcClient::new("test-token", &mock_server.uri()).unwrap();
    let hub = client.hub();

    assert!(matches!(
        hub.get_webcontent_data("news", 1, 10).await,
        Err(CarbonArcError::Unsupported { operation: "get_webcontent_data", .. })
    ));
    assert!(matches!(
        hub.get_webcontent_feeds().await,
        Err(CarbonArcError::Unsupported { .. })
    ));
    assert!(matches!(
        hub.get_subscribed_feeds().await,
        Err(CarbonArcError::Unsupported { .. })
    ));

    let mut pager = hub.iter_webcontent_data("news", 10);
    assert!(matches!(
        pager.next_page().await,
        Some(Err(CarbonArcError::Unsupported { .. }))
    ));
    assert!(pager.next_page().await.is_none());
}

#[tokio::test]
async fn test_registered_webcontent_feeds_and_subscriptions() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/hub/webcontent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"feeds": ["news"]})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/hub/webcontent/subscribed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"feeds": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = webcontent_client(&mock_server);
    let hub = client.hub();

    assert_eq!(hub.get_webcontent_feeds().await.unwrap()["feeds"][0], "news");
    assert_eq!(hub.get_subscribed_feeds().await.unwrap()["feeds"], json!([]));
    assert!(matches!(
        hub.get_subscriptions().await,
        Err(CarbonArcError::Unsupported { operation: "get_subscriptions", .. })
    ));
}

#[tokio::test]
async fn test_iter_webcontent_stops_on_empty_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/hub/webcontent/news"))
        .and(query_param("page", "1"))
        .and(query_param("size", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"title": "a"}],
            "pages": 9
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/hub/webcontent/news"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = webcontent_client(&mock_server);
    let pages = client
        .hub()
        .iter_webcontent_data("news", 5)
        .collect_all()
        .await
        .unwrap();

    assert_eq!(pages.len(), 1);
}
