//! Ontology client tests.

use carbonarc::{CarbonArcClient, CarbonArcError, EntityFilter, EntitySearch};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CarbonArcClient {
    CarbonArcClient::new("test-token", &server.uri()).unwrap()
}

async fn last_query(server: &MockServer) -> String {
    let requests = server.received_requests().await.unwrap();
    let request = requests.last().expect("no request received");
    request.url.query().unwrap_or_default().to_string()
}

#[tokio::test]
async fn test_representations_repeat_list_keys() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/ontology/entity-representations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"representations": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    client_for(&mock_server)
        .ontology()
        .get_ontology_representations(
            &["brand".to_string(), "company".to_string()],
            &["restaurants".to_string()],
        )
        .await
        .unwrap();

    assert_eq!(
        last_query(&mock_server).await,
        "entity=brand&entity=company&entity_domain=restaurants"
    );
}

#[tokio::test]
async fn test_representations_without_filters_has_no_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/ontology/entity-representations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    client_for(&mock_server)
        .ontology()
        .get_ontology_representations(&[], &[])
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_entity_search_defaults_and_search_score() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/ontology/entities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [], "pages": 0})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let search = EntitySearch::default()
        .with_domains(["restaurants"])
        .with_search("coffee");
    client_for(&mock_server)
        .ontology()
        .get_ontology_entities(&search)
        .await
        .unwrap();

    assert_eq!(
        last_query(&mock_server).await,
        "page=1&size=100&limit=500&order_by=label&order=asc\
         &entity_domain=restaurants&search=coffee&min_score=0.6"
    );
}

#[tokio::test]
async fn test_iter_entities_uses_pages_count() {
    let mock_server = MockServer::start().await;

    for page in 1..=2 {
        Mock::given(method("GET"))
            .and(path("/api/v2/ontology/entities"))
            .and(query_param("page", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"carc_id": page}],
                "pages": 2,
                "entities": 0
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let mut pager = client_for(&mock_server)
        .ontology()
        .iter_ontology_entities(EntitySearch::default());

    let mut ids = Vec::new();
    while let Some(page) = pager.next_page().await {
        ids.push(page.unwrap()["data"][0]["carc_id"].clone());
    }

    assert_eq!(ids, vec![json!(1), json!(2)]);
    assert!(pager.is_exhausted());
}

#[tokio::test]
async fn test_entities_scalar_filter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/ontology/entities"))
        .and(query_param("core", "brand"))
        .and(query_param("domain", "airlines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let filter = EntityFilter {
        core: Some("brand".to_string()),
        domain: Some("airlines".to_string()),
        representation: None,
    };
    client_for(&mock_server)
        .ontology()
        .get_entities(&filter)
        .await
        .unwrap();

    assert_eq!(last_query(&mock_server).await, "core=brand&domain=airlines");
}

#[tokio::test]
async fn test_representation_and_entity_paths() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/ontology/representation/brand/restaurants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["carc_brand"])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/ontology/entity/101"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"carc_id": 101})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let ontology = client.ontology();
    assert_eq!(
        ontology.get_representation("brand", "restaurants").await.unwrap(),
        json!(["carc_brand"])
    );
    assert_eq!(ontology.get_entity_information(101).await.unwrap()["carc_id"], 101);
}

#[tokio::test]
async fn test_placeholders_are_unsupported_without_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let ontology = client.ontology();

    let domains = vec!["restaurants".to_string()];
    for result in [
        ontology.get_ontology_core_entities().await,
        ontology.get_ontology_domains(Some("brand")).await,
        ontology.get_ontology_framework(&[], &domains, &[]).await,
        ontology.get_ontology_hierarchies().await,
        ontology.get_ontology_relationships().await,
        ontology.get_entity_metadata().await,
    ] {
        match result {
            Err(CarbonArcError::Unsupported { version, .. }) => assert_eq!(version, "v2"),
            other => panic!("expected Unsupported, got {other:?}"),
        }
    }
}
