//! Ontology endpoint handlers.

use axum::{extract::Query, response::IntoResponse, Json};
use serde_json::{json, Value};

use super::{page_response, paginate, SharedState};

/// Repeated query keys (`entity=a&entity=b`) need the raw pair list.
type Pairs = Vec<(String, String)>;

fn values(pairs: &Pairs, key: &str) -> Vec<String> {
    pairs
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
        .collect()
}

fn first<T: std::str::FromStr>(pairs: &Pairs, key: &str) -> Option<T> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .and_then(|(_, v)| v.parse().ok())
}

/// GET /api/v2/ontology/entities
pub async fn search_entities(state: SharedState, Query(pairs): Query<Pairs>) -> impl IntoResponse {
    let state = state.0.read().await;
    let search: Option<String> = first(&pairs, "search");
    let found = state.search_entities(
        &values(&pairs, "entity"),
        &values(&pairs, "entity_domain"),
        &values(&pairs, "entity_representation"),
        search.as_deref(),
    );

    let page = first(&pairs, "page").unwrap_or(1);
    let size = first(&pairs, "size").unwrap_or(100);
    let total = found.len();
    let (slice, pages) = paginate(&found, page, size);
    let data: Vec<Value> = slice
        .into_iter()
        .map(|e| serde_json::to_value(e).unwrap_or(Value::Null))
        .collect();
    Json(page_response(Value::Array(data), page, pages, total))
}

/// GET /api/v2/ontology/entity-representations
pub async fn list_representations(
    state: SharedState,
    Query(pairs): Query<Pairs>,
) -> impl IntoResponse {
    let state = state.0.read().await;
    let found = state.search_entities(
        &values(&pairs, "entity"),
        &values(&pairs, "entity_domain"),
        &[],
        None,
    );
    let mut representations: Vec<&str> = found
        .iter()
        .map(|e| e.entity_representation.as_str())
        .collect();
    representations.sort_unstable();
    representations.dedup();
    Json(json!({"representations": representations}))
}
