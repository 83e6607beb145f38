//! Explorer endpoint handlers.

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{not_found, page_response, paginate, SharedState};
use crate::mock_server::fixtures::Fixtures;

/// Query parameters for paginated listings.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

/// Query parameters for insight data.
#[derive(Debug, Default, Deserialize)]
pub struct InsightDataQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    #[serde(rename = "type")]
    pub data_type: Option<String>,
    #[allow(dead_code)] // Accepted for parity; the mock does not aggregate
    pub aggregation: Option<String>,
}

/// GET /api/v2/explorer/data/data-identifiers
pub async fn list_data_identifiers(
    state: SharedState,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    let state = state.0.read().await;
    let page = query.page.unwrap_or(1);
    let summaries: Vec<Value> = state.insights.values().map(Fixtures::insight_summary).collect();
    let total = summaries.len();
    let (data, pages) = paginate(&summaries, page, query.size.unwrap_or(100));
    Json(page_response(Value::Array(data), page, pages, total))
}

/// GET /api/v2/explorer/insights/{id}
pub async fn get_insight_information(state: SharedState, Path(id): Path<String>) -> Response {
    let state = state.0.read().await;
    match state.get_insight(&id) {
        Some(insight) => Json(Fixtures::insight_summary(insight)).into_response(),
        None => not_found("insight", &id),
    }
}

/// GET /api/v2/explorer/insights/{id}/metadata
pub async fn get_insight_metadata(state: SharedState, Path(id): Path<String>) -> Response {
    let state = state.0.read().await;
    match state.get_insight(&id) {
        Some(insight) => Json(insight.metadata.clone()).into_response(),
        None => not_found("insight", &id),
    }
}

/// GET /api/v2/explorer/insights/{id}/filters
pub async fn get_insight_filters(state: SharedState, Path(id): Path<String>) -> Response {
    let state = state.0.read().await;
    match state.get_insight(&id) {
        Some(insight) => Json(insight.filters.clone()).into_response(),
        None => not_found("insight", &id),
    }
}

/// POST /api/v2/explorer/insights/{id}
///
/// Dataframe responses return the records as-is. Timeseries responses group
/// the page's records by `entity`.
pub async fn post_insight_data(
    state: SharedState,
    Path(id): Path<String>,
    Query(query): Query<InsightDataQuery>,
    Json(payload): Json<Value>,
) -> Response {
    if !payload.is_object() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"detail": "payload must be an object"})),
        )
            .into_response();
    }

    let state = state.0.read().await;
    let Some(insight) = state.get_insight(&id) else {
        return not_found("insight", &id);
    };

    let page = query.page.unwrap_or(1);
    let (records, pages) = paginate(&insight.records, page, query.size.unwrap_or(100));
    let data = match query.data_type.as_deref() {
        Some("timeseries") => group_by_entity(records),
        _ => Value::Array(records),
    };
    Json(page_response(data, page, pages, insight.records.len())).into_response()
}

fn group_by_entity(records: Vec<Value>) -> Value {
    let mut blocks: Vec<(Value, Vec<Value>)> = Vec::new();
    for record in records {
        let Value::Object(mut fields) = record else {
            continue;
        };
        let entity = fields.shift_remove("entity").unwrap_or(Value::Null);
        match blocks.iter_mut().find(|(e, _)| *e == entity) {
            Some((_, rows)) => rows.push(Value::Object(fields)),
            None => blocks.push((entity, vec![Value::Object(fields)])),
        }
    }
    Value::Array(
        blocks
            .into_iter()
            .map(|(entity, rows)| {
                let mut block = Map::new();
                block.insert("entity".to_string(), entity);
                block.insert("data".to_string(), Value::Array(rows));
                Value::Object(block)
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_entity_keeps_first_seen_order() {
        let grouped = group_by_entity(vec![
            json!({"entity": "B", "v": 1}),
            json!({"entity": "A", "v": 2}),
            json!({"entity": "B", "v": 3}),
        ]);
        assert_eq!(
            grouped,
            json!([
                {"entity": "B", "data": [{"v": 1}, {"v": 3}]},
                {"entity": "A", "data": [{"v": 2}]},
            ])
        );
    }
}
