//! HTTP request handlers for the mock server.

pub mod explorer;
pub mod library;
pub mod ontology;

pub use explorer::*;
pub use library::*;
pub use ontology::*;

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;

pub type SharedState = State<Arc<RwLock<MockState>>>;

/// Records every request and enforces `required_token` when set.
pub async fn authorize(State(state): SharedState, request: Request, next: Next) -> Response {
    let target = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_default();

    let required = {
        let mut state = state.write().await;
        state.requests.push(target);
        state.required_token.clone()
    };

    if let Some(token) = required {
        let expected = format!("Bearer {token}");
        let presented = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        if presented != Some(expected.as_str()) {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"detail": "Invalid authentication credentials"})),
            )
                .into_response();
        }
    }

    next.run(request).await
}

/// 1-indexed slice of `items` plus the page count.
pub(crate) fn paginate<T: Clone>(items: &[T], page: u32, size: u32) -> (Vec<T>, u64) {
    let size = size.max(1) as usize;
    let pages = items.len().div_ceil(size) as u64;
    let start = (page.max(1) as usize - 1) * size;
    let slice = items.iter().skip(start).take(size).cloned().collect();
    (slice, pages)
}

/// Standard page envelope.
pub(crate) fn page_response(data: Value, page: u32, pages: u64, total: usize) -> Value {
    json!({"data": data, "page": page, "pages": pages, "total": total})
}

pub(crate) fn not_found(what: &str, id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"detail": format!("{what} not found: {id}")})),
    )
        .into_response()
}
