//! Data library endpoint handlers.

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use super::{not_found, SharedState};

/// GET /api/v2/library/data
pub async fn list_datasets(state: SharedState) -> impl IntoResponse {
    let state = state.0.read().await;
    let datasets: Vec<Value> = state
        .datasets
        .values()
        .map(|d| json!({"dataset_id": d.dataset_id, "name": d.name}))
        .collect();
    Json(json!({"datasets": datasets}))
}

/// GET /api/v2/library/data/{id}
pub async fn get_dataset(state: SharedState, Path(id): Path<String>) -> Response {
    let state = state.0.read().await;
    match state.get_dataset(&id) {
        Some(d) => Json(json!({
            "dataset_id": d.dataset_id,
            "name": d.name,
            "file_count": d.files.len(),
        }))
        .into_response(),
        None => not_found("dataset", &id),
    }
}

/// GET /api/v2/library/data/{id}/data-dictionary
pub async fn get_data_dictionary(state: SharedState, Path(id): Path<String>) -> Response {
    let state = state.0.read().await;
    match state.get_dataset(&id) {
        Some(d) => Json(d.dictionary.clone()).into_response(),
        None => not_found("dataset", &id),
    }
}

/// GET /api/v2/library/data/{id}/manifest
pub async fn get_manifest(state: SharedState, Path(id): Path<String>) -> Response {
    let state = state.0.read().await;
    match state.get_dataset(&id) {
        Some(d) => {
            let files: Vec<Value> = d
                .files
                .iter()
                .map(|f| json!({"file_id": f.file_id, "filename": f.filename, "size": f.content.len()}))
                .collect();
            Json(json!({"dataset_id": d.dataset_id, "files": files})).into_response()
        }
        None => not_found("dataset", &id),
    }
}

/// GET /api/v2/library/data/files/{file_id}
pub async fn download_file(state: SharedState, Path(file_id): Path<String>) -> Response {
    let state = state.0.read().await;
    match state.get_file(&file_id) {
        Some(file) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "application/octet-stream".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", file.filename),
                ),
            ],
            file.content.clone(),
        )
            .into_response(),
        None => not_found("file", &file_id),
    }
}
