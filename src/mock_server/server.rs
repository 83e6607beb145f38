//! Mock Carbon Arc API server.
//!
//! Provides an axum-based HTTP server that simulates the Carbon Arc API.

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::Fixtures;
use super::handlers;
use super::state::MockState;

/// A mock Carbon Arc API server for testing.
///
/// The server runs in the background and can be used to test the client
/// against a realistic API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Fixtures::default_scenario()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL as the host when creating a `CarbonArcClient`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Number of requests received whose path starts with `prefix`.
    pub async fn request_count(&self, prefix: &str) -> usize {
        self.state.read().await.request_count(prefix)
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the axum router with all routes.
    pub(crate) fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Explorer
            .route(
                "/api/v2/explorer/data/data-identifiers",
                get(handlers::list_data_identifiers),
            )
            .route(
                "/api/v2/explorer/insights/:id",
                get(handlers::get_insight_information).post(handlers::post_insight_data),
            )
            .route(
                "/api/v2/explorer/insights/:id/metadata",
                get(handlers::get_insight_metadata),
            )
            .route(
                "/api/v2/explorer/insights/:id/filters",
                get(handlers::get_insight_filters),
            )
            // Data library
            .route("/api/v2/library/data", get(handlers::list_datasets))
            .route(
                "/api/v2/library/data/files/:file_id",
                get(handlers::download_file),
            )
            .route("/api/v2/library/data/:id", get(handlers::get_dataset))
            .route(
                "/api/v2/library/data/:id/data-dictionary",
                get(handlers::get_data_dictionary),
            )
            .route("/api/v2/library/data/:id/manifest", get(handlers::get_manifest))
            // Ontology
            .route("/api/v2/ontology/entities", get(handlers::search_entities))
            .route(
                "/api/v2/ontology/entity-representations",
                get(handlers::list_representations),
            )
            // Applies to the API routes above, not to the health check
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                handlers::authorize,
            ))
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::CarbonArcClient;

    #[tokio::test]
    async fn test_router_health_without_binding() {
        let router = MockServer::create_router(MockState::new().shared());
        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_router_rejects_missing_token() {
        let state = MockState::new().with_required_token("secret").shared();
        let router = MockServer::create_router(state.clone());
        let response = router
            .oneshot(
                Request::get("/api/v2/library/data")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(state.read().await.requests, vec!["/api/v2/library/data"]);
    }

    #[tokio::test]
    async fn test_server_starts_and_responds() {
        let server = MockServer::start().await;

        // Server should be accessible
        let client = reqwest::Client::new();
        let response = client
            .get(format!("{}/health", server.url()))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "ok");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_insight_metadata_with_client() {
        let server = MockServer::start().await;
        let client = CarbonArcClient::new("test-token", server.url()).unwrap();

        let metadata = client
            .explorer()
            .get_insight_metadata("CA0001")
            .await
            .expect("Failed to get metadata");

        assert_eq!(metadata["name"], "Card Spend");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_empty_server() {
        let server = MockServer::start_empty().await;
        let client = CarbonArcClient::new("test-token", server.url()).unwrap();

        let result = client.data().get_dataset_information("nonexistent").await;

        assert!(matches!(result, Err(crate::CarbonArcError::NotFound { .. })));

        server.shutdown().await;
    }
}
