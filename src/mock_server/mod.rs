//! Mock Carbon Arc API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Carbon
//! Arc API for integration and end-to-end testing. Unlike wiremock which
//! mocks at the HTTP level per-test, this server maintains state across
//! requests, enabling realistic workflow testing.
//!
//! # Example
//!
//! ```ignore
//! use carbonarc::mock_server::MockServer;
//! use carbonarc::CarbonArcClient;
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = CarbonArcClient::new("test-token", server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let metadata = client.explorer().get_insight_metadata("CA0001").await.unwrap();
//!     assert_eq!(metadata["name"], "Card Spend");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::{MockDataset, MockEntity, MockFile, MockInsight, MockState};
