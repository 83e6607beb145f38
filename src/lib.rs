//! Carbon Arc API client library.
//!
//! A Rust client for the Carbon Arc REST API. A single [`CarbonArcClient`]
//! holds the bearer token, the HTTP connection pool and a versioned route
//! table, and hands out one sub-client per API product.
//!
//! # Quick Start
//!
//! ```no_run
//! use carbonarc::{CarbonArcClient, InsightDataOptions};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> carbonarc::Result<()> {
//!     // Create client from environment variables
//!     let client = CarbonArcClient::from_env()?;
//!
//!     // Browse insight data identifiers
//!     let identifiers = client.explorer().get_insights_data_identifiers(1, 25).await?;
//!     println!("{identifiers:#}");
//!
//!     // Fetch every page of an insight as tables
//!     let payload = json!({"filters": {"location_resolution": "us"}});
//!     let mut pages = client
//!         .explorer()
//!         .iter_insight_data_tables("CA0001", payload, InsightDataOptions::default());
//!     while let Some(table) = pages.next_table().await {
//!         println!("{}", table?);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`Routes`] renders every URL from the configured host and API version
//!   through a [`RouteTable`]. Endpoints not in the table fail with
//!   [`CarbonArcError::Unsupported`].
//! - [`RequestManager`] performs one HTTP exchange per call and classifies
//!   non-success statuses into typed errors.
//! - [`Paginator`] walks `page`/`size` endpoints until the reported `pages`
//!   count is passed.
//! - [`Table`] flattens page responses into rows.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `CARBONARC_API_TOKEN` (required) - Your API token
//! - `CARBONARC_HOST` (optional) - Base URL (defaults to `https://platform.carbonarc.co`)
//! - `CARBONARC_API_VERSION` (optional) - API version (defaults to `v2`)

mod api;
mod client;
mod config;
mod download;
mod error;
mod models;
mod pagination;
mod request;
mod routes;
mod table;
mod validation;

pub mod cli;
pub mod output;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::CarbonArcClient;
pub use config::{ClientConfig, DEFAULT_HOST, DEFAULT_VERSION};
pub use error::{CarbonArcError, Result};
pub use request::RequestManager;

// Sub-domain clients and their page fetchers
pub use api::{
    DataClient, DataIdentifierPages, EntitySearchPages, ExplorerClient, FrameworkDataPages,
    HubClient, InsightDataPages, OntologyClient, PlatformClient, WebContentPages,
};

// Routing
pub use routes::{append_query, Endpoint, Product, Query, Route, RouteTable, Routes, Segment};

// Pagination and tables
pub use pagination::{PageFetcher, Paginator, TablePages, DEFAULT_PAGE_SIZE};
pub use table::{flatten_dataframe, flatten_timeseries, Table};

// Downloads and validation
pub use download::{
    download_to_directory, filename_from_content_disposition, DownloadOptions, DEFAULT_CHUNK_SIZE,
};
pub use validation::{validate_date, validate_optional_date};

// Re-export models
pub use models::{
    // Options
    Aggregation,
    DataType,
    GraphDownloadType,
    Order,
    // Frameworks
    Framework,
    FrameworkPayload,
    // Query parameter sets
    EntityFilter,
    EntitySearch,
    InsightDataOptions,
    ManifestQuery,
    SubjectOrTopic,
    VersionChangesQuery,
};
