//! Carbon Arc API client.
//!
//! Top-level handle that owns the request manager and route builder and hands
//! out the sub-domain clients.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::api::{DataClient, ExplorerClient, HubClient, OntologyClient, PlatformClient};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::request::RequestManager;
use crate::routes::{Endpoint, Query, RouteTable, Routes, Segment};

/// Carbon Arc API client.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool, token and routes.
///
/// # Example
///
/// ```no_run
/// use carbonarc::CarbonArcClient;
///
/// # async fn example() -> carbonarc::Result<()> {
/// // Create from environment variables
/// let client = CarbonArcClient::from_env()?;
///
/// // Or configure manually
/// let client = CarbonArcClient::new("your-token", "https://platform.carbonarc.co")?;
/// let identifiers = client.explorer().get_insights_data_identifiers(1, 10).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CarbonArcClient {
    requests: RequestManager,
    routes: Arc<Routes>,
}

impl std::fmt::Debug for CarbonArcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarbonArcClient")
            .field("host", &self.routes.host())
            .field("version", &self.routes.version())
            .finish_non_exhaustive()
    }
}

impl CarbonArcClient {
    /// Create a client from environment variables.
    ///
    /// See [`ClientConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if `CARBONARC_API_TOKEN` is not set.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Create a client for `host` using API version `v2`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(token: &str, host: &str) -> Result<Self> {
        Self::with_config(ClientConfig::new(token).with_host(host))
    }

    /// Create a client from an explicit config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let requests = RequestManager::new(&config)?;
        let routes = Routes::new(&config.host, &config.version);
        Ok(Self {
            requests,
            routes: Arc::new(routes),
        })
    }

    /// Swap in a different route table, e.g. one with newly published endpoints.
    #[must_use]
    pub fn with_route_table(mut self, table: RouteTable) -> Self {
        let routes = (*self.routes).clone().with_table(table);
        self.routes = Arc::new(routes);
        self
    }

    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    /// The underlying request manager, for endpoints without a typed method.
    pub fn requests(&self) -> &RequestManager {
        &self.requests
    }

    /// Data library, graphs and bulk data.
    pub fn data(&self) -> DataClient<'_> {
        DataClient::new(self)
    }

    /// Insights, filters and frameworks.
    pub fn explorer(&self) -> ExplorerClient<'_> {
        ExplorerClient::new(self)
    }

    pub fn ontology(&self) -> OntologyClient<'_> {
        OntologyClient::new(self)
    }

    pub fn hub(&self) -> HubClient<'_> {
        HubClient::new(self)
    }

    pub fn platform(&self) -> PlatformClient<'_> {
        PlatformClient::new(self)
    }

    pub(crate) async fn get_endpoint(
        &self,
        endpoint: Endpoint,
        segments: &[Segment<'_>],
        query: &Query,
    ) -> Result<Value> {
        let url = self.routes.url_with_query(endpoint, segments, query)?;
        tracing::debug!(operation = endpoint.name(), %url, "GET");
        self.requests.get(&url).await
    }

    pub(crate) async fn post_endpoint<B: Serialize + ?Sized + Sync>(
        &self,
        endpoint: Endpoint,
        segments: &[Segment<'_>],
        query: &Query,
        body: &B,
    ) -> Result<Value> {
        let url = self.routes.url_with_query(endpoint, segments, query)?;
        tracing::debug!(operation = endpoint.name(), %url, "POST");
        self.requests.post(&url, body).await
    }
}
