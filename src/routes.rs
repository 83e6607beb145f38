//! URL construction for the Carbon Arc API.
//!
//! Every URL is `{host}/api/{version}/{product}{path}`. Paths come from a
//! [`RouteTable`] that maps each logical [`Endpoint`] to a product and a path
//! template, so a new API version is a new table rather than a new client.
//! Route building is pure: nothing here touches the network.

use std::collections::HashMap;
use std::fmt::{self, Display};

use crate::error::{CarbonArcError, Result};

/// API product families, the first path segment after the version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Product {
    EntityExplorer,
    Data,
    Ontology,
    Public,
    OpenSource,
    Library,
    Hub,
    WebContent,
    Platform,
    Explorer,
}

impl Product {
    /// Path segment used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EntityExplorer => "entity_explorer",
            Self::Data => "data",
            Self::Ontology => "ontology",
            Self::Public => "public",
            Self::OpenSource => "opensource",
            Self::Library => "library",
            Self::Hub => "hub",
            Self::WebContent => "webcontent",
            Self::Platform => "platform",
            Self::Explorer => "explorer",
        }
    }
}

impl Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical operations exposed by the sub-domain clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    // Data library
    Datasets,
    DatasetInformation,
    DataDictionary,
    DataManifest,
    FileDownload,
    Graphs,
    GraphInformation,
    GraphData,
    LibraryVersionChanges,
    BulkDataIdentifiers,
    BulkDataMetadata,
    BulkDataSample,
    BulkDataManifest,
    GraphDataIdentifiers,
    // Explorer
    InsightDataIdentifiers,
    InsightMetadata,
    InsightInformation,
    InsightFilters,
    InsightFilterValues,
    InsightData,
    InsightsBySubjectOrTopic,
    EntitiesBySubjectOrTopic,
    InsightsForEntity,
    EntitiesForInsight,
    FrameworkCollect,
    FrameworkBuy,
    FrameworkData,
    FrameworkMetadata,
    // Ontology
    OntologyCore,
    OntologyDomains,
    OntologyRepresentation,
    OntologyEntities,
    OntologyEntity,
    OntologyEntityRepresentations,
    OntologyCoreEntities,
    OntologyDomainCatalog,
    OntologyFramework,
    OntologyHierarchies,
    OntologyRelationships,
    OntologyEntityMetadata,
    // Hub
    HubSubscriptions,
    HubWebcontentFeeds,
    HubSubscribedFeeds,
    HubWebcontentData,
    // Platform
    PlatformWalletBalance,
    PlatformOrderHistory,
    PlatformWorkbooks,
}

impl Endpoint {
    /// Operation name used in error messages and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Datasets => "get_datasets",
            Self::DatasetInformation => "get_dataset_information",
            Self::DataDictionary => "get_data_dictionary",
            Self::DataManifest => "get_data_manifest",
            Self::FileDownload => "download_file",
            Self::Graphs => "get_graphs",
            Self::GraphInformation => "get_graph_information",
            Self::GraphData => "get_graph_data",
            Self::LibraryVersionChanges => "get_library_version_changes",
            Self::BulkDataIdentifiers => "get_bulk_data_identifiers",
            Self::BulkDataMetadata => "get_bulk_data_metadata",
            Self::BulkDataSample => "get_bulk_data_sample",
            Self::BulkDataManifest => "get_bulk_data_manifest",
            Self::GraphDataIdentifiers => "get_graph_data_identifiers",
            Self::InsightDataIdentifiers => "get_insights_data_identifiers",
            Self::InsightMetadata => "get_insight_metadata",
            Self::InsightInformation => "get_insight_information",
            Self::InsightFilters => "get_insight_filters",
            Self::InsightFilterValues => "get_insight_filter_values",
            Self::InsightData => "get_insight_data",
            Self::InsightsBySubjectOrTopic => "get_insights_from_subject_or_topic",
            Self::EntitiesBySubjectOrTopic => "get_entities_from_subject_or_topic",
            Self::InsightsForEntity => "get_insights_from_entity",
            Self::EntitiesForInsight => "get_entities_from_insight",
            Self::FrameworkCollect => "collect_framework_information",
            Self::FrameworkBuy => "buy_framework",
            Self::FrameworkData => "get_framework_data",
            Self::FrameworkMetadata => "get_framework_metadata",
            Self::OntologyCore => "get_core",
            Self::OntologyDomains => "get_domains",
            Self::OntologyRepresentation => "get_representation",
            Self::OntologyEntities => "get_ontology_entities",
            Self::OntologyEntity => "get_entity_information",
            Self::OntologyEntityRepresentations => "get_ontology_representations",
            Self::OntologyCoreEntities => "get_ontology_core_entities",
            Self::OntologyDomainCatalog => "get_ontology_domains",
            Self::OntologyFramework => "get_ontology_framework",
            Self::OntologyHierarchies => "get_ontology_hierarchies",
            Self::OntologyRelationships => "get_ontology_relationships",
            Self::OntologyEntityMetadata => "get_entity_metadata",
            Self::HubSubscriptions => "get_subscriptions",
            Self::HubWebcontentFeeds => "get_webcontent_feeds",
            Self::HubSubscribedFeeds => "get_subscribed_feeds",
            Self::HubWebcontentData => "get_webcontent_data",
            Self::PlatformWalletBalance => "get_wallet_balance",
            Self::PlatformOrderHistory => "get_order_history",
            Self::PlatformWorkbooks => "get_workbooks",
        }
    }
}

/// A path segment value filled into a route template.
pub type Segment<'a> = &'a (dyn Display + Sync);

/// A product plus a path template. `{}` marks a path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub product: Product,
    pub template: String,
}

impl Route {
    pub fn new(product: Product, template: impl Into<String>) -> Self {
        Self {
            product,
            template: template.into(),
        }
    }
}

/// Mapping from logical endpoint to route for one API version.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: HashMap<Endpoint, Route>,
}

impl RouteTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes served by API version 2.
    ///
    /// Hub subscriptions and web content, the platform billing endpoints and
    /// the ontology catalog endpoints are not published yet and are left out.
    pub fn v2() -> Self {
        use Endpoint::*;
        use Product::*;

        let entries: [(Endpoint, Product, &str); 34] = [
            (Datasets, Library, "/data"),
            (DatasetInformation, Library, "/data/{}"),
            (DataDictionary, Library, "/data/{}/data-dictionary"),
            (DataManifest, Library, "/data/{}/manifest"),
            (FileDownload, Library, "/data/files/{}"),
            (Graphs, Library, "/graph"),
            (GraphInformation, Library, "/graph/{}"),
            (GraphData, Library, "/graph/{}/data"),
            (LibraryVersionChanges, Library, "/data-library/version-changes"),
            (BulkDataIdentifiers, EntityExplorer, "/alldata/data-identifiers"),
            (BulkDataMetadata, EntityExplorer, "/alldata/{}/metadata"),
            (BulkDataSample, Data, "/alldata/{}/sample"),
            (BulkDataManifest, Data, "/alldata/{}/manifest"),
            (GraphDataIdentifiers, EntityExplorer, "/graphdata/data-identifiers"),
            (InsightDataIdentifiers, Explorer, "/data/data-identifiers"),
            (InsightMetadata, Explorer, "/insights/{}/metadata"),
            (InsightInformation, Explorer, "/insights/{}"),
            (InsightFilters, Explorer, "/insights/{}/filters"),
            (InsightFilterValues, Explorer, "/insights/{}/filters/{}"),
            (InsightData, Explorer, "/insights/{}"),
            (InsightsBySubjectOrTopic, Explorer, "/insights"),
            (EntitiesBySubjectOrTopic, Explorer, "/entities"),
            (InsightsForEntity, Explorer, "/insights/entity/{}"),
            (EntitiesForInsight, Explorer, "/insights/{}/entities"),
            (FrameworkCollect, Explorer, "/framework/metadata"),
            (FrameworkBuy, Explorer, "/framework/buy"),
            (FrameworkData, Explorer, "/frameworks/{}/data"),
            (FrameworkMetadata, Explorer, "/frameworks/{}/metadata"),
            (OntologyCore, Ontology, "/core"),
            (OntologyDomains, Ontology, "/domains"),
            (OntologyRepresentation, Ontology, "/representation/{}/{}"),
            (OntologyEntities, Ontology, "/entities"),
            (OntologyEntity, Ontology, "/entity/{}"),
            (OntologyEntityRepresentations, Ontology, "/entity-representations"),
        ];

        let mut table = Self::new();
        for (endpoint, product, template) in entries {
            table = table.register(endpoint, Route::new(product, template));
        }
        table
    }

    /// Add or replace the route for `endpoint`.
    pub fn register(mut self, endpoint: Endpoint, route: Route) -> Self {
        self.routes.insert(endpoint, route);
        self
    }

    pub fn get(&self, endpoint: Endpoint) -> Option<&Route> {
        self.routes.get(&endpoint)
    }

    pub fn contains(&self, endpoint: Endpoint) -> bool {
        self.routes.contains_key(&endpoint)
    }
}

/// Ordered query parameters.
///
/// Keys may repeat; list-valued parameters produce one pair per element.
/// Values are percent-encoded when rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key=value`.
    pub fn push(mut self, key: &str, value: impl Display) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Append `key=value` only when `value` is present.
    pub fn opt<V: Display>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.push(key, v),
            None => self,
        }
    }

    /// Append `key=value` once per element, preserving order.
    pub fn list<V: Display>(self, key: &str, values: &[V]) -> Self {
        values.iter().fold(self, |q, v| q.push(key, v))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Render as `k=v&k=v` without a leading `?`.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Append `query` to `url`, normalizing the separator.
///
/// A `?&` left by conditional assembly becomes `?`, and a dangling `?` or `&`
/// is dropped.
pub fn append_query(url: &str, query: &Query) -> String {
    let mut out = url.to_string();
    if !query.is_empty() {
        out.push(if url.contains('?') { '&' } else { '?' });
        out.push_str(&query.to_query_string());
    }
    normalize_query_separator(&out)
}

fn normalize_query_separator(url: &str) -> String {
    let mut out = url.replace("?&", "?");
    while out.ends_with('?') || out.ends_with('&') {
        out.pop();
    }
    out
}

/// URL builder bound to one host and API version.
#[derive(Debug, Clone)]
pub struct Routes {
    host: String,
    version: String,
    table: RouteTable,
}

impl Routes {
    /// Routes for `host` and `version` using the v2 route table.
    pub fn new(host: &str, version: &str) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            version: version.to_string(),
            table: RouteTable::v2(),
        }
    }

    /// Replace the route table.
    pub fn with_table(mut self, table: RouteTable) -> Self {
        self.table = table;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// `{host}/api/{version}/{product}`
    pub fn product_url(&self, product: Product) -> String {
        format!("{}/api/{}/{}", self.host, self.version, product)
    }

    /// Resolve `endpoint`, filling `{}` placeholders from `segments` in order.
    ///
    /// Segments are inserted literally; callers pass URL-safe identifiers.
    ///
    /// # Errors
    ///
    /// [`CarbonArcError::Unsupported`] if the table has no route for the
    /// endpoint, [`CarbonArcError::InvalidPayload`] on a segment count mismatch.
    pub fn url(&self, endpoint: Endpoint, segments: &[Segment<'_>]) -> Result<String> {
        let route = self
            .table
            .get(endpoint)
            .ok_or_else(|| CarbonArcError::Unsupported {
                operation: endpoint.name(),
                version: self.version.clone(),
            })?;

        let placeholders = route.template.matches("{}").count();
        if placeholders != segments.len() {
            return Err(CarbonArcError::InvalidPayload(format!(
                "{} expects {} path segment(s), got {}",
                endpoint.name(),
                placeholders,
                segments.len()
            )));
        }

        let mut path = String::with_capacity(route.template.len());
        let mut parts = route.template.split("{}");
        if let Some(first) = parts.next() {
            path.push_str(first);
        }
        for (segment, rest) in segments.iter().zip(parts) {
            path.push_str(&segment.to_string());
            path.push_str(rest);
        }

        Ok(format!("{}{}", self.product_url(route.product), path))
    }

    /// [`Routes::url`] followed by [`append_query`].
    pub fn url_with_query(
        &self,
        endpoint: Endpoint,
        segments: &[Segment<'_>],
        query: &Query,
    ) -> Result<String> {
        Ok(append_query(&self.url(endpoint, segments)?, query))
    }
}
