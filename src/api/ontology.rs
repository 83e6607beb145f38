//! Ontology API: core entities, domains, representations and entity search.

use async_trait::async_trait;
use serde_json::Value;

use crate::client::CarbonArcClient;
use crate::error::Result;
use crate::models::{EntityFilter, EntitySearch};
use crate::pagination::{PageFetcher, Paginator};
use crate::routes::{Endpoint, Query};

/// Client for the `ontology` product.
#[derive(Debug, Clone, Copy)]
pub struct OntologyClient<'a> {
    client: &'a CarbonArcClient,
}

impl<'a> OntologyClient<'a> {
    pub(crate) fn new(client: &'a CarbonArcClient) -> Self {
        Self { client }
    }

    /// Core entity kinds (brand, company, people, location).
    #[tracing::instrument(skip(self))]
    pub async fn get_core(&self) -> Result<Value> {
        self.client
            .get_endpoint(Endpoint::OntologyCore, &[], &Query::new())
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_domains(&self, core: Option<&str>) -> Result<Value> {
        let query = Query::new().opt("core", core);
        self.client
            .get_endpoint(Endpoint::OntologyDomains, &[], &query)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_representation(&self, core: &str, domain: &str) -> Result<Value> {
        self.client
            .get_endpoint(Endpoint::OntologyRepresentation, &[&core, &domain], &Query::new())
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_entities(&self, filter: &EntityFilter) -> Result<Value> {
        self.client
            .get_endpoint(Endpoint::OntologyEntities, &[], &filter.to_query())
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_entity_information(&self, entity_id: u64) -> Result<Value> {
        self.client
            .get_endpoint(Endpoint::OntologyEntity, &[&entity_id], &Query::new())
            .await
    }

    /// Representations available for the given entities and domains.
    /// Each list element becomes its own query parameter.
    #[tracing::instrument(skip(self))]
    pub async fn get_ontology_representations(
        &self,
        entity: &[String],
        domain: &[String],
    ) -> Result<Value> {
        let query = Query::new()
            .list("entity", entity)
            .list("entity_domain", domain);
        self.client
            .get_endpoint(Endpoint::OntologyEntityRepresentations, &[], &query)
            .await
    }

    /// One page of an entity search, at `search.page`.
    #[tracing::instrument(skip(self))]
    pub async fn get_ontology_entities(&self, search: &EntitySearch) -> Result<Value> {
        fetch_entities(self.client, search, search.page).await
    }

    /// Page through an entity search from `search.page` until `pages` runs out.
    pub fn iter_ontology_entities(&self, search: EntitySearch) -> Paginator<EntitySearchPages> {
        let start = search.page;
        Paginator::starting_at(
            EntitySearchPages {
                client: self.client.clone(),
                search,
            },
            start,
        )
    }

    /// Core entity types (brand, company, people, location). Not served by
    /// the current API version.
    pub async fn get_ontology_core_entities(&self) -> Result<Value> {
        self.client
            .get_endpoint(Endpoint::OntologyCoreEntities, &[], &Query::new())
            .await
    }

    /// Domain catalog, optionally filtered by core entity. Not served by the
    /// current API version.
    pub async fn get_ontology_domains(&self, entity: Option<&str>) -> Result<Value> {
        let query = Query::new().opt("entity", entity);
        self.client
            .get_endpoint(Endpoint::OntologyDomainCatalog, &[], &query)
            .await
    }

    /// Entity/domain/representation framework. Not served by the current API
    /// version.
    pub async fn get_ontology_framework(
        &self,
        entity: &[String],
        domain: &[String],
        representation: &[String],
    ) -> Result<Value> {
        let query = Query::new()
            .list("entity", entity)
            .list("domain", domain)
            .list("representation", representation);
        self.client
            .get_endpoint(Endpoint::OntologyFramework, &[], &query)
            .await
    }

    /// Not served by the current API version.
    pub async fn get_ontology_hierarchies(&self) -> Result<Value> {
        self.client
            .get_endpoint(Endpoint::OntologyHierarchies, &[], &Query::new())
            .await
    }

    /// Not served by the current API version.
    pub async fn get_ontology_relationships(&self) -> Result<Value> {
        self.client
            .get_endpoint(Endpoint::OntologyRelationships, &[], &Query::new())
            .await
    }

    /// Not served by the current API version.
    pub async fn get_entity_metadata(&self) -> Result<Value> {
        self.client
            .get_endpoint(Endpoint::OntologyEntityMetadata, &[], &Query::new())
            .await
    }
}

async fn fetch_entities(client: &CarbonArcClient, search: &EntitySearch, page: u32) -> Result<Value> {
    client
        .get_endpoint(Endpoint::OntologyEntities, &[], &search.to_query(page))
        .await
}

/// Pages of [`OntologyClient::get_ontology_entities`].
#[derive(Debug, Clone)]
pub struct EntitySearchPages {
    client: CarbonArcClient,
    search: EntitySearch,
}

#[async_trait]
impl PageFetcher for EntitySearchPages {
    async fn fetch_page(&self, page: u32) -> Result<Value> {
        fetch_entities(&self.client, &self.search, page).await
    }
}
