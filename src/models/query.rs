//! Query parameter sets for the sub-domain clients.

use serde::{Deserialize, Serialize};

use crate::error::{CarbonArcError, Result};
use crate::models::options::{Aggregation, DataType, Order};
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::routes::Query;
use crate::validation::validate_optional_date;

/// Page, size and shape of an insight data request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightDataOptions {
    pub page: u32,
    pub page_size: u32,
    pub data_type: DataType,
    pub aggregation: Aggregation,
}

impl Default for InsightDataOptions {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            data_type: DataType::default(),
            aggregation: Aggregation::default(),
        }
    }
}

impl InsightDataOptions {
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    #[must_use]
    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    pub(crate) fn to_query(self) -> Query {
        Query::new()
            .push("page", self.page)
            .push("size", self.page_size)
            .push("type", self.data_type)
            .push("aggregation", self.aggregation)
    }
}

/// Subject and/or topic filter for explorer searches. At least one is required.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubjectOrTopic {
    pub subject_id: Option<u64>,
    pub topic_id: Option<u64>,
}

impl SubjectOrTopic {
    pub fn subject(subject_id: u64) -> Self {
        Self {
            subject_id: Some(subject_id),
            topic_id: None,
        }
    }

    pub fn topic(topic_id: u64) -> Self {
        Self {
            subject_id: None,
            topic_id: Some(topic_id),
        }
    }

    pub(crate) fn to_query(self) -> Result<Query> {
        if self.subject_id.is_none() && self.topic_id.is_none() {
            return Err(CarbonArcError::MissingFilter(
                "at least one of subject_id or topic_id must be provided".to_string(),
            ));
        }
        Ok(Query::new()
            .opt("subjects", self.subject_id)
            .opt("topics", self.topic_id))
    }
}

/// Scalar ontology entity filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityFilter {
    pub core: Option<String>,
    pub domain: Option<String>,
    pub representation: Option<String>,
}

impl EntityFilter {
    pub(crate) fn to_query(&self) -> Query {
        Query::new()
            .opt("core", self.core.as_deref())
            .opt("domain", self.domain.as_deref())
            .opt("representation", self.representation.as_deref())
    }
}

/// Multi-valued ontology entity search.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySearch {
    pub entity: Vec<String>,
    pub domain: Vec<String>,
    pub representation: Vec<String>,
    /// Free-text search; sends `min_score` alongside.
    pub search: Option<String>,
    pub min_score: f64,
    pub page: u32,
    pub page_size: u32,
    pub order_by: String,
    pub order: Order,
    pub limit: u32,
}

impl Default for EntitySearch {
    fn default() -> Self {
        Self {
            entity: Vec::new(),
            domain: Vec::new(),
            representation: Vec::new(),
            search: None,
            min_score: 0.6,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            order_by: "label".to_string(),
            order: Order::Asc,
            limit: 500,
        }
    }
}

impl EntitySearch {
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    #[must_use]
    pub fn with_entities<S: Into<String>>(mut self, entity: impl IntoIterator<Item = S>) -> Self {
        self.entity = entity.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_domains<S: Into<String>>(mut self, domain: impl IntoIterator<Item = S>) -> Self {
        self.domain = domain.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_representations<S: Into<String>>(
        mut self,
        representation: impl IntoIterator<Item = S>,
    ) -> Self {
        self.representation = representation.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn to_query(&self, page: u32) -> Query {
        let query = Query::new()
            .push("page", page)
            .push("size", self.page_size)
            .push("limit", self.limit)
            .push("order_by", &self.order_by)
            .push("order", self.order)
            .list("entity", &self.entity)
            .list("entity_domain", &self.domain)
            .list("entity_representation", &self.representation);
        match &self.search {
            Some(search) => query.push("search", search).push("min_score", self.min_score),
            None => query,
        }
    }
}

/// Filter for data library version changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionChangesQuery {
    /// Library version, `latest` or e.g. `v1.2`.
    pub version: String,
    pub dataset_id: Option<String>,
    pub topic_id: Option<u64>,
    pub entity_representation: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub order: Option<Order>,
}

impl Default for VersionChangesQuery {
    fn default() -> Self {
        Self {
            version: "latest".to_string(),
            dataset_id: None,
            topic_id: None,
            entity_representation: None,
            page: None,
            size: None,
            order: None,
        }
    }
}

impl VersionChangesQuery {
    /// Pagination is all-or-nothing: once any of page, size or order is set
    /// the others default to 1, 100 and ascending.
    pub(crate) fn to_query(&self) -> Query {
        let paged = self.page.is_some() || self.size.is_some() || self.order.is_some();
        let (page, size, order) = if paged {
            (
                Some(self.page.unwrap_or(1)),
                Some(self.size.unwrap_or(DEFAULT_PAGE_SIZE)),
                Some(self.order.unwrap_or_default()),
            )
        } else {
            (None, None, None)
        };

        Query::new()
            .push("version", self.version.replace('v', ""))
            .opt("page", page)
            .opt("size", size)
            .opt("order", order)
            .opt("dataset_id", self.dataset_id.as_deref())
            .opt("topic_id", self.topic_id)
            .opt("entity_representation", self.entity_representation.as_deref())
    }
}

/// Date window for a dataset manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestQuery {
    /// `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`.
    pub created_since: Option<String>,
    /// `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`.
    pub updated_since: Option<String>,
}

impl ManifestQuery {
    /// Validates the dates, then renders the query.
    pub(crate) fn to_query(&self) -> Result<Query> {
        validate_optional_date(self.created_since.as_deref())?;
        validate_optional_date(self.updated_since.as_deref())?;
        Ok(Query::new()
            .opt("created_since", self.created_since.as_deref())
            .opt("updated_since", self.updated_since.as_deref()))
    }
}
