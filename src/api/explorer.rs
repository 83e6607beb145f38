//! Explorer API: insights, their filters and data, and frameworks.

use async_trait::async_trait;
use serde_json::Value;

use crate::client::CarbonArcClient;
use crate::error::Result;
use crate::models::{DataType, FrameworkPayload, InsightDataOptions, SubjectOrTopic};
use crate::pagination::{PageFetcher, Paginator, TablePages};
use crate::routes::{Endpoint, Query};
use crate::table::{flatten_dataframe, flatten_timeseries, Table};

/// Client for the `explorer` product.
#[derive(Debug, Clone, Copy)]
pub struct ExplorerClient<'a> {
    client: &'a CarbonArcClient,
}

impl<'a> ExplorerClient<'a> {
    pub(crate) fn new(client: &'a CarbonArcClient) -> Self {
        Self { client }
    }

    /// One page of insight data identifiers.
    #[tracing::instrument(skip(self))]
    pub async fn get_insights_data_identifiers(&self, page: u32, page_size: u32) -> Result<Value> {
        fetch_data_identifiers(self.client, page, page_size).await
    }

    /// Every page of insight data identifiers.
    pub fn iter_insights_data_identifiers(&self, page_size: u32) -> Paginator<DataIdentifierPages> {
        Paginator::new(DataIdentifierPages {
            client: self.client.clone(),
            page_size,
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_insight_metadata(&self, data_identifier: &str) -> Result<Value> {
        self.client
            .get_endpoint(Endpoint::InsightMetadata, &[&data_identifier], &Query::new())
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_insight_information(&self, insight_id: &str) -> Result<Value> {
        self.client
            .get_endpoint(Endpoint::InsightInformation, &[&insight_id], &Query::new())
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_insight_filters(&self, data_identifier: &str) -> Result<Value> {
        self.client
            .get_endpoint(Endpoint::InsightFilters, &[&data_identifier], &Query::new())
            .await
    }

    /// Values accepted by one filter of an insight.
    #[tracing::instrument(skip(self))]
    pub async fn get_insight_filter_values(
        &self,
        data_identifier: &str,
        filter_key: &str,
    ) -> Result<Value> {
        self.client
            .get_endpoint(
                Endpoint::InsightFilterValues,
                &[&data_identifier, &filter_key],
                &Query::new(),
            )
            .await
    }

    /// Query insight data. `payload` carries the filter selection.
    #[tracing::instrument(skip(self, payload))]
    pub async fn get_insight_data(
        &self,
        data_identifier: &str,
        payload: &Value,
        options: InsightDataOptions,
    ) -> Result<Value> {
        fetch_insight_data(self.client, data_identifier, payload, options).await
    }

    /// Page through insight data, starting at page 1. `options.page` is
    /// replaced on every request.
    pub fn iter_insight_data(
        &self,
        data_identifier: &str,
        payload: Value,
        options: InsightDataOptions,
    ) -> Paginator<InsightDataPages> {
        Paginator::new(InsightDataPages {
            client: self.client.clone(),
            data_identifier: data_identifier.to_string(),
            payload,
            options,
        })
    }

    /// One page of insight data as a table.
    ///
    /// Timeseries responses are flattened with an `entity` column.
    pub async fn get_insight_data_table(
        &self,
        data_identifier: &str,
        payload: &Value,
        options: InsightDataOptions,
    ) -> Result<Table> {
        let response = self
            .get_insight_data(data_identifier, payload, options)
            .await?;
        flattener(options.data_type)(&response)
    }

    /// Page through insight data as tables.
    pub fn iter_insight_data_tables(
        &self,
        data_identifier: &str,
        payload: Value,
        options: InsightDataOptions,
    ) -> TablePages<InsightDataPages> {
        self.iter_insight_data(data_identifier, payload, options)
            .tables(flattener(options.data_type))
    }

    /// Insights tagged with a subject and/or topic.
    ///
    /// # Errors
    ///
    /// [`CarbonArcError::MissingFilter`](crate::CarbonArcError::MissingFilter)
    /// if neither is given; no request is made.
    #[tracing::instrument(skip(self))]
    pub async fn get_insights_from_subject_or_topic(&self, filter: SubjectOrTopic) -> Result<Value> {
        let query = filter.to_query()?;
        self.client
            .get_endpoint(Endpoint::InsightsBySubjectOrTopic, &[], &query)
            .await
    }

    /// Entities tagged with a subject and/or topic.
    #[tracing::instrument(skip(self))]
    pub async fn get_entities_from_subject_or_topic(&self, filter: SubjectOrTopic) -> Result<Value> {
        let query = filter.to_query()?;
        self.client
            .get_endpoint(Endpoint::EntitiesBySubjectOrTopic, &[], &query)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_insights_from_entity(&self, entity_id: u64) -> Result<Value> {
        self.client
            .get_endpoint(Endpoint::InsightsForEntity, &[&entity_id], &Query::new())
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_entities_from_insight(&self, insight_id: u64) -> Result<Value> {
        self.client
            .get_endpoint(Endpoint::EntitiesForInsight, &[&insight_id], &Query::new())
            .await
    }

    /// Price and coverage for one or more framework selections.
    #[tracing::instrument(skip(self, frameworks))]
    pub async fn collect_framework_information(
        &self,
        frameworks: impl Into<FrameworkPayload>,
    ) -> Result<Value> {
        let payload = frameworks.into();
        self.client
            .post_endpoint(Endpoint::FrameworkCollect, &[], &Query::new(), &payload)
            .await
    }

    /// Purchase one or more framework selections.
    #[tracing::instrument(skip(self, frameworks))]
    pub async fn buy_framework(&self, frameworks: impl Into<FrameworkPayload>) -> Result<Value> {
        let payload = frameworks.into();
        self.client
            .post_endpoint(Endpoint::FrameworkBuy, &[], &Query::new(), &payload)
            .await
    }

    /// One page of a purchased framework's data.
    #[tracing::instrument(skip(self))]
    pub async fn get_framework_data(
        &self,
        framework_hash: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Value> {
        fetch_framework_data(self.client, framework_hash, page, page_size).await
    }

    pub fn iter_framework_data(
        &self,
        framework_hash: &str,
        page_size: u32,
    ) -> Paginator<FrameworkDataPages> {
        Paginator::new(FrameworkDataPages {
            client: self.client.clone(),
            framework_hash: framework_hash.to_string(),
            page_size,
        })
    }

    /// One page of framework data as a table.
    pub async fn get_framework_table(
        &self,
        framework_hash: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Table> {
        let response = self
            .get_framework_data(framework_hash, page, page_size)
            .await?;
        flatten_dataframe(&response)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_framework_metadata(&self, framework_hash: &str) -> Result<Value> {
        self.client
            .get_endpoint(Endpoint::FrameworkMetadata, &[&framework_hash], &Query::new())
            .await
    }
}

fn flattener(data_type: DataType) -> fn(&Value) -> Result<Table> {
    match data_type {
        DataType::Dataframe => flatten_dataframe,
        DataType::Timeseries => flatten_timeseries,
    }
}

async fn fetch_data_identifiers(
    client: &CarbonArcClient,
    page: u32,
    page_size: u32,
) -> Result<Value> {
    let query = Query::new().push("page", page).push("size", page_size);
    client
        .get_endpoint(Endpoint::InsightDataIdentifiers, &[], &query)
        .await
}

async fn fetch_insight_data(
    client: &CarbonArcClient,
    data_identifier: &str,
    payload: &Value,
    options: InsightDataOptions,
) -> Result<Value> {
    client
        .post_endpoint(
            Endpoint::InsightData,
            &[&data_identifier],
            &options.to_query(),
            payload,
        )
        .await
}

async fn fetch_framework_data(
    client: &CarbonArcClient,
    framework_hash: &str,
    page: u32,
    page_size: u32,
) -> Result<Value> {
    let query = Query::new().push("page", page).push("size", page_size);
    client
        .get_endpoint(Endpoint::FrameworkData, &[&framework_hash], &query)
        .await
}

/// Pages of [`ExplorerClient::get_insights_data_identifiers`].
#[derive(Debug, Clone)]
pub struct DataIdentifierPages {
    client: CarbonArcClient,
    page_size: u32,
}

#[async_trait]
impl PageFetcher for DataIdentifierPages {
    async fn fetch_page(&self, page: u32) -> Result<Value> {
        fetch_data_identifiers(&self.client, page, self.page_size).await
    }
}

/// Pages of [`ExplorerClient::get_insight_data`].
#[derive(Debug, Clone)]
pub struct InsightDataPages {
    client: CarbonArcClient,
    data_identifier: String,
    payload: Value,
    options: InsightDataOptions,
}

#[async_trait]
impl PageFetcher for InsightDataPages {
    async fn fetch_page(&self, page: u32) -> Result<Value> {
        let options = self.options.with_page(page);
        fetch_insight_data(&self.client, &self.data_identifier, &self.payload, options).await
    }
}

/// Pages of [`ExplorerClient::get_framework_data`].
#[derive(Debug, Clone)]
pub struct FrameworkDataPages {
    client: CarbonArcClient,
    framework_hash: String,
    page_size: u32,
}

#[async_trait]
impl PageFetcher for FrameworkDataPages {
    async fn fetch_page(&self, page: u32) -> Result<Value> {
        fetch_framework_data(&self.client, &self.framework_hash, page, self.page_size).await
    }
}
