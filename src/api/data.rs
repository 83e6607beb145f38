//! Data library API: datasets, graphs, manifests, downloads and bulk data.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::client::CarbonArcClient;
use crate::download::{download_to_directory, DownloadOptions};
use crate::error::{CarbonArcError, Result};
use crate::models::{GraphDownloadType, ManifestQuery, VersionChangesQuery};
use crate::routes::{Endpoint, Query};

/// Client for the `library` product and the legacy bulk data routes.
#[derive(Debug, Clone, Copy)]
pub struct DataClient<'a> {
    client: &'a CarbonArcClient,
}

impl<'a> DataClient<'a> {
    pub(crate) fn new(client: &'a CarbonArcClient) -> Self {
        Self { client }
    }

    async fn get(&self, endpoint: Endpoint, id: Option<&str>, query: &Query) -> Result<Value> {
        match id {
            Some(id) => self.client.get_endpoint(endpoint, &[&id], query).await,
            None => self.client.get_endpoint(endpoint, &[], query).await,
        }
    }

    /// List datasets in the data library.
    #[tracing::instrument(skip(self))]
    pub async fn get_datasets(&self) -> Result<Value> {
        self.get(Endpoint::Datasets, None, &Query::new()).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_dataset_information(&self, dataset_id: &str) -> Result<Value> {
        self.get(Endpoint::DatasetInformation, Some(dataset_id), &Query::new())
            .await
    }

    /// Column definitions for a dataset, optionally narrowed to one topic.
    #[tracing::instrument(skip(self))]
    pub async fn get_data_dictionary(
        &self,
        dataset_id: &str,
        entity_topic_id: Option<u64>,
    ) -> Result<Value> {
        let query = Query::new().opt("entity_topic_id", entity_topic_id);
        self.get(Endpoint::DataDictionary, Some(dataset_id), &query)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_graphs(&self) -> Result<Value> {
        self.get(Endpoint::Graphs, None, &Query::new()).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_graph_information(&self, graph_id: &str) -> Result<Value> {
        self.get(Endpoint::GraphInformation, Some(graph_id), &Query::new())
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_graph_data(
        &self,
        graph_id: &str,
        download_type: GraphDownloadType,
    ) -> Result<Value> {
        let query = Query::new().push("download_type", download_type);
        self.get(Endpoint::GraphData, Some(graph_id), &query).await
    }

    /// Changes between data library versions.
    #[tracing::instrument(skip(self))]
    pub async fn get_library_version_changes(&self, query: &VersionChangesQuery) -> Result<Value> {
        self.get(Endpoint::LibraryVersionChanges, None, &query.to_query())
            .await
    }

    /// Files making up a dataset, optionally limited to a creation or update
    /// window.
    ///
    /// # Errors
    ///
    /// [`CarbonArcError::InvalidDate`] if a date is malformed; no request is made.
    #[tracing::instrument(skip(self))]
    pub async fn get_data_manifest(&self, dataset_id: &str, query: &ManifestQuery) -> Result<Value> {
        let query = query.to_query()?;
        self.get(Endpoint::DataManifest, Some(dataset_id), &query)
            .await
    }

    /// Download one manifest file into `directory` and return its path.
    ///
    /// # Errors
    ///
    /// [`CarbonArcError::MissingDirectory`] if `directory` does not exist,
    /// before anything is sent.
    pub async fn download_file(
        &self,
        file_id: &str,
        directory: impl AsRef<Path>,
        options: &DownloadOptions,
    ) -> Result<PathBuf> {
        let directory = directory.as_ref();
        if !directory.is_dir() {
            return Err(CarbonArcError::MissingDirectory(directory.to_path_buf()));
        }
        let url = self.client.routes().url(Endpoint::FileDownload, &[&file_id])?;
        download_to_directory(self.client.requests(), &url, directory, options).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_bulk_data_identifiers(&self) -> Result<Value> {
        self.get(Endpoint::BulkDataIdentifiers, None, &Query::new())
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_bulk_data_metadata(&self, data_identifier: &str) -> Result<Value> {
        self.get(Endpoint::BulkDataMetadata, Some(data_identifier), &Query::new())
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_bulk_data_sample(&self, data_identifier: &str) -> Result<Value> {
        self.get(Endpoint::BulkDataSample, Some(data_identifier), &Query::new())
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_bulk_data_manifest(&self, data_identifier: &str) -> Result<Value> {
        self.get(Endpoint::BulkDataManifest, Some(data_identifier), &Query::new())
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_graph_data_identifiers(&self) -> Result<Value> {
        self.get(Endpoint::GraphDataIdentifiers, None, &Query::new())
            .await
    }
}
