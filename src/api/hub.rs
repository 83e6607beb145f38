//! Hub API: web content feeds.

use async_trait::async_trait;
use serde_json::Value;

use crate::client::CarbonArcClient;
use crate::error::Result;
use crate::pagination::{PageFetcher, Paginator};
use crate::routes::{Endpoint, Query};

/// Client for the `hub` product.
#[derive(Debug, Clone, Copy)]
pub struct HubClient<'a> {
    client: &'a CarbonArcClient,
}

impl<'a> HubClient<'a> {
    pub(crate) fn new(client: &'a CarbonArcClient) -> Self {
        Self { client }
    }

    /// Dashboard subscriptions. Not served by the current API version.
    pub async fn get_subscriptions(&self) -> Result<Value> {
        self.client
            .get_endpoint(Endpoint::HubSubscriptions, &[], &Query::new())
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_webcontent_feeds(&self) -> Result<Value> {
        self.client
            .get_endpoint(Endpoint::HubWebcontentFeeds, &[], &Query::new())
            .await
    }

    /// Feeds the caller is subscribed to.
    #[tracing::instrument(skip(self))]
    pub async fn get_subscribed_feeds(&self) -> Result<Value> {
        self.client
            .get_endpoint(Endpoint::HubSubscribedFeeds, &[], &Query::new())
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_webcontent_data(
        &self,
        webcontent_name: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Value> {
        fetch_webcontent(self.client, webcontent_name, page, page_size).await
    }

    pub fn iter_webcontent_data(
        &self,
        webcontent_name: &str,
        page_size: u32,
    ) -> Paginator<WebContentPages> {
        Paginator::new(WebContentPages {
            client: self.client.clone(),
            webcontent_name: webcontent_name.to_string(),
            page_size,
        })
    }
}

async fn fetch_webcontent(
    client: &CarbonArcClient,
    webcontent_name: &str,
    page: u32,
    page_size: u32,
) -> Result<Value> {
    let query = Query::new().push("page", page).push("size", page_size);
    client
        .get_endpoint(Endpoint::HubWebcontentData, &[&webcontent_name], &query)
        .await
}

/// Pages of [`HubClient::get_webcontent_data`].
#[derive(Debug, Clone)]
pub struct WebContentPages {
    client: CarbonArcClient,
    webcontent_name: String,
    page_size: u32,
}

#[async_trait]
impl PageFetcher for WebContentPages {
    async fn fetch_page(&self, page: u32) -> Result<Value> {
        fetch_webcontent(&self.client, &self.webcontent_name, page, self.page_size).await
    }
}
