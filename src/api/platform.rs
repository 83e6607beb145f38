//! Platform API: wallet, orders and workbooks.
//!
//! None of these are routed under `v2`; each call returns
//! [`CarbonArcError::Unsupported`](crate::CarbonArcError::Unsupported) unless
//! a route is registered with [`CarbonArcClient::with_route_table`].

use serde_json::Value;

use crate::client::CarbonArcClient;
use crate::error::Result;
use crate::routes::{Endpoint, Query};

/// Client for the `platform` product.
#[derive(Debug, Clone, Copy)]
pub struct PlatformClient<'a> {
    client: &'a CarbonArcClient,
}

impl<'a> PlatformClient<'a> {
    pub(crate) fn new(client: &'a CarbonArcClient) -> Self {
        Self { client }
    }

    pub async fn get_wallet_balance(&self) -> Result<Value> {
        self.client
            .get_endpoint(Endpoint::PlatformWalletBalance, &[], &Query::new())
            .await
    }

    pub async fn get_order_history(&self) -> Result<Value> {
        self.client
            .get_endpoint(Endpoint::PlatformOrderHistory, &[], &Query::new())
            .await
    }

    pub async fn get_workbooks(&self) -> Result<Value> {
        self.client
            .get_endpoint(Endpoint::PlatformWorkbooks, &[], &Query::new())
            .await
    }
}
