//! Sub-domain clients, one per API product.
//!
//! Each borrows a [`CarbonArcClient`](crate::CarbonArcClient) and maps its
//! methods one-to-one onto endpoints. Paginated endpoints also expose an
//! `iter_*` method returning a [`Paginator`](crate::Paginator) that owns a
//! clone of the client.

mod data;
mod explorer;
mod hub;
mod ontology;
mod platform;

pub use data::DataClient;
pub use explorer::{DataIdentifierPages, ExplorerClient, FrameworkDataPages, InsightDataPages};
pub use hub::{HubClient, WebContentPages};
pub use ontology::{EntitySearchPages, OntologyClient};
pub use platform::PlatformClient;
