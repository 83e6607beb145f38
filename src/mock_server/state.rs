//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Carbon Arc API server.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;

/// An explorer insight and the records its data endpoint serves.
#[derive(Debug, Clone)]
pub struct MockInsight {
    pub data_identifier: String,
    pub name: String,
    pub metadata: Value,
    pub filters: Value,
    /// Flat records. Each carries an `entity` field used for timeseries grouping.
    pub records: Vec<Value>,
}

/// A downloadable file in a dataset manifest.
#[derive(Debug, Clone)]
pub struct MockFile {
    pub file_id: String,
    pub filename: String,
    pub content: Vec<u8>,
}

/// A data library dataset.
#[derive(Debug, Clone)]
pub struct MockDataset {
    pub dataset_id: String,
    pub name: String,
    pub dictionary: Value,
    pub files: Vec<MockFile>,
}

/// An ontology entity.
#[derive(Debug, Clone, Serialize)]
pub struct MockEntity {
    pub carc_id: u64,
    pub label: String,
    pub entity: String,
    pub entity_domain: String,
    pub entity_representation: String,
}

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Insights indexed by data identifier.
    pub insights: BTreeMap<String, MockInsight>,

    /// Datasets indexed by dataset id.
    pub datasets: BTreeMap<String, MockDataset>,

    pub entities: Vec<MockEntity>,

    /// Optional authentication token. If set, requests must include this token.
    pub required_token: Option<String>,

    /// Path and query of every request received, in order.
    pub requests: Vec<String>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    pub fn with_insight(mut self, insight: MockInsight) -> Self {
        self.insights.insert(insight.data_identifier.clone(), insight);
        self
    }

    pub fn with_dataset(mut self, dataset: MockDataset) -> Self {
        self.datasets.insert(dataset.dataset_id.clone(), dataset);
        self
    }

    pub fn with_entity(mut self, entity: MockEntity) -> Self {
        self.entities.push(entity);
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    pub fn get_insight(&self, data_identifier: &str) -> Option<&MockInsight> {
        self.insights.get(data_identifier)
    }

    pub fn get_dataset(&self, dataset_id: &str) -> Option<&MockDataset> {
        self.datasets.get(dataset_id)
    }

    /// Find a file across all datasets.
    pub fn get_file(&self, file_id: &str) -> Option<&MockFile> {
        self.datasets
            .values()
            .flat_map(|d| d.files.iter())
            .find(|f| f.file_id == file_id)
    }

    /// Entities matching every non-empty filter. `search` is a
    /// case-insensitive substring match on the label.
    pub fn search_entities(
        &self,
        entity: &[String],
        domain: &[String],
        representation: &[String],
        search: Option<&str>,
    ) -> Vec<&MockEntity> {
        let search = search.map(str::to_lowercase);
        self.entities
            .iter()
            .filter(|e| entity.is_empty() || entity.contains(&e.entity))
            .filter(|e| domain.is_empty() || domain.contains(&e.entity_domain))
            .filter(|e| {
                representation.is_empty() || representation.contains(&e.entity_representation)
            })
            .filter(|e| {
                search
                    .as_ref()
                    .map(|s| e.label.to_lowercase().contains(s))
                    .unwrap_or(true)
            })
            .collect()
    }

    /// Number of recorded requests whose path starts with `prefix`.
    pub fn request_count(&self, prefix: &str) -> usize {
        self.requests.iter().filter(|r| r.starts_with(prefix)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(id: u64, label: &str, domain: &str) -> MockEntity {
        MockEntity {
            carc_id: id,
            label: label.to_string(),
            entity: "brand".to_string(),
            entity_domain: domain.to_string(),
            entity_representation: "carc_brand".to_string(),
        }
    }

    #[test]
    fn test_search_entities_filters() {
        let state = MockState::new()
            .with_entity(entity(1, "Acme Coffee", "restaurants"))
            .with_entity(entity(2, "Acme Tools", "hardware"))
            .with_entity(entity(3, "Bolt Coffee", "restaurants"));

        assert_eq!(state.search_entities(&[], &[], &[], None).len(), 3);
        assert_eq!(state.search_entities(&[], &[], &[], Some("acme")).len(), 2);

        let restaurants = vec!["restaurants".to_string()];
        let found = state.search_entities(&[], &restaurants, &[], Some("coffee"));
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].carc_id, 1);
    }

    #[test]
    fn test_get_file_across_datasets() {
        let state = MockState::new().with_dataset(MockDataset {
            dataset_id: "CA0028".to_string(),
            name: "Card spend".to_string(),
            dictionary: Value::Null,
            files: vec![MockFile {
                file_id: "f-1".to_string(),
                filename: "part-0.csv".to_string(),
                content: b"a,b\n1,2\n".to_vec(),
            }],
        });

        assert_eq!(state.get_file("f-1").map(|f| f.filename.as_str()), Some("part-0.csv"));
        assert!(state.get_file("missing").is_none());
    }
}
