//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use serde_json::{json, Value};

use super::state::{MockDataset, MockEntity, MockFile, MockInsight, MockState};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Insight Fixtures
    // =========================================================================

    /// An insight with no records.
    pub fn minimal_insight(data_identifier: &str, name: &str) -> MockInsight {
        MockInsight {
            data_identifier: data_identifier.to_string(),
            name: name.to_string(),
            metadata: json!({"data_identifier": data_identifier, "name": name}),
            filters: json!([]),
            records: Vec::new(),
        }
    }

    /// Daily card spend for each of `entities`, `days` records per entity.
    pub fn card_spend_insight(data_identifier: &str, entities: &[&str], days: u32) -> MockInsight {
        let mut insight = Self::minimal_insight(data_identifier, "Card Spend");
        insight.metadata = json!({
            "data_identifier": data_identifier,
            "name": "Card Spend",
            "frequency": "daily",
            "unit": "usd",
        });
        insight.filters = json!([
            {"key": "location_resolution", "values": ["us", "state"]},
            {"key": "date_resolution", "values": ["day", "week"]},
        ]);
        insight.records = entities
            .iter()
            .flat_map(|entity| {
                (1..=days).map(move |day| {
                    json!({
                        "entity": entity,
                        "date": format!("2024-01-{day:02}"),
                        "spend": day * 100,
                    })
                })
            })
            .collect();
        insight
    }

    // =========================================================================
    // Dataset Fixtures
    // =========================================================================

    pub fn dataset_with_file(dataset_id: &str, file_id: &str, filename: &str) -> MockDataset {
        MockDataset {
            dataset_id: dataset_id.to_string(),
            name: format!("Dataset {dataset_id}"),
            dictionary: json!({
                "columns": [
                    {"name": "date", "type": "date"},
                    {"name": "spend", "type": "double"},
                ]
            }),
            files: vec![MockFile {
                file_id: file_id.to_string(),
                filename: filename.to_string(),
                content: b"date,spend\n2024-01-01,100\n2024-01-02,200\n".to_vec(),
            }],
        }
    }

    // =========================================================================
    // Ontology Fixtures
    // =========================================================================

    pub fn brand(carc_id: u64, label: &str, domain: &str) -> MockEntity {
        MockEntity {
            carc_id,
            label: label.to_string(),
            entity: "brand".to_string(),
            entity_domain: domain.to_string(),
            entity_representation: "carc_brand".to_string(),
        }
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// Two insights, one dataset with a downloadable file and five brands.
    pub fn default_scenario() -> MockState {
        MockState::new()
            .with_insight(Self::card_spend_insight("CA0001", &["Acme", "Bolt"], 3))
            .with_insight(Self::minimal_insight("CA0002", "Foot Traffic"))
            .with_dataset(Self::dataset_with_file("CA0028", "file-001", "card_spend_2024.csv"))
            .with_entity(Self::brand(101, "Acme Coffee", "restaurants"))
            .with_entity(Self::brand(102, "Acme Tools", "hardware"))
            .with_entity(Self::brand(103, "Bolt Coffee", "restaurants"))
            .with_entity(Self::brand(104, "Crane Air", "airlines"))
            .with_entity(Self::brand(105, "Delta Bakery", "restaurants"))
    }

    /// Summary record for an insight listing.
    pub fn insight_summary(insight: &MockInsight) -> Value {
        json!({"data_identifier": insight.data_identifier, "name": insight.name})
    }
}
