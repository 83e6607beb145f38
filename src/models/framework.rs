//! Framework selection payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CarbonArcError, Result};

/// One insight plus the entities it is queried for.
///
/// Additional keys (filters, date ranges, ...) pass through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Framework {
    pub insight: Value,
    pub entities: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Framework {
    pub fn new(insight: impl Into<Value>, entities: impl Into<Value>) -> Self {
        Self {
            insight: insight.into(),
            entities: entities.into(),
            extra: Map::new(),
        }
    }

    /// Attach an extra key.
    #[must_use]
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }
}

/// Body of the framework metadata and purchase requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameworkPayload {
    pub frameworks: Vec<Framework>,
}

impl FrameworkPayload {
    pub fn new(frameworks: Vec<Framework>) -> Self {
        Self { frameworks }
    }

    /// Build from untyped JSON: a single framework object or a list of them.
    ///
    /// # Errors
    ///
    /// Returns [`CarbonArcError::InvalidPayload`] if an element is not an
    /// object or lacks `insight` or `entities`.
    pub fn from_value(value: Value) -> Result<Self> {
        let items = match value {
            Value::Array(items) => items,
            other => vec![other],
        };

        let frameworks = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                let Value::Object(object) = item else {
                    return Err(CarbonArcError::InvalidPayload(format!(
                        "framework {i} must be an object"
                    )));
                };
                for key in ["insight", "entities"] {
                    if !object.contains_key(key) {
                        return Err(CarbonArcError::InvalidPayload(format!(
                            "framework {i} must contain an '{key}' key"
                        )));
                    }
                }
                Ok(serde_json::from_value(Value::Object(object))?)
            })
            .collect::<Result<Vec<Framework>>>()?;

        Ok(Self { frameworks })
    }
}

impl From<Framework> for FrameworkPayload {
    fn from(framework: Framework) -> Self {
        Self::new(vec![framework])
    }
}

impl From<Vec<Framework>> for FrameworkPayload {
    fn from(frameworks: Vec<Framework>) -> Self {
        Self::new(frameworks)
    }
}
