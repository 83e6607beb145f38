//! Enumerated request options.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Response shape for insight data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Flat records.
    #[default]
    Dataframe,
    /// Records grouped per entity.
    Timeseries,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dataframe => "dataframe",
            Self::Timeseries => "timeseries",
        }
    }
}

/// Aggregation applied to insight data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    #[default]
    Sum,
    Mean,
    Avg,
}

impl Aggregation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Mean => "mean",
            Self::Avg => "avg",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Export format for graph data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphDownloadType {
    #[default]
    Csv,
    Json,
    Graphml,
}

impl GraphDownloadType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Graphml => "graphml",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(DataType, Aggregation, Order, GraphDownloadType);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(DataType::Timeseries.to_string(), "timeseries");
        assert_eq!(Aggregation::Mean.to_string(), "mean");
        assert_eq!(Order::Desc.to_string(), "desc");
        assert_eq!(GraphDownloadType::Graphml.to_string(), "graphml");
    }

    #[test]
    fn test_serde_matches_display() {
        let json = serde_json::to_string(&Aggregation::Avg).unwrap();
        assert_eq!(json, "\"avg\"");
    }
}
