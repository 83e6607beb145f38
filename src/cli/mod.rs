//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the
//! `carbonarc` binary.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::models::{Aggregation, DataType};

/// Carbon Arc API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "carbonarc", about = "Carbon Arc API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Browse and query explorer insights.
    #[command(subcommand)]
    Insights(InsightsCommand),

    /// Search the entity ontology.
    #[command(subcommand)]
    Ontology(OntologyCommand),

    /// Browse the data library.
    #[command(subcommand)]
    Datasets(DatasetsCommand),

    /// Download a data library file into a directory.
    Download {
        /// File identifier from a dataset manifest.
        file_id: String,

        /// Existing directory to write into.
        #[arg(long)]
        dir: PathBuf,

        /// Output file name. Defaults to the server-provided name.
        #[arg(long)]
        filename: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum InsightsCommand {
    /// List insight data identifiers.
    List(PageArgs),

    /// Show metadata for a data identifier.
    Metadata {
        data_identifier: String,
    },

    /// Show the filters accepted by a data identifier.
    Filters {
        data_identifier: String,
    },

    /// Query insight data.
    Data {
        data_identifier: String,

        /// JSON filter payload sent as the request body.
        #[arg(long, default_value = "{}")]
        payload: String,

        #[command(flatten)]
        paging: PageArgs,

        /// Response shape.
        #[arg(long = "type", value_enum, default_value_t = Shape::Dataframe)]
        shape: Shape,

        #[arg(long, value_enum, default_value_t = AggregationArg::Sum)]
        aggregation: AggregationArg,

        /// Fetch every page and print one combined table.
        #[arg(long)]
        all: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum OntologyCommand {
    /// Search ontology entities.
    Entities {
        /// Free-text search.
        #[arg(long)]
        search: Option<String>,

        /// Entity filter, repeatable.
        #[arg(long)]
        entity: Vec<String>,

        /// Entity domain filter, repeatable.
        #[arg(long)]
        domain: Vec<String>,

        /// Entity representation filter, repeatable.
        #[arg(long)]
        representation: Vec<String>,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// List representations for entities and domains.
    Representations {
        #[arg(long)]
        entity: Vec<String>,

        #[arg(long)]
        domain: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DatasetsCommand {
    /// List datasets.
    List,

    /// Show one dataset.
    Get {
        dataset_id: String,
    },

    /// Show a dataset's data dictionary.
    Dictionary {
        dataset_id: String,

        #[arg(long)]
        entity_topic_id: Option<u64>,
    },
}

/// Page selection shared by paginated commands.
#[derive(Args, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageArgs {
    /// Page number (1-indexed).
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Number of items per page.
    #[arg(long, default_value_t = crate::pagination::DEFAULT_PAGE_SIZE)]
    pub size: u32,
}

/// Insight data response shape.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Dataframe,
    Timeseries,
}

impl From<Shape> for DataType {
    fn from(shape: Shape) -> Self {
        match shape {
            Shape::Dataframe => DataType::Dataframe,
            Shape::Timeseries => DataType::Timeseries,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AggregationArg {
    Sum,
    Mean,
    Avg,
}

impl From<AggregationArg> for Aggregation {
    fn from(arg: AggregationArg) -> Self {
        match arg {
            AggregationArg::Sum => Aggregation::Sum,
            AggregationArg::Mean => Aggregation::Mean,
            AggregationArg::Avg => Aggregation::Avg,
        }
    }
}
