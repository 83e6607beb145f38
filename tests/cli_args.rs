//! CLI argument parsing tests.

use std::path::PathBuf;

use carbonarc::cli::{
    AggregationArg, Cli, Command, DatasetsCommand, InsightsCommand, OntologyCommand, PageArgs,
    Shape,
};
use clap::Parser;

#[test]
fn test_cli_parses_insights_list_with_defaults() {
    let cli = Cli::parse_from(["carbonarc", "insights", "list"]);

    assert!(!cli.json);
    assert_eq!(cli.verbose, 0);
    match cli.command {
        Command::Insights(InsightsCommand::List(paging)) => {
            assert_eq!(paging, PageArgs { page: 1, size: 100 });
        }
        _ => panic!("Expected insights list"),
    }
}

#[test]
fn test_cli_parses_insight_data_options() {
    let cli = Cli::parse_from([
        "carbonarc",
        "insights",
        "data",
        "CA0001",
        "--payload",
        r#"{"filters":{}}"#,
        "--type",
        "timeseries",
        "--aggregation",
        "mean",
        "--size",
        "50",
        "--all",
    ]);

    match cli.command {
        Command::Insights(InsightsCommand::Data {
            data_identifier,
            payload,
            paging,
            shape,
            aggregation,
            all,
        }) => {
            assert_eq!(data_identifier, "CA0001");
            assert_eq!(payload, r#"{"filters":{}}"#);
            assert_eq!(paging, PageArgs { page: 1, size: 50 });
            assert_eq!(shape, Shape::Timeseries);
            assert_eq!(aggregation, AggregationArg::Mean);
            assert!(all);
        }
        _ => panic!("Expected insights data"),
    }
}

#[test]
fn test_cli_global_flags_after_subcommand() {
    let cli = Cli::parse_from(["carbonarc", "datasets", "list", "--json", "-vv"]);

    assert!(cli.json);
    assert_eq!(cli.verbose, 2);
    assert!(matches!(cli.command, Command::Datasets(DatasetsCommand::List)));
}

#[test]
fn test_cli_ontology_repeated_filters() {
    let cli = Cli::parse_from([
        "carbonarc",
        "ontology",
        "entities",
        "--search",
        "coffee",
        "--domain",
        "restaurants",
        "--domain",
        "bakeries",
    ]);

    match cli.command {
        Command::Ontology(OntologyCommand::Entities {
            search,
            domain,
            entity,
            ..
        }) => {
            assert_eq!(search.as_deref(), Some("coffee"));
            assert_eq!(domain, vec!["restaurants", "bakeries"]);
            assert!(entity.is_empty());
        }
        _ => panic!("Expected ontology entities"),
    }
}

#[test]
fn test_cli_download_requires_dir() {
    assert!(Cli::try_parse_from(["carbonarc", "download", "file-001"]).is_err());

    let cli = Cli::parse_from([
        "carbonarc",
        "download",
        "file-001",
        "--dir",
        "/tmp/out",
        "--filename",
        "spend.csv",
    ]);
    match cli.command {
        Command::Download {
            file_id,
            dir,
            filename,
        } => {
            assert_eq!(file_id, "file-001");
            assert_eq!(dir, PathBuf::from("/tmp/out"));
            assert_eq!(filename.as_deref(), Some("spend.csv"));
        }
        _ => panic!("Expected download"),
    }
}

#[test]
fn test_cli_dictionary_topic() {
    let cli = Cli::parse_from([
        "carbonarc",
        "datasets",
        "dictionary",
        "CA0028",
        "--entity-topic-id",
        "4",
    ]);
    match cli.command {
        Command::Datasets(DatasetsCommand::Dictionary {
            dataset_id,
            entity_topic_id,
        }) => {
            assert_eq!(dataset_id, "CA0028");
            assert_eq!(entity_topic_id, Some(4));
        }
        _ => panic!("Expected datasets dictionary"),
    }
}

#[test]
fn test_cli_rejects_unknown_shape() {
    assert!(Cli::try_parse_from(["carbonarc", "insights", "data", "CA0001", "--type", "cube"]).is_err());
}
