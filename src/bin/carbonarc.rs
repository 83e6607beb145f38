//! Carbon Arc API CLI binary.
//!
//! A command-line interface for browsing insights, the ontology and the
//! data library.

use std::process::ExitCode;

use carbonarc::cli::{Cli, Command, DatasetsCommand, InsightsCommand, OntologyCommand, PageArgs};
use carbonarc::output::PrettyPrint;
use carbonarc::{CarbonArcClient, DownloadOptions, EntitySearch, InsightDataOptions};
use clap::Parser;
use serde_json::Value;
use tracing::level_filters::LevelFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let client = match CarbonArcClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set CARBONARC_API_TOKEN environment variable");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(client: &CarbonArcClient, cli: Cli) -> carbonarc::Result<()> {
    match cli.command {
        Command::Insights(cmd) => handle_insights(client, cmd, cli.json).await,
        Command::Ontology(cmd) => handle_ontology(client, cmd, cli.json).await,
        Command::Datasets(cmd) => handle_datasets(client, cmd, cli.json).await,
        Command::Download {
            file_id,
            dir,
            filename,
        } => {
            let mut options = DownloadOptions::default();
            if let Some(name) = filename {
                options = options.with_filename(name);
            }
            let path = client.data().download_file(&file_id, &dir, &options).await?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

async fn handle_insights(
    client: &CarbonArcClient,
    cmd: InsightsCommand,
    json: bool,
) -> carbonarc::Result<()> {
    let explorer = client.explorer();
    match cmd {
        InsightsCommand::List(PageArgs { page, size }) => {
            let response = explorer.get_insights_data_identifiers(page, size).await?;
            output(&response, json)
        }
        InsightsCommand::Metadata { data_identifier } => {
            output(&explorer.get_insight_metadata(&data_identifier).await?, json)
        }
        InsightsCommand::Filters { data_identifier } => {
            output(&explorer.get_insight_filters(&data_identifier).await?, json)
        }
        InsightsCommand::Data {
            data_identifier,
            payload,
            paging,
            shape,
            aggregation,
            all,
        } => {
            let payload: Value = serde_json::from_str(&payload)?;
            let options = InsightDataOptions::default()
                .with_page(paging.page)
                .with_page_size(paging.size)
                .with_data_type(shape.into())
                .with_aggregation(aggregation.into());

            if all {
                let table = explorer
                    .iter_insight_data_tables(&data_identifier, payload, options)
                    .concat_all()
                    .await?;
                output_table(&table, json)
            } else if json {
                output(
                    &explorer.get_insight_data(&data_identifier, &payload, options).await?,
                    true,
                )
            } else {
                let table = explorer
                    .get_insight_data_table(&data_identifier, &payload, options)
                    .await?;
                output_table(&table, false)
            }
        }
    }
}

async fn handle_ontology(
    client: &CarbonArcClient,
    cmd: OntologyCommand,
    json: bool,
) -> carbonarc::Result<()> {
    let ontology = client.ontology();
    match cmd {
        OntologyCommand::Entities {
            search,
            entity,
            domain,
            representation,
            paging,
        } => {
            let mut query = EntitySearch {
                entity,
                domain,
                representation,
                page: paging.page,
                page_size: paging.size,
                ..Default::default()
            };
            if let Some(search) = search {
                query = query.with_search(search);
            }
            output(&ontology.get_ontology_entities(&query).await?, json)
        }
        OntologyCommand::Representations { entity, domain } => output(
            &ontology.get_ontology_representations(&entity, &domain).await?,
            json,
        ),
    }
}

async fn handle_datasets(
    client: &CarbonArcClient,
    cmd: DatasetsCommand,
    json: bool,
) -> carbonarc::Result<()> {
    let data = client.data();
    match cmd {
        DatasetsCommand::List => output(&data.get_datasets().await?, json),
        DatasetsCommand::Get { dataset_id } => {
            output(&data.get_dataset_information(&dataset_id).await?, json)
        }
        DatasetsCommand::Dictionary {
            dataset_id,
            entity_topic_id,
        } => output(
            &data.get_data_dictionary(&dataset_id, entity_topic_id).await?,
            json,
        ),
    }
}

fn output(value: &Value, json: bool) -> carbonarc::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", value.pretty_print());
    }
    Ok(())
}

fn output_table(table: &carbonarc::Table, json: bool) -> carbonarc::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&table.to_records())?);
    } else {
        println!("{}", table.pretty_print());
    }
    Ok(())
}
