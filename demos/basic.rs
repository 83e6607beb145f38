//! Basic example demonstrating the Carbon Arc API client.
//!
//! Run with:
//! ```
//! CARBONARC_API_TOKEN=your-token cargo run --example basic
//! ```

use carbonarc::{CarbonArcClient, DataType, EntitySearch, InsightDataOptions};
use serde_json::json;

#[tokio::main]
async fn main() -> carbonarc::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating Carbon Arc client...");
    let client = CarbonArcClient::from_env()?;
    println!("Connected to: {}", client.routes().host());

    // List the first page of insight data identifiers
    println!("\n--- Insight Data Identifiers (first page) ---");
    let identifiers = client.explorer().get_insights_data_identifiers(1, 10).await?;
    let records = identifiers["data"].as_array().cloned().unwrap_or_default();
    println!("Found {} identifiers (pages: {})", records.len(), identifiers["pages"]);
    for record in &records {
        println!("  - {}", record["data_identifier"]);
    }

    // Inspect the first identifier
    if let Some(data_identifier) = records.first().and_then(|r| r["data_identifier"].as_str()) {
        println!("\n--- Metadata for {data_identifier} ---");
        let metadata = client.explorer().get_insight_metadata(data_identifier).await?;
        println!("{metadata:#}");

        println!("\n--- Filters ---");
        let filters = client.explorer().get_insight_filters(data_identifier).await?;
        println!("{filters:#}");

        // Pull one page of data as a timeseries table
        println!("\n--- First page as a table ---");
        let options = InsightDataOptions::default()
            .with_page_size(20)
            .with_data_type(DataType::Timeseries);
        let table = client
            .explorer()
            .get_insight_data_table(data_identifier, &json!({}), options)
            .await?;
        println!("{table}");
    }

    // Search the ontology
    println!("\n--- Ontology search: \"coffee\" ---");
    let search = EntitySearch::default().with_search("coffee");
    let entities = client.ontology().get_ontology_entities(&search).await?;
    println!("{entities:#}");

    println!("\nDone!");
    Ok(())
}
