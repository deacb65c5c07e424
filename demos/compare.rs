//! Serial vs bounded-parallel attachment fetch comparison against a live mailbox
//!
//! Usage: GRAPH_TOKEN=<bearer token> cargo run --release --example compare

use mailbatch::{BatchEngine, Config, ConsoleReporter, GraphMailService};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Token acquisition is external (device code flow, azure CLI, ...):
    //   az account get-access-token --resource https://graph.microsoft.com
    let token = std::env::var("GRAPH_TOKEN").expect("Set GRAPH_TOKEN to a Graph API bearer token");

    let message_count: usize = std::env::var("MESSAGE_COUNT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(20);
    let max_parallelism: usize = std::env::var("MAX_PARALLELISM")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);

    let config = Config {
        message_count,
        max_parallelism,
        ..Default::default()
    };

    let client = Arc::new(GraphMailService::new(token)?);
    let engine = BatchEngine::new(client, config, Arc::new(ConsoleReporter::new()))?;

    let comparison = engine.run_comparison().await?;

    if let Some(speedup) = comparison.speedup() {
        println!("### Parallel speedup: {:.2}x", speedup);
    }

    Ok(())
}
