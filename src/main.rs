//! home-compass - compare residential areas from a data snapshot.
//!
//! Reads a comparison request (one query or an array of queries) and prints
//! the comparison results as JSON.

use anyhow::Context;
use clap::Parser;
use futures::future::try_join_all;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

use home_compass::adapters::SnapshotStore;
use home_compass::application::{CompareAreasHandler, CompareAreasQuery};
use home_compass::config::{init_tracing, AppConfig};
use home_compass::domain::comparison::Comparator;
use home_compass::domain::foundation::DomainError;

#[derive(Parser, Debug)]
#[command(name = "home-compass", version, about = "Compare two residential areas")]
struct Args {
    /// Comparison request file (JSON): one query or an array of queries
    #[arg(short, long)]
    request: PathBuf,

    /// Raw-data snapshot (JSON, or YAML by extension); defaults to the configured path
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RequestFile {
    Single(CompareAreasQuery),
    Batch(Vec<CompareAreasQuery>),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging);
    tracing::info!("home-compass v{}", env!("CARGO_PKG_VERSION"));

    let snapshot_path = args
        .snapshot
        .or_else(|| config.snapshot.path.as_ref().map(PathBuf::from))
        .context("no snapshot given: pass --snapshot or set HOME_COMPASS__SNAPSHOT__PATH")?;

    let store = Arc::new(SnapshotStore::load(&snapshot_path).await?);
    let handler = CompareAreasHandler::new(store.clone(), store)
        .with_comparator(Comparator::new(config.thresholds.to_thresholds()));

    let text = tokio::fs::read_to_string(&args.request)
        .await
        .with_context(|| format!("reading request {}", args.request.display()))?;
    let request: RequestFile =
        serde_json::from_str(&text).context("request is not a comparison query")?;

    let output = match request {
        RequestFile::Single(query) => {
            let result = handler.handle(query).await.map_err(DomainError::from)?;
            serde_json::to_value(result)?
        }
        RequestFile::Batch(queries) => {
            let results = try_join_all(queries.into_iter().map(|q| handler.handle(q)))
                .await
                .map_err(DomainError::from)?;
            serde_json::to_value(results)?
        }
    };

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");
    Ok(())
}
