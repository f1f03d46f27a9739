//! CryptoReg Pulse - one scheduled regulatory intelligence run.
//!
//! Reads credentials from the environment (`RAPIDAPI_KEY` required,
//! `GITHUB_TOKEN`/`GH_TOKEN` optional for the AI brief), runs the
//! fetch-classify-dedupe-persist pipeline once, and exits. Scheduling
//! is the caller's concern (cron, CI workflow, etc.).

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use enrichment::{CpwTrackerSource, GitHubModelsAnalyst, JsonFileStore, Pipeline};

#[derive(Parser, Debug)]
#[command(name = "pulse", about = "Weekly crypto regulatory intelligence scan")]
struct Args {
    /// Directory holding events.json and history.json
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Skip the AI analysis step even when a token is available
    #[arg(long)]
    no_analysis: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,enrichment=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let args = Args::parse();
    info!("starting regulatory scan");

    let source = CpwTrackerSource::from_env()?;
    let store = JsonFileStore::new(&args.data_dir);
    let mut pipeline = Pipeline::new(source, store);

    if args.no_analysis {
        info!("AI analysis disabled by flag");
    } else if let Some(analyst) = GitHubModelsAnalyst::from_env() {
        pipeline = pipeline.with_analyst(analyst);
    } else {
        warn!("no GITHUB_TOKEN available, skipping AI analysis");
    }

    let report = pipeline.run().await?;
    info!(
        raw = report.raw_events,
        unique = report.unique_events,
        critical = report.critical,
        high = report.high,
        weeks_tracked = report.history_len,
        analyzed = report.analyzed,
        "scan complete"
    );

    Ok(())
}
