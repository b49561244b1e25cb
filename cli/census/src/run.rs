//! Main execution logic for storage-census.

use anyhow::Result;
use sc_inventory::report::write_reports;
use sc_inventory::{AwsServices, ConfigLayer, ScanConfig, Scanner, SharedStats, StatsTree};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::args::Cli;
use crate::progress::ProgressReporter;

/// Seconds between progress lines.
const PROGRESS_INTERVAL_SECS: u64 = 10;

/// Merge command-line settings over the config file (if any) and defaults.
pub fn load_config(args: &Cli) -> Result<ScanConfig> {
    let file_layer = match &args.config {
        Some(path) => ConfigLayer::from_json_file(path)?,
        None => ConfigLayer::default(),
    };

    let mut config = args.to_layer().overlay(file_layer).resolve()?;

    if let (Some(access_key), Some(secret_key)) = (&args.access_key, &args.secret_key) {
        config.aws = config.aws.with_credentials(access_key, secret_key);
    }

    Ok(config)
}

/// Run one scan and write its reports.
pub async fn execute(config: &ScanConfig) -> Result<StatsTree> {
    let services = AwsServices::connect(&config.aws).await;

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping scan and reporting partial results");
            interrupt.cancel();
        }
    });

    let scanner = Scanner::new(
        services.identity,
        services.organization,
        services.storage,
        config.clone(),
    )
    .with_cancellation(cancel);

    let stats = SharedStats::new();
    let mut progress = ProgressReporter::new(!config.quiet, PROGRESS_INTERVAL_SECS, stats.clone());
    progress.start();

    let result = scanner.scan_into(stats.clone()).await;
    progress.stop().await;
    result?;

    let tree = stats.into_inner();
    write_reports(&tree, &config.report)?;

    info!(errors = tree.error_count(), "Reports written");
    Ok(tree)
}
