//! storage-census CLI
//!
//! Object storage inventory across an AWS organization.

use clap::{CommandFactory, Parser};
use sc_cli_common::{format_bytes, format_duration, format_number, init_logging};

mod args;
mod progress;
mod run;

use args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args_os().len() <= 1 {
        Cli::command().print_help()?;
        std::process::exit(1);
    }

    let args = Cli::parse();
    let config = run::load_config(&args)?;

    // Logs go to stderr, leaving stdout clean
    init_logging(args.log_level.effective(config.quiet, config.debug))?;

    let stats = run::execute(&config).await?;

    eprintln!();
    eprintln!("Inventory completed:");
    eprintln!("  Accounts:         {}", stats.accounts().len());
    if config.summary_only {
        for (account, count) in stats.container_counts() {
            eprintln!("    {account}: {count} buckets");
        }
        eprintln!(
            "  Buckets:          {}",
            stats.container_counts().values().sum::<usize>()
        );
    } else {
        eprintln!("  Buckets:          {}", stats.container_total());
    }
    eprintln!("  Objects listed:   {}", format_number(stats.objects_seen()));
    eprintln!("  Objects filtered: {}", format_number(stats.objects_filtered()));
    eprintln!("  Files counted:    {}", format_number(stats.global().total_files()));
    eprintln!("  Bytes counted:    {}", format_bytes(stats.global().total_bytes()));
    eprintln!("  Errors:           {}", stats.error_count());

    if let Some(duration) = stats.duration().and_then(|d| d.to_std().ok()) {
        eprintln!("  Duration:         {}", format_duration(duration));
        if let Some(ops) = stats.objects_per_second() {
            eprintln!("  Throughput:       {ops:.1} objects/sec");
        }
    }

    if let Some(path) = &config.report.json {
        eprintln!("  JSON report:      {}", path.display());
    }
    // Skipped when there were no bucket rows
    if let Some(path) = config.report.csv.as_ref().filter(|p| p.exists()) {
        eprintln!("  CSV report:       {}", path.display());
    }

    for error in stats.errors() {
        eprintln!("  Error: {error}");
    }

    Ok(())
}
