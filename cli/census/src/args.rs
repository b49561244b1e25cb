//! CLI argument definitions for storage-census.

use std::path::PathBuf;

use clap::Parser;
use sc_cli_common::LogLevel;
use sc_inventory::ConfigLayer;

/// Inventory object storage across accounts.
///
/// Lists every bucket and object reachable from the current credentials (or,
/// with --org, from every member account of the organization) and totals
/// bytes and files by file extension per account and per bucket.
///
/// Settings can also come from a JSON file given with --config; values passed
/// on the command line take precedence over the file.
///
/// ## Examples
///
/// Current account only:
///   storage-census --json usage.json
///
/// Whole organization, CSV as well, skipping large objects:
///   storage-census --org --csv usage.csv --maxsize 1048576
///
/// Count buckets per account without listing objects:
///   storage-census --org --summary
#[derive(Parser, Debug)]
#[command(name = "storage-census")]
#[command(version, about, long_about = None)]
pub struct Cli {
    // === Output ===
    /// Quiet mode, no progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Print every listed object
    #[arg(short, long)]
    pub debug: bool,

    /// JSON config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// JSON report to write (default: output.json)
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// CSV report to write
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    // === Scan scope ===
    /// Only count buckets per account
    #[arg(short, long)]
    pub summary: bool,

    /// Request only the first page of objects per bucket
    #[arg(short, long)]
    pub test: bool,

    /// Scan every account in the organization
    #[arg(short, long)]
    pub org: bool,

    /// Role to assume in member accounts
    #[arg(short, long, value_name = "ROLE")]
    pub role: Option<String>,

    /// Include only these account ids
    #[arg(short, long, value_name = "ACCOUNT", num_args = 1..)]
    pub include: Vec<String>,

    /// Exclude these account ids
    #[arg(short, long, value_name = "ACCOUNT", num_args = 1..)]
    pub exclude: Vec<String>,

    // === Object filters ===
    /// Largest object size counted
    #[arg(short = 'x', long, value_name = "BYTES")]
    pub maxsize: Option<u64>,

    /// Smallest object size counted
    #[arg(short = 'n', long, value_name = "BYTES")]
    pub minsize: Option<u64>,

    /// Count only these extensions
    #[arg(short, long, value_name = "EXT", num_args = 1..)]
    pub allowext: Vec<String>,

    /// Never count these extensions
    #[arg(short, long, value_name = "EXT", num_args = 1..)]
    pub blockext: Vec<String>,

    // === Execution ===
    /// Accounts scanned in parallel (must be >= 1)
    #[arg(long, value_parser = parse_positive_usize)]
    pub concurrency: Option<usize>,

    /// Timeout for each provider request, in seconds
    #[arg(long, value_name = "SECS")]
    pub request_timeout: Option<u64>,

    /// ARN partition used for role ARNs
    #[arg(long)]
    pub partition: Option<String>,

    /// Session name for assumed roles
    #[arg(long)]
    pub session_name: Option<String>,

    // === AWS ===
    /// AWS region
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Custom endpoint URL (for LocalStack)
    #[arg(long, env = "SC_ENDPOINT")]
    pub endpoint: Option<String>,

    /// AWS access key ID
    #[arg(long, env = "AWS_ACCESS_KEY_ID", hide_env_values = true)]
    pub access_key: Option<String>,

    /// AWS secret access key
    #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// AWS profile name
    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    // === Logging ===
    /// Log level (--quiet and --debug adjust the default)
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Cli {
    /// The settings given explicitly on the command line.
    ///
    /// Switches that were not passed and empty lists stay unset so a config
    /// file can supply them.
    pub fn to_layer(&self) -> ConfigLayer {
        ConfigLayer {
            quiet: self.quiet.then_some(true),
            debug: self.debug.then_some(true),
            summary_only: self.summary.then_some(true),
            test_mode: self.test.then_some(true),
            organization_mode: self.org.then_some(true),
            role_name: self.role.clone(),
            session_name: self.session_name.clone(),
            partition: self.partition.clone(),
            min_size: self.minsize,
            max_size: self.maxsize,
            allow_extensions: non_empty(&self.allowext),
            block_extensions: non_empty(&self.blockext),
            include_accounts: non_empty(&self.include),
            exclude_accounts: non_empty(&self.exclude),
            json_report: self.json.clone(),
            csv_report: self.csv.clone(),
            concurrency: self.concurrency,
            request_timeout_secs: self.request_timeout,
            region: self.region.clone(),
            endpoint: self.endpoint.clone(),
            profile: self.profile.clone(),
        }
    }
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    (!values.is_empty()).then(|| values.to_vec())
}

/// Parse a positive usize (>= 1).
fn parse_positive_usize(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value < 1 {
        return Err(format!("{value} is not in 1.."));
    }
    Ok(value)
}
