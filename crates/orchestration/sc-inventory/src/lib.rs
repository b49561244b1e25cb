//! sc-inventory - multi-account object storage inventory for storage-census.
//!
//! This crate walks every reachable account, every container in it and every
//! object in each container, and aggregates byte and file counts by file
//! extension at three levels. It supports:
//!
//! - Organization-wide account enumeration or a single-account run
//! - Cross-account role assumption with per-account scoped credentials
//! - Size and extension filters, plus account include/exclude lists
//! - Bounded parallelism across accounts with a shared, lock-guarded tally
//! - Per-request timeouts and cooperative cancellation
//! - Hierarchical JSON and flat CSV reports
//!
//! # Example
//!
//! ```ignore
//! use sc_inventory::{AwsServices, ConfigLayer, Scanner};
//! use sc_inventory::report::write_reports;
//!
//! let config = ConfigLayer::from_json_file("census.json".as_ref())?.resolve()?;
//! let services = AwsServices::connect(&config.aws).await;
//!
//! let scanner = Scanner::new(
//!     services.identity,
//!     services.organization,
//!     services.storage,
//!     config.clone(),
//! );
//!
//! let stats = scanner.scan().await?;
//! write_reports(&stats, &config.report)?;
//! eprintln!("Counted {} files", stats.global().total_files());
//! ```

pub mod accounts;
pub mod aws;
pub mod config;
pub mod containers;
pub mod context;
pub mod credentials;
pub mod extension;
pub mod filter;
pub mod report;
pub mod scanner;
pub mod stats;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use aws::{AwsConfig, AwsServices};
pub use config::{ConfigLayer, ReportTargets, ScanConfig};
pub use context::ScanContext;
pub use filter::{AccountFilter, ExtensionFilter, Filter, FilterPolicy, SizeFilter};
pub use scanner::Scanner;
pub use stats::{CounterBucket, ExtensionTally, ProgressSnapshot, SharedStats, StatsTree};
