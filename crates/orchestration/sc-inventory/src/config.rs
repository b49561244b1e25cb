//! Configuration types for an inventory run.
//!
//! Settings arrive in layers: command-line values, an optional JSON config
//! file, and built-in defaults. A [`ConfigLayer`] holds one source's explicit
//! settings; [`ConfigLayer::overlay`] lets a higher-precedence layer win
//! field by field, and [`ConfigLayer::resolve`] turns the merged layer into
//! a validated [`ScanConfig`].
//!
//! Precedence is: explicit command-line value > config file > default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use sc_error::{Result, ScError};
use serde::{Deserialize, Serialize};

use crate::aws::AwsConfig;
use crate::filter::{
    AccountFilter, DEFAULT_MAX_SIZE, DEFAULT_MIN_SIZE, ExtensionFilter, FilterPolicy, SizeFilter,
};

/// Role assumed in member accounts unless configured otherwise.
pub const DEFAULT_ROLE_NAME: &str = "OrganizationAccountAccessRole";

/// Session name recorded on assumed-role sessions.
pub const DEFAULT_SESSION_NAME: &str = "storage-census";

/// ARN partition used to build role ARNs.
pub const DEFAULT_PARTITION: &str = "aws";

/// JSON report path used when none is configured.
pub const DEFAULT_JSON_REPORT: &str = "output.json";

/// Per-request timeout for provider calls.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

/// One source of configuration values; unset fields defer to lower layers.
///
/// Field names follow the long option names; the short names used by older
/// config files (`minsize`, `allowext`, `org`, ...) are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigLayer {
    pub quiet: Option<bool>,
    pub debug: Option<bool>,

    #[serde(alias = "summary")]
    pub summary_only: Option<bool>,

    #[serde(alias = "test")]
    pub test_mode: Option<bool>,

    #[serde(alias = "org")]
    pub organization_mode: Option<bool>,

    #[serde(alias = "role")]
    pub role_name: Option<String>,

    pub session_name: Option<String>,
    pub partition: Option<String>,

    #[serde(alias = "minsize")]
    pub min_size: Option<u64>,

    #[serde(alias = "maxsize")]
    pub max_size: Option<u64>,

    #[serde(alias = "allowext")]
    pub allow_extensions: Option<Vec<String>>,

    #[serde(alias = "blockext")]
    pub block_extensions: Option<Vec<String>>,

    #[serde(alias = "include")]
    pub include_accounts: Option<Vec<String>>,

    #[serde(alias = "exclude")]
    pub exclude_accounts: Option<Vec<String>>,

    #[serde(alias = "json")]
    pub json_report: Option<PathBuf>,

    #[serde(alias = "csv")]
    pub csv_report: Option<PathBuf>,

    pub concurrency: Option<usize>,
    pub request_timeout_secs: Option<u64>,

    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub profile: Option<String>,
}

impl ConfigLayer {
    /// Load a layer from a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScError::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_json_str(&content)
            .map_err(|e| ScError::Config(format!("Invalid config file {}: {e}", path.display())))
    }

    /// Parse a layer from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| ScError::Config(e.to_string()))
    }

    /// Merge with a lower-precedence layer; values set here win.
    pub fn overlay(self, lower: ConfigLayer) -> ConfigLayer {
        ConfigLayer {
            quiet: self.quiet.or(lower.quiet),
            debug: self.debug.or(lower.debug),
            summary_only: self.summary_only.or(lower.summary_only),
            test_mode: self.test_mode.or(lower.test_mode),
            organization_mode: self.organization_mode.or(lower.organization_mode),
            role_name: self.role_name.or(lower.role_name),
            session_name: self.session_name.or(lower.session_name),
            partition: self.partition.or(lower.partition),
            min_size: self.min_size.or(lower.min_size),
            max_size: self.max_size.or(lower.max_size),
            allow_extensions: self.allow_extensions.or(lower.allow_extensions),
            block_extensions: self.block_extensions.or(lower.block_extensions),
            include_accounts: self.include_accounts.or(lower.include_accounts),
            exclude_accounts: self.exclude_accounts.or(lower.exclude_accounts),
            json_report: self.json_report.or(lower.json_report),
            csv_report: self.csv_report.or(lower.csv_report),
            concurrency: self.concurrency.or(lower.concurrency),
            request_timeout_secs: self.request_timeout_secs.or(lower.request_timeout_secs),
            region: self.region.or(lower.region),
            endpoint: self.endpoint.or(lower.endpoint),
            profile: self.profile.or(lower.profile),
        }
    }

    /// Fill defaults and validate.
    pub fn resolve(self) -> Result<ScanConfig> {
        let min_size = self.min_size.unwrap_or(DEFAULT_MIN_SIZE);
        let max_size = self.max_size.unwrap_or(DEFAULT_MAX_SIZE);
        if min_size > max_size {
            return Err(ScError::Config(format!(
                "min_size ({min_size}) is greater than max_size ({max_size})"
            )));
        }

        let concurrency = self.concurrency.unwrap_or(1);
        if concurrency == 0 {
            return Err(ScError::Config("concurrency must be >= 1".to_string()));
        }

        let role_name = self.role_name.unwrap_or_else(|| DEFAULT_ROLE_NAME.to_string());
        if role_name.trim().is_empty() {
            return Err(ScError::Config("role name must not be empty".to_string()));
        }

        let filter = FilterPolicy::new(
            SizeFilter::new(min_size, max_size),
            ExtensionFilter::new()
                .with_allowed(self.allow_extensions.unwrap_or_default())
                .with_blocked(self.block_extensions.unwrap_or_default()),
        );

        let accounts = AccountFilter::new()
            .with_included(self.include_accounts.unwrap_or_default())
            .with_excluded(self.exclude_accounts.unwrap_or_default());

        let timeout_secs = self
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let mut aws = AwsConfig::new().with_timeout(timeout_secs);
        if let Some(region) = self.region {
            aws = aws.with_region(region);
        }
        if let Some(endpoint) = self.endpoint {
            aws = aws.with_endpoint(endpoint);
        }
        if let Some(profile) = self.profile {
            aws = aws.with_profile(profile);
        }

        Ok(ScanConfig {
            filter,
            accounts,
            organization_mode: self.organization_mode.unwrap_or(false),
            summary_only: self.summary_only.unwrap_or(false),
            test_mode: self.test_mode.unwrap_or(false),
            role_name,
            session_name: self
                .session_name
                .unwrap_or_else(|| DEFAULT_SESSION_NAME.to_string()),
            partition: self
                .partition
                .unwrap_or_else(|| DEFAULT_PARTITION.to_string()),
            concurrency,
            request_timeout: Duration::from_secs(timeout_secs),
            report: ReportTargets {
                json: Some(
                    self.json_report
                        .unwrap_or_else(|| PathBuf::from(DEFAULT_JSON_REPORT)),
                ),
                csv: self.csv_report,
            },
            quiet: self.quiet.unwrap_or(false),
            debug: self.debug.unwrap_or(false),
            aws,
        })
    }
}

/// Where reports are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportTargets {
    /// Hierarchical JSON document
    pub json: Option<PathBuf>,

    /// Flat CSV table
    pub csv: Option<PathBuf>,
}

/// Resolved configuration for one inventory run.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Per-object acceptance policy
    pub filter: FilterPolicy,

    /// Account include/exclude sets
    pub accounts: AccountFilter,

    /// Enumerate all member accounts instead of just the caller's
    pub organization_mode: bool,

    /// Count containers only, skip object listing
    pub summary_only: bool,

    /// Request only the first page of each container
    pub test_mode: bool,

    /// Role assumed in member accounts
    pub role_name: String,

    /// Session name for assumed roles
    pub session_name: String,

    /// ARN partition (e.g., "aws", "aws-us-gov")
    pub partition: String,

    /// Maximum accounts scanned in parallel
    pub concurrency: usize,

    /// Upper bound on every provider call
    pub request_timeout: Duration,

    pub report: ReportTargets,

    /// Suppress progress output
    pub quiet: bool,

    /// Per-object tracing
    pub debug: bool,

    pub aws: AwsConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            filter: FilterPolicy::default(),
            accounts: AccountFilter::default(),
            organization_mode: false,
            summary_only: false,
            test_mode: false,
            role_name: DEFAULT_ROLE_NAME.to_string(),
            session_name: DEFAULT_SESSION_NAME.to_string(),
            partition: DEFAULT_PARTITION.to_string(),
            concurrency: 1,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            report: ReportTargets {
                json: Some(PathBuf::from(DEFAULT_JSON_REPORT)),
                csv: None,
            },
            quiet: false,
            debug: false,
            aws: AwsConfig::default(),
        }
    }
}

impl ScanConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the object filter policy.
    pub fn with_filter(mut self, filter: FilterPolicy) -> Self {
        self.filter = filter;
        self
    }

    /// Set the account filter.
    pub fn with_accounts(mut self, accounts: AccountFilter) -> Self {
        self.accounts = accounts;
        self
    }

    /// Enable or disable organization mode.
    pub fn with_organization_mode(mut self, enabled: bool) -> Self {
        self.organization_mode = enabled;
        self
    }

    /// Enable or disable summary mode.
    pub fn with_summary_only(mut self, enabled: bool) -> Self {
        self.summary_only = enabled;
        self
    }

    /// Enable or disable test mode.
    pub fn with_test_mode(mut self, enabled: bool) -> Self {
        self.test_mode = enabled;
        self
    }

    /// Set the role assumed in member accounts.
    pub fn with_role_name(mut self, role_name: impl Into<String>) -> Self {
        self.role_name = role_name.into();
        self
    }

    /// Set the account worker pool size.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set the per-call timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
