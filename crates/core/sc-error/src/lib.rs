//! Error types and classification for storage-census.
//!
//! This crate provides:
//! - [`ScError`] - Top-level error enum covering every failure a scan can hit
//! - [`ErrorCategory`] for deciding whether a failure aborts the run
//! - [`classify_error`] mapping each error kind to its category
//!
//! Only a failure to resolve the caller's own account (and configuration or
//! report I/O problems before/after the scan) is fatal. Everything else is
//! recorded in the scan's error log and traversal continues.

use thiserror::Error;

/// Top-level error type for storage-census.
#[derive(Error, Debug)]
pub enum ScError {
    /// The caller's own account could not be determined
    #[error("Couldn't determine caller identity: {0}")]
    Identity(String),

    /// Member accounts of the organization could not be listed
    #[error("Couldn't list accounts in organization ({0})")]
    Organization(String),

    /// Scoped credentials could not be obtained for an account
    #[error("Couldn't assume role for account {account} ({message})")]
    RoleAssumption { account: String, message: String },

    /// Containers (buckets) could not be listed for an account
    #[error("Couldn't list buckets for account:{account} ({message})")]
    ContainerList { account: String, message: String },

    /// Objects could not be listed for one container
    #[error("Couldn't get bucket objects for account:{account}, bucket:{container} ({message})")]
    ObjectList {
        account: String,
        container: String,
        message: String,
    },

    /// Provider broke the pagination contract (e.g. truncated without a token)
    #[error("Pagination stopped for account:{account}, bucket:{container} ({message})")]
    Pagination {
        account: String,
        container: String,
        message: String,
    },

    /// A provider call exceeded the configured request timeout
    #[error("Timed out after {secs}s: {operation}")]
    Timeout { operation: String, secs: u64 },

    /// The scan was cut short by a cancellation request
    #[error("Scan cancelled before completion")]
    Cancelled,

    /// Raw failure reported by an external service, before scan context is attached
    #[error("{0}")]
    Service(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Report file I/O
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialization
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Generic errors (wrapped anyhow)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<serde_json::Error> for ScError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

impl From<csv::Error> for ScError {
    fn from(error: csv::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

impl ScError {
    /// Wrap any displayable provider failure.
    pub fn service(error: impl std::fmt::Display) -> Self {
        Self::Service(error.to_string())
    }

    /// Check if this error aborts the run.
    pub fn is_fatal(&self) -> bool {
        classify_error(self) == ErrorCategory::Fatal
    }
}

/// Error classification for propagation decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Abort the run
    ///
    /// Examples: caller identity unknown, invalid configuration
    Fatal,

    /// Record in the error log, contribute nothing, continue with the next unit
    ///
    /// Examples: role assumption denied, bucket listing denied
    Recoverable,
}

/// Classifies an error to determine whether the scan can continue.
pub fn classify_error(error: &ScError) -> ErrorCategory {
    match error {
        ScError::Identity(_) => ErrorCategory::Fatal,
        ScError::Config(_) => ErrorCategory::Fatal,
        ScError::Io(_) => ErrorCategory::Fatal,
        ScError::Serialization(_) => ErrorCategory::Fatal,
        ScError::Organization(_)
        | ScError::RoleAssumption { .. }
        | ScError::ContainerList { .. }
        | ScError::ObjectList { .. }
        | ScError::Pagination { .. }
        | ScError::Timeout { .. }
        | ScError::Cancelled
        | ScError::Service(_)
        | ScError::Other(_) => ErrorCategory::Recoverable,
    }
}

/// Result type alias using ScError.
pub type Result<T> = std::result::Result<T, ScError>;
