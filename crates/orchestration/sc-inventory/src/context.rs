//! Per-scan shared state: stats handle, timeout and cancellation.

use std::future::Future;
use std::time::Duration;

use sc_error::{Result, ScError};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::stats::SharedStats;

/// State shared by every step of one scan.
#[derive(Debug, Clone)]
pub struct ScanContext {
    pub stats: SharedStats,
    cancel: CancellationToken,
    request_timeout: Duration,
}

impl ScanContext {
    pub fn new(stats: SharedStats, cancel: CancellationToken, request_timeout: Duration) -> Self {
        Self {
            stats,
            cancel,
            request_timeout,
        }
    }

    /// Check whether the scan should stop issuing requests.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Run one provider call, bounded by the request timeout and by
    /// cancellation.
    pub async fn call<T, F>(&self, operation: &str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(ScError::Cancelled),
            res = tokio::time::timeout(self.request_timeout, fut) => match res {
                Ok(inner) => inner,
                Err(_) => Err(ScError::Timeout {
                    operation: operation.to_string(),
                    secs: self.request_timeout.as_secs(),
                }),
            },
        }
    }

    /// Log a recoverable error and append it to the error log.
    ///
    /// Cancellation is recorded once by the scanner, not per interrupted call.
    pub fn record(&self, error: ScError) {
        if matches!(error, ScError::Cancelled) {
            return;
        }
        warn!(error = %error, "Recorded scan error");
        self.stats.record_error(error);
    }
}
