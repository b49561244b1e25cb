//! Aggregate counters for inventory runs.
//!
//! A [`StatsTree`] holds one global [`CounterBucket`], one per scanned
//! account and one per (account, container) pair, plus the ordered error log.
//! Concurrent account workers share it through [`SharedStats`], which takes a
//! single lock per mutation so the three levels never disagree.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Byte and file counts for one extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionTally {
    pub bytes: u64,
    pub files: u64,
}

/// Byte/file totals, overall and broken down by extension.
///
/// Invariant: `total_bytes` and `total_files` always equal the sums over
/// `by_extension`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterBucket {
    total_bytes: u64,
    total_files: u64,
    by_extension: BTreeMap<String, ExtensionTally>,
}

impl CounterBucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one object of `size` bytes with the given extension.
    pub fn accumulate(&mut self, size: u64, extension: &str) {
        self.total_bytes = self.total_bytes.saturating_add(size);
        self.total_files = self.total_files.saturating_add(1);

        let tally = self.by_extension.entry(extension.to_string()).or_default();
        tally.bytes = tally.bytes.saturating_add(size);
        tally.files = tally.files.saturating_add(1);
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn total_files(&self) -> u64 {
        self.total_files
    }

    pub fn by_extension(&self) -> &BTreeMap<String, ExtensionTally> {
        &self.by_extension
    }

    /// Bytes counted for an extension, 0 if never seen.
    pub fn bytes_for(&self, extension: &str) -> u64 {
        self.by_extension.get(extension).map_or(0, |t| t.bytes)
    }

    /// Files counted for an extension, 0 if never seen.
    pub fn files_for(&self, extension: &str) -> u64 {
        self.by_extension.get(extension).map_or(0, |t| t.files)
    }

    pub fn is_empty(&self) -> bool {
        self.total_files == 0
    }
}

/// Statistics collected during an inventory run.
#[derive(Debug, Clone, Default)]
pub struct StatsTree {
    /// When the scan started
    pub started_at: Option<DateTime<Utc>>,

    /// When the scan completed
    pub completed_at: Option<DateTime<Utc>>,

    global: CounterBucket,
    accounts: BTreeMap<String, CounterBucket>,
    containers: BTreeMap<String, BTreeMap<String, CounterBucket>>,

    /// Container counts recorded in summary mode
    container_counts: BTreeMap<String, usize>,

    objects_seen: u64,
    objects_filtered: u64,
    errors: Vec<String>,
}

impl StatsTree {
    /// Create an empty tree with the current time as start time.
    pub fn new() -> Self {
        Self {
            started_at: Some(Utc::now()),
            ..Default::default()
        }
    }

    /// Mark the scan as complete with the current time.
    pub fn complete(&mut self) {
        self.completed_at = Some(Utc::now());
    }

    /// Zero-initialize an account so it shows up even if nothing matches.
    pub fn ensure_account(&mut self, account_id: &str) {
        self.accounts.entry(account_id.to_string()).or_default();
        self.containers.entry(account_id.to_string()).or_default();
    }

    /// Zero-initialize an (account, container) bucket.
    pub fn ensure_container(&mut self, account_id: &str, container: &str) {
        self.ensure_account(account_id);
        if let Some(containers) = self.containers.get_mut(account_id) {
            containers.entry(container.to_string()).or_default();
        }
    }

    /// Count an accepted object at all three levels.
    pub fn record_object(&mut self, account_id: &str, container: &str, size: u64, extension: &str) {
        self.objects_seen += 1;
        self.global.accumulate(size, extension);
        self.accounts
            .entry(account_id.to_string())
            .or_default()
            .accumulate(size, extension);
        self.containers
            .entry(account_id.to_string())
            .or_default()
            .entry(container.to_string())
            .or_default()
            .accumulate(size, extension);
    }

    /// Count an object that the filter policy rejected.
    pub fn record_filtered(&mut self) {
        self.objects_seen += 1;
        self.objects_filtered += 1;
    }

    /// Record the number of containers found for an account (summary mode).
    pub fn record_container_count(&mut self, account_id: &str, count: usize) {
        self.container_counts.insert(account_id.to_string(), count);
    }

    /// Append to the error log.
    pub fn record_error(&mut self, error: impl ToString) {
        self.errors.push(error.to_string());
    }

    pub fn global(&self) -> &CounterBucket {
        &self.global
    }

    pub fn account(&self, account_id: &str) -> Option<&CounterBucket> {
        self.accounts.get(account_id)
    }

    pub fn container(&self, account_id: &str, container: &str) -> Option<&CounterBucket> {
        self.containers.get(account_id)?.get(container)
    }

    pub fn accounts(&self) -> &BTreeMap<String, CounterBucket> {
        &self.accounts
    }

    pub fn containers(&self) -> &BTreeMap<String, BTreeMap<String, CounterBucket>> {
        &self.containers
    }

    pub fn container_counts(&self) -> &BTreeMap<String, usize> {
        &self.container_counts
    }

    /// Number of (account, container) buckets.
    pub fn container_total(&self) -> usize {
        self.containers.values().map(BTreeMap::len).sum()
    }

    pub fn objects_seen(&self) -> u64 {
        self.objects_seen
    }

    pub fn objects_filtered(&self) -> u64 {
        self.objects_filtered
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Get the duration of the scan.
    pub fn duration(&self) -> Option<Duration> {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// Calculate the throughput in objects per second.
    pub fn objects_per_second(&self) -> Option<f64> {
        self.duration().map(|d| {
            let secs = d.num_milliseconds() as f64 / 1000.0;
            if secs > 0.0 {
                self.objects_seen as f64 / secs
            } else {
                0.0
            }
        })
    }
}

/// Point-in-time totals for progress reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub accounts: usize,
    pub containers: usize,
    pub objects_seen: u64,
    pub files: u64,
    pub bytes: u64,
    pub errors: usize,
}

/// Thread-safe handle to a [`StatsTree`] shared by account workers.
///
/// Every method takes the lock exactly once, so a `record_object` is applied
/// to the global, account and container buckets as one step.
#[derive(Debug, Clone, Default)]
pub struct SharedStats {
    inner: Arc<Mutex<StatsTree>>,
}

impl SharedStats {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(StatsTree::new())),
        }
    }

    pub fn ensure_account(&self, account_id: &str) {
        self.inner.lock().ensure_account(account_id);
    }

    pub fn ensure_container(&self, account_id: &str, container: &str) {
        self.inner.lock().ensure_container(account_id, container);
    }

    pub fn record_object(&self, account_id: &str, container: &str, size: u64, extension: &str) {
        self.inner
            .lock()
            .record_object(account_id, container, size, extension);
    }

    pub fn record_filtered(&self) {
        self.inner.lock().record_filtered();
    }

    pub fn record_container_count(&self, account_id: &str, count: usize) {
        self.inner.lock().record_container_count(account_id, count);
    }

    pub fn record_error(&self, error: impl ToString) {
        self.inner.lock().record_error(error);
    }

    pub fn complete(&self) {
        self.inner.lock().complete();
    }

    /// Current totals without cloning the tree.
    pub fn progress(&self) -> ProgressSnapshot {
        let tree = self.inner.lock();
        ProgressSnapshot {
            accounts: tree.accounts.len(),
            containers: tree.container_total(),
            objects_seen: tree.objects_seen,
            files: tree.global.total_files(),
            bytes: tree.global.total_bytes(),
            errors: tree.errors.len(),
        }
    }

    /// Clone the current state of the tree.
    pub fn snapshot(&self) -> StatsTree {
        self.inner.lock().clone()
    }

    /// Take the tree out, cloning only if other handles are still alive.
    pub fn into_inner(self) -> StatsTree {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => mutex.into_inner(),
            Err(shared) => shared.lock().clone(),
        }
    }
}
