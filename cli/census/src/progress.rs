//! Periodic progress lines for storage-census.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use sc_cli_common::{format_bytes, format_number};
use sc_inventory::{ProgressSnapshot, SharedStats};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Prints a `[Progress]` line to stderr at a fixed interval while a scan runs.
pub struct ProgressReporter {
    enabled: bool,
    interval: Duration,
    stats: SharedStats,
    stop: CancellationToken,
    start_time: Instant,
    handle: Option<JoinHandle<()>>,
}

impl ProgressReporter {
    pub fn new(enabled: bool, interval_secs: u64, stats: SharedStats) -> Self {
        Self {
            enabled,
            interval: Duration::from_secs(interval_secs.max(1)),
            stats,
            stop: CancellationToken::new(),
            start_time: Instant::now(),
            handle: None,
        }
    }

    /// Start the background reporter task.
    pub fn start(&mut self) {
        if !self.enabled {
            return;
        }

        let stats = self.stats.clone();
        let stop = self.stop.clone();
        let interval = self.interval;
        let start_time = self.start_time;

        self.handle = Some(tokio::spawn(async move {
            let mut timer = tokio::time::interval(interval);
            timer.tick().await; // first tick fires immediately

            loop {
                tokio::select! {
                    _ = stop.cancelled() => break,
                    _ = timer.tick() => print_line("", stats.progress(), start_time.elapsed()),
                }
            }
        }));
    }

    /// Stop the reporter and print the final line.
    pub async fn stop(mut self) {
        if !self.enabled {
            return;
        }

        self.stop.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }

        print_line("Complete: ", self.stats.progress(), self.start_time.elapsed());
    }
}

fn print_line(prefix: &str, progress: ProgressSnapshot, elapsed: Duration) {
    let _ = writeln!(
        io::stderr(),
        "[Progress] {prefix}{} accounts, {} buckets, {} objects listed, {} files / {} counted, {} errors ({:.1}s elapsed)",
        progress.accounts,
        progress.containers,
        format_number(progress.objects_seen),
        format_number(progress.files),
        format_bytes(progress.bytes),
        progress.errors,
        elapsed.as_secs_f64()
    );
}
