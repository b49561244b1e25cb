//! Size-based object filtering.

use sc_types::ObjectRecord;

use super::Filter;

/// Default lower bound: empty objects are not counted.
pub const DEFAULT_MIN_SIZE: u64 = 1;

/// Default upper bound: 32 MiB.
pub const DEFAULT_MAX_SIZE: u64 = 32 * 1024 * 1024;

/// Inclusive byte bounds on object size.
///
/// An object passes if `min_size <= size <= max_size`. The upper bound is
/// checked first.
///
/// # Example
///
/// ```
/// use sc_inventory::filter::SizeFilter;
///
/// let filter = SizeFilter::new(1024, 4096);
/// assert!(filter.matches_size(1024));
/// assert!(filter.matches_size(4096));
/// assert!(!filter.matches_size(4097));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeFilter {
    min_size: u64,
    max_size: u64,
}

impl Default for SizeFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SIZE, DEFAULT_MAX_SIZE)
    }
}

impl SizeFilter {
    /// Create a size filter with both bounds.
    pub fn new(min_size: u64, max_size: u64) -> Self {
        Self { min_size, max_size }
    }

    /// A filter that accepts every size.
    pub fn unbounded() -> Self {
        Self::new(0, u64::MAX)
    }

    /// Check if a size falls within the bounds.
    pub fn matches_size(&self, size: u64) -> bool {
        if size > self.max_size {
            return false;
        }
        if size < self.min_size {
            return false;
        }
        true
    }

    pub fn min_size(&self) -> u64 {
        self.min_size
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }
}

impl Filter for SizeFilter {
    fn matches(&self, obj: &ObjectRecord) -> bool {
        self.matches_size(obj.size)
    }

    fn description(&self) -> String {
        format!(
            "size(min={}, max={})",
            format_size(self.min_size),
            format_size(self.max_size)
        )
    }
}

/// Format a size in bytes as a short human-readable string.
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;

    if bytes == u64::MAX {
        "unbounded".to_string()
    } else if bytes >= GB {
        format!("{:.1}GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1}MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1}KB", bytes as f64 / KB as f64)
    } else {
        format!("{}B", bytes)
    }
}
