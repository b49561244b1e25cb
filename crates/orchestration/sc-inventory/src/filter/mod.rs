//! Object and account filtering.
//!
//! - [`SizeFilter`] - inclusive byte bounds
//! - [`ExtensionFilter`] - allow/block extension sets
//! - [`FilterPolicy`] - the per-object policy applied during listing
//! - [`AccountFilter`] - include/exclude sets applied once per account

mod account;
mod extension;
mod size;

pub use account::AccountFilter;
pub use extension::ExtensionFilter;
pub use size::{DEFAULT_MAX_SIZE, DEFAULT_MIN_SIZE, SizeFilter};

use sc_types::ObjectRecord;

/// A predicate over discovered objects.
pub trait Filter: Send + Sync {
    /// Check if an object passes this filter.
    fn matches(&self, obj: &ObjectRecord) -> bool;

    /// Short human-readable description for logging.
    fn description(&self) -> String;
}

/// The per-object acceptance policy.
///
/// Evaluates, in order: size upper bound, size lower bound, allow-set
/// membership, block-set membership.
///
/// # Example
///
/// ```
/// use sc_inventory::filter::{ExtensionFilter, FilterPolicy, SizeFilter};
///
/// let policy = FilterPolicy::new(
///     SizeFilter::new(1, 1024),
///     ExtensionFilter::new().with_blocked(["tmp"]),
/// );
///
/// assert!(policy.accept(10, "csv"));
/// assert!(!policy.accept(10, "tmp"));
/// assert!(!policy.accept(2048, "csv"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPolicy {
    size: SizeFilter,
    extensions: ExtensionFilter,
}

impl FilterPolicy {
    pub fn new(size: SizeFilter, extensions: ExtensionFilter) -> Self {
        Self { size, extensions }
    }

    /// A policy that accepts every object.
    pub fn accept_all() -> Self {
        Self::new(SizeFilter::unbounded(), ExtensionFilter::new())
    }

    /// Check an object's size and already-extracted extension.
    pub fn accept(&self, size: u64, extension: &str) -> bool {
        self.size.matches_size(size) && self.extensions.matches_extension(extension)
    }

    pub fn size(&self) -> &SizeFilter {
        &self.size
    }

    pub fn extensions(&self) -> &ExtensionFilter {
        &self.extensions
    }
}

impl Filter for FilterPolicy {
    fn matches(&self, obj: &ObjectRecord) -> bool {
        self.accept(obj.size, &crate::extension::extract(&obj.key))
    }

    fn description(&self) -> String {
        format!(
            "{} AND {}",
            self.size.description(),
            self.extensions.description()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> FilterPolicy {
        FilterPolicy::new(
            SizeFilter::new(10, 100),
            ExtensionFilter::new()
                .with_allowed(["csv", "txt"])
                .with_blocked(["txt"]),
        )
    }

    #[test]
    fn test_size_boundaries() {
        let policy = policy();

        assert!(policy.accept(10, "csv"));
        assert!(policy.accept(100, "csv"));
        assert!(!policy.accept(9, "csv"));
        assert!(!policy.accept(101, "csv"));
    }

    #[test]
    fn test_block_wins() {
        assert!(!policy().accept(50, "txt"));
    }

    #[test]
    fn test_allow_set_rejects_others() {
        assert!(!policy().accept(50, "json"));
    }

    #[test]
    fn test_matches_object() {
        let policy = policy();

        assert!(policy.matches(&ObjectRecord::new("a/b/report.CSV", 50)));
        assert!(!policy.matches(&ObjectRecord::new("a/b/notes.txt", 50)));
    }

    #[test]
    fn test_accept_all() {
        let policy = FilterPolicy::accept_all();

        assert!(policy.accept(0, ""));
        assert!(policy.accept(u64::MAX, "anything"));
    }

    #[test]
    fn test_description() {
        let desc = policy().description();
        assert!(desc.contains("size(min=10B, max=100B)"));
        assert!(desc.contains("block=txt"));
    }
}
