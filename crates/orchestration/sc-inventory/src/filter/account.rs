//! Account include/exclude filtering.

use std::collections::BTreeSet;

/// Decides which accounts are scanned at all.
///
/// A non-empty include-set is a whitelist; the exclude-set is applied after
/// it. Evaluated once per account, before any container is listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountFilter {
    include: BTreeSet<String>,
    exclude: BTreeSet<String>,
}

impl AccountFilter {
    /// Create a filter that accepts every account.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only scan these accounts.
    pub fn with_included<I, S>(mut self, accounts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = accounts.into_iter().map(Into::into).collect();
        self
    }

    /// Never scan these accounts.
    pub fn with_excluded<I, S>(mut self, accounts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = accounts.into_iter().map(Into::into).collect();
        self
    }

    /// Check whether an account should be scanned.
    pub fn accepts(&self, account_id: &str) -> bool {
        if !self.include.is_empty() && !self.include.contains(account_id) {
            return false;
        }
        !self.exclude.contains(account_id)
    }

    /// Check if this filter has any constraints.
    pub fn has_constraints(&self) -> bool {
        !self.include.is_empty() || !self.exclude.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_constraints() {
        let filter = AccountFilter::new();
        assert!(filter.accepts("100"));
        assert!(!filter.has_constraints());
    }

    #[test]
    fn test_include_is_whitelist() {
        let filter = AccountFilter::new().with_included(["100"]);
        assert!(filter.accepts("100"));
        assert!(!filter.accepts("200"));
    }

    #[test]
    fn test_exclude_is_blacklist() {
        let filter = AccountFilter::new().with_excluded(["200"]);
        assert!(filter.accepts("100"));
        assert!(!filter.accepts("200"));
    }

    #[test]
    fn test_exclude_applies_after_include() {
        let filter = AccountFilter::new()
            .with_included(["100", "200"])
            .with_excluded(["200"]);
        assert!(filter.accepts("100"));
        assert!(!filter.accepts("200"));
        assert!(!filter.accepts("300"));
        assert!(filter.has_constraints());
    }
}
