//! Allow/block filtering on file extensions.

use std::collections::BTreeSet;

use sc_types::ObjectRecord;

use super::Filter;
use crate::extension;

/// Filters objects by their normalized extension.
///
/// A non-empty allow-set is a whitelist. The block-set is applied after it,
/// so an extension present in both sets is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter {
    allow: BTreeSet<String>,
    block: BTreeSet<String>,
}

impl ExtensionFilter {
    /// Create a filter that accepts every extension.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the allowed extensions (normalized to lowercase, no leading dot).
    pub fn with_allowed<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allow = extensions
            .into_iter()
            .map(|e| extension::normalize(e.as_ref()))
            .collect();
        self
    }

    /// Set the blocked extensions (normalized to lowercase, no leading dot).
    pub fn with_blocked<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.block = extensions
            .into_iter()
            .map(|e| extension::normalize(e.as_ref()))
            .collect();
        self
    }

    /// Check an already-extracted extension.
    pub fn matches_extension(&self, extension: &str) -> bool {
        if !self.allow.is_empty() && !self.allow.contains(extension) {
            return false;
        }
        !self.block.contains(extension)
    }

    pub fn allowed(&self) -> &BTreeSet<String> {
        &self.allow
    }

    pub fn blocked(&self) -> &BTreeSet<String> {
        &self.block
    }
}

impl Filter for ExtensionFilter {
    fn matches(&self, obj: &ObjectRecord) -> bool {
        self.matches_extension(&extension::extract(&obj.key))
    }

    fn description(&self) -> String {
        let join = |set: &BTreeSet<String>| set.iter().cloned().collect::<Vec<_>>().join(",");
        match (self.allow.is_empty(), self.block.is_empty()) {
            (true, true) => "ext(any)".to_string(),
            (false, true) => format!("ext(allow={})", join(&self.allow)),
            (true, false) => format!("ext(block={})", join(&self.block)),
            (false, false) => format!(
                "ext(allow={}, block={})",
                join(&self.allow),
                join(&self.block)
            ),
        }
    }
}
