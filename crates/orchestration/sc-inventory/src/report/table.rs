//! Flat per-container table.

use std::collections::BTreeSet;

use crate::stats::StatsTree;

/// One (account, container) row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub account: String,
    pub bucket: String,

    /// Bytes per extension, aligned with [`FlatTable::extensions`]
    pub bytes: Vec<u64>,
}

/// Per-container byte counts with one column per observed extension.
///
/// Extension columns are the sorted union over all containers; a container
/// that never saw an extension reports 0 for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatTable {
    pub extensions: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl FlatTable {
    pub fn from_tree(tree: &StatsTree) -> Self {
        let extensions: Vec<String> = tree
            .containers()
            .values()
            .flat_map(|containers| containers.values())
            .flat_map(|bucket| bucket.by_extension().keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let rows = tree
            .containers()
            .iter()
            .flat_map(|(account, containers)| {
                containers.iter().map(|(name, bucket)| TableRow {
                    account: account.clone(),
                    bucket: name.clone(),
                    bytes: extensions.iter().map(|ext| bucket.bytes_for(ext)).collect(),
                })
            })
            .collect();

        Self { extensions, rows }
    }

    pub fn header(&self) -> Vec<String> {
        ["account".to_string(), "bucket".to_string()]
            .into_iter()
            .chain(self.extensions.iter().map(|ext| format!("bytes_{ext}")))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Bytes in `row` for `extension`, if that column exists.
    pub fn cell(&self, row: &TableRow, extension: &str) -> Option<u64> {
        let idx = self.extensions.iter().position(|e| e == extension)?;
        row.bytes.get(idx).copied()
    }
}
