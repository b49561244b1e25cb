//! Hierarchical JSON projection of a stats tree.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::stats::{CounterBucket, StatsTree};

/// Serialized form of one [`CounterBucket`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BucketDocument {
    pub files: u64,

    #[serde(rename = "files.ext")]
    pub files_by_ext: BTreeMap<String, u64>,

    pub size: u64,

    #[serde(rename = "size.ext")]
    pub size_by_ext: BTreeMap<String, u64>,
}

impl From<&CounterBucket> for BucketDocument {
    fn from(bucket: &CounterBucket) -> Self {
        let (files_by_ext, size_by_ext) = bucket
            .by_extension()
            .iter()
            .map(|(ext, tally)| ((ext.clone(), tally.files), (ext.clone(), tally.bytes)))
            .unzip();

        Self {
            files: bucket.total_files(),
            files_by_ext,
            size: bucket.total_bytes(),
            size_by_ext,
        }
    }
}

/// The full report document.
///
/// Fields are declared in key order so the output is sorted, matching the
/// ordered maps inside.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportDocument {
    pub account: BTreeMap<String, BucketDocument>,

    #[serde(rename = "account.bucket")]
    pub account_bucket: BTreeMap<String, BTreeMap<String, BucketDocument>>,

    /// Present only when summary mode counted containers
    #[serde(rename = "account.containers", skip_serializing_if = "BTreeMap::is_empty")]
    pub account_containers: BTreeMap<String, usize>,

    pub errors: Vec<String>,

    pub total: BucketDocument,
}

impl From<&StatsTree> for ReportDocument {
    fn from(tree: &StatsTree) -> Self {
        Self {
            account: tree
                .accounts()
                .iter()
                .map(|(id, bucket)| (id.clone(), bucket.into()))
                .collect(),
            account_bucket: tree
                .containers()
                .iter()
                .map(|(id, containers)| {
                    let containers = containers
                        .iter()
                        .map(|(name, bucket)| (name.clone(), bucket.into()))
                        .collect();
                    (id.clone(), containers)
                })
                .collect(),
            account_containers: tree.container_counts().clone(),
            errors: tree.errors().to_vec(),
            total: tree.global().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scenario() -> StatsTree {
        let mut tree = StatsTree::new();
        tree.ensure_container("100", "bkt1");
        tree.record_object("100", "bkt1", 10, "txt");
        tree.record_object("100", "bkt1", 20, "csv");
        tree.ensure_account("200");
        tree.record_error("Couldn't list buckets for account:200 (AccessDenied)");
        tree
    }

    #[test]
    fn test_document_layout() {
        let value = serde_json::to_value(ReportDocument::from(&scenario())).unwrap();

        assert_eq!(
            value,
            json!({
                "account": {
                    "100": {"files": 2, "files.ext": {"csv": 1, "txt": 1}, "size": 30, "size.ext": {"csv": 20, "txt": 10}},
                    "200": {"files": 0, "files.ext": {}, "size": 0, "size.ext": {}}
                },
                "account.bucket": {
                    "100": {"bkt1": {"files": 2, "files.ext": {"csv": 1, "txt": 1}, "size": 30, "size.ext": {"csv": 20, "txt": 10}}},
                    "200": {}
                },
                "errors": ["Couldn't list buckets for account:200 (AccessDenied)"],
                "total": {"files": 2, "files.ext": {"csv": 1, "txt": 1}, "size": 30, "size.ext": {"csv": 20, "txt": 10}}
            })
        );
    }

    #[test]
    fn test_serialized_keys_are_sorted() {
        let text = serde_json::to_string(&ReportDocument::from(&scenario())).unwrap();

        let positions: Vec<usize> = ["\"account\"", "\"account.bucket\"", "\"errors\"", "\"total\""]
            .iter()
            .map(|key| text.find(key).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_container_counts_only_when_present() {
        let mut tree = StatsTree::new();
        tree.ensure_account("100");
        let value = serde_json::to_value(ReportDocument::from(&tree)).unwrap();
        assert!(value.get("account.containers").is_none());

        tree.record_container_count("100", 3);
        let value = serde_json::to_value(ReportDocument::from(&tree)).unwrap();
        assert_eq!(value["account.containers"], json!({"100": 3}));
    }

    #[test]
    fn test_empty_extension_key() {
        let mut tree = StatsTree::new();
        tree.record_object("100", "b", 5, "");

        let doc = ReportDocument::from(&tree);
        assert_eq!(doc.total.size_by_ext[""], 5);
        assert_eq!(doc.total.files_by_ext[""], 1);
    }
}
