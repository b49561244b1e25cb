//! Report writers.
//!
//! - [`ReportDocument`] - hierarchical JSON, pretty-printed with sorted keys
//! - [`FlatTable`] - one CSV row per (account, container)

mod document;
mod table;

pub use document::{BucketDocument, ReportDocument};
pub use table::{FlatTable, TableRow};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use sc_error::Result;
use tracing::{info, warn};

use crate::config::ReportTargets;
use crate::stats::StatsTree;

/// Write the JSON document to `path`.
pub fn write_json(tree: &StatsTree, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &ReportDocument::from(tree))?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!(path = %path.display(), "Wrote JSON report");
    Ok(())
}

/// Write the flat table to `path`.
///
/// Returns `false` without creating the file when there are no rows.
pub fn write_csv(tree: &StatsTree, path: &Path) -> Result<bool> {
    let table = FlatTable::from_tree(tree);
    if table.is_empty() {
        warn!(path = %path.display(), "No container rows, skipping CSV report");
        return Ok(false);
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.header())?;
    for row in &table.rows {
        let record = [row.account.clone(), row.bucket.clone()]
            .into_iter()
            .chain(row.bytes.iter().map(u64::to_string));
        writer.write_record(record)?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = table.rows.len(), "Wrote CSV report");
    Ok(true)
}

/// Write every configured report.
pub fn write_reports(tree: &StatsTree, targets: &ReportTargets) -> Result<()> {
    if let Some(path) = &targets.json {
        write_json(tree, path)?;
    }
    if let Some(path) = &targets.csv {
        write_csv(tree, path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn scenario() -> StatsTree {
        let mut tree = StatsTree::new();
        tree.ensure_container("100", "bkt1");
        tree.record_object("100", "bkt1", 10, "txt");
        tree.record_object("100", "bkt1", 20, "csv");
        tree.ensure_account("200");
        tree.record_error("Couldn't list buckets for account:200 (AccessDenied)");
        tree.complete();
        tree
    }

    #[test]
    fn test_write_json_pretty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("output.json");

        write_json(&scenario(), &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n    \"account\": {"));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["total"]["size"], 30);
        assert_eq!(value["account"]["200"]["files"], 0);
        assert_eq!(value["errors"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_write_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("output.csv");

        assert!(write_csv(&scenario(), &path).unwrap());

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "account,bucket,bytes_csv,bytes_txt\n100,bkt1,20,10\n");
    }

    #[test]
    fn test_empty_csv_is_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("output.csv");
        let mut tree = StatsTree::new();
        tree.ensure_account("100");

        assert!(!write_csv(&tree, &path).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_write_reports_targets() {
        let dir = TempDir::new().unwrap();
        let targets = ReportTargets {
            json: Some(dir.path().join("r.json")),
            csv: Some(dir.path().join("r.csv")),
        };

        write_reports(&scenario(), &targets).unwrap();

        assert!(dir.path().join("r.json").exists());
        assert!(dir.path().join("r.csv").exists());
    }

    #[test]
    fn test_unwritable_path_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.json");

        assert!(write_json(&scenario(), &path).is_err());
    }
}
