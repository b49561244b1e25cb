//! Full scan and report pipeline over the in-memory fakes.

use crate::common::{org_config, two_account_scanner};
use sc_inventory::report::{FlatTable, write_reports};
use sc_inventory::{AccountFilter, ConfigLayer, ReportTargets};
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn test_two_account_scenario_reports() {
    let dir = TempDir::new().unwrap();
    let targets = ReportTargets {
        json: Some(dir.path().join("output.json")),
        csv: Some(dir.path().join("output.csv")),
    };

    let stats = two_account_scanner(org_config()).scan().await.unwrap();
    write_reports(&stats, &targets).unwrap();

    // Global and per-account totals
    assert_eq!(stats.global().total_bytes(), 30);
    assert_eq!(stats.global().total_files(), 2);
    assert_eq!(stats.account("100").unwrap().total_bytes(), 30);
    assert_eq!(stats.account("200").unwrap().total_bytes(), 0);
    assert_eq!(stats.errors().len(), 1);
    assert!(stats.errors()[0].contains("200"));

    // JSON document
    let doc: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("output.json")).unwrap()).unwrap();
    assert_eq!(
        doc["total"],
        json!({"files": 2, "files.ext": {"csv": 1, "txt": 1}, "size": 30, "size.ext": {"csv": 20, "txt": 10}})
    );
    assert_eq!(doc["account"]["200"]["files"], 0);
    assert_eq!(doc["account.bucket"]["100"]["bkt1"]["size"], 30);
    assert_eq!(doc["account.bucket"]["200"], json!({}));
    assert_eq!(
        doc["errors"],
        json!(["Couldn't list buckets for account:200 (AccessDenied: s3:ListAllMyBuckets)"])
    );

    // CSV: exactly one data row for 100/bkt1
    let mut reader = csv::Reader::from_path(dir.path().join("output.csv")).unwrap();
    let header: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
    assert_eq!(header, vec!["account", "bucket", "bytes_csv", "bytes_txt"]);

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][0], "100");
    assert_eq!(&rows[0][1], "bkt1");
    assert_eq!(&rows[0][2], "20");
    assert_eq!(&rows[0][3], "10");
}

#[tokio::test]
async fn test_excluded_account_leaves_no_trace() {
    let config = org_config().with_accounts(AccountFilter::new().with_excluded(["200"]));

    let stats = two_account_scanner(config).scan().await.unwrap();

    assert!(stats.account("200").is_none());
    assert!(!stats.has_errors());
    assert_eq!(FlatTable::from_tree(&stats).rows.len(), 1);
}

#[tokio::test]
async fn test_summary_mode_document() {
    let stats = two_account_scanner(org_config().with_summary_only(true))
        .scan()
        .await
        .unwrap();

    let doc = serde_json::to_value(sc_inventory::report::ReportDocument::from(&stats)).unwrap();

    assert_eq!(doc["account.containers"], json!({"100": 1, "200": 0}));
    assert_eq!(doc["total"]["files"], 0);
    assert!(FlatTable::from_tree(&stats).is_empty());
}

#[tokio::test]
async fn test_config_file_drives_scan() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("census.json");
    fs::write(
        &path,
        r#"{"org": true, "minsize": 15, "blockext": [".TXT"], "include": ["100"], "csv": "rows.csv"}"#,
    )
    .unwrap();

    let config = ConfigLayer::from_json_file(&path).unwrap().resolve().unwrap();
    assert_eq!(config.report.csv.as_deref(), Some(std::path::Path::new("rows.csv")));
    assert_eq!(config.report.json.as_deref(), Some(std::path::Path::new("output.json")));

    let stats = two_account_scanner(config).scan().await.unwrap();

    // x.txt is blocked and too small; y.csv passes; 200 is not included
    assert_eq!(stats.global().total_bytes(), 20);
    assert_eq!(stats.global().bytes_for("txt"), 0);
    assert_eq!(stats.objects_filtered(), 1);
    assert!(stats.account("200").is_none());
}

#[tokio::test]
async fn test_cancelled_before_start_reports_cancellation() {
    let scanner = two_account_scanner(org_config());
    scanner.cancellation_token().cancel();

    let result = scanner.scan().await;

    // Identity resolution itself observes the cancellation
    assert!(matches!(result, Err(sc_error::ScError::Cancelled)));
}
