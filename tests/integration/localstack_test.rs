//! S3 listing against LocalStack.
//!
//! LocalStack's free tier has no Organizations API, so these run in
//! single-account mode against the caller's own buckets.

use crate::common::LocalStackTestContext;
use sc_inventory::report::FlatTable;
use sc_inventory::{AwsServices, ExtensionFilter, FilterPolicy, ScanConfig, Scanner, SizeFilter};

async fn scan_with(ctx: &LocalStackTestContext, config: ScanConfig) -> sc_inventory::StatsTree {
    let services = AwsServices::connect(&ctx.aws_config()).await;
    Scanner::new(services.identity, services.organization, services.storage, config)
        .scan()
        .await
        .unwrap()
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_scan_counts_bucket_contents() {
    let ctx = LocalStackTestContext::new().await;
    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "census-it-counts";
    ctx.fresh_bucket(bucket).await.unwrap();
    ctx.put_sized(bucket, "logs/app.log", 100).await.unwrap();
    ctx.put_sized(bucket, "logs/app.LOG", 50).await.unwrap();
    ctx.put_sized(bucket, "data/table.csv", 30).await.unwrap();
    ctx.put_sized(bucket, "README", 7).await.unwrap();

    let stats = scan_with(&ctx, ScanConfig::new().with_filter(FilterPolicy::accept_all())).await;

    let account = stats.accounts().keys().next().cloned().unwrap();
    let counted = stats.container(&account, bucket).unwrap();
    assert_eq!(counted.total_files(), 4);
    assert_eq!(counted.total_bytes(), 187);
    assert_eq!(counted.bytes_for("log"), 150);
    assert_eq!(counted.files_for("log"), 2);
    assert_eq!(counted.bytes_for(""), 7);

    let table = FlatTable::from_tree(&stats);
    assert!(table.rows.iter().any(|r| r.bucket == bucket));
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_scan_paginates_and_filters() {
    let ctx = LocalStackTestContext::new().await;
    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    // More than one ListObjectsV2 page (1000 keys)
    let bucket = "census-it-pages";
    ctx.fresh_bucket(bucket).await.unwrap();
    for i in 0..1005 {
        let key = if i % 5 == 0 { format!("part-{i}.tmp") } else { format!("part-{i}.json") };
        ctx.put_sized(bucket, &key, 2).await.unwrap();
    }

    let policy = FilterPolicy::new(SizeFilter::new(1, 10), ExtensionFilter::new().with_blocked(["tmp"]));
    let stats = scan_with(&ctx, ScanConfig::new().with_filter(policy)).await;

    let account = stats.accounts().keys().next().cloned().unwrap();
    let counted = stats.container(&account, bucket).unwrap();
    assert_eq!(counted.files_for("json"), 804);
    assert_eq!(counted.files_for("tmp"), 0);

    let first_page_only = scan_with(
        &ctx,
        ScanConfig::new()
            .with_filter(FilterPolicy::accept_all())
            .with_test_mode(true),
    )
    .await;
    assert_eq!(first_page_only.container(&account, bucket).unwrap().total_files(), 1000);
}
