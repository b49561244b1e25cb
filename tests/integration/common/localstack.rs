//! LocalStack test context.

use aws_sdk_s3::Client as S3Client;
use sc_inventory::AwsConfig;

/// LocalStack test context providing an S3 client and matching scan settings.
pub struct LocalStackTestContext {
    pub s3: S3Client,
    pub endpoint: String,
    pub region: String,
}

impl LocalStackTestContext {
    /// Create a new LocalStack test context.
    ///
    /// Uses the `LOCALSTACK_ENDPOINT` environment variable if set,
    /// otherwise defaults to `http://localhost:4566`.
    pub async fn new() -> Self {
        let endpoint = std::env::var("LOCALSTACK_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:4566".to_string());
        let region = "us-east-1".to_string();

        let sdk_config = sc_inventory::aws::load_sdk_config(&Self::aws_config_for(&endpoint, &region)).await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();

        Self {
            s3: S3Client::from_conf(s3_config),
            endpoint,
            region,
        }
    }

    fn aws_config_for(endpoint: &str, region: &str) -> AwsConfig {
        AwsConfig::new()
            .with_endpoint(endpoint)
            .with_region(region)
            .with_credentials("test", "test")
            .with_timeout(30)
    }

    /// AWS settings for a scanner pointed at this LocalStack.
    pub fn aws_config(&self) -> AwsConfig {
        Self::aws_config_for(&self.endpoint, &self.region)
    }

    /// Check if LocalStack is available.
    pub async fn is_available(&self) -> bool {
        self.s3.list_buckets().send().await.is_ok()
    }

    /// Create a bucket, emptying it if it already exists.
    pub async fn fresh_bucket(&self, name: &str) -> Result<(), aws_sdk_s3::Error> {
        let buckets = self.s3.list_buckets().send().await?;
        let exists = buckets
            .buckets()
            .iter()
            .any(|b| b.name().unwrap_or_default() == name);

        if exists {
            let listed = self.s3.list_objects_v2().bucket(name).send().await?;
            for key in listed.contents().iter().filter_map(|o| o.key()) {
                self.s3.delete_object().bucket(name).key(key).send().await?;
            }
        } else {
            self.s3.create_bucket().bucket(name).send().await?;
        }
        Ok(())
    }

    /// Upload an object of exactly `size` bytes.
    pub async fn put_sized(&self, bucket: &str, key: &str, size: usize) -> Result<(), aws_sdk_s3::Error> {
        self.s3
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(vec![b'x'; size].into())
            .send()
            .await?;
        Ok(())
    }
}
