//! S3-backed storage sessions.

use std::collections::HashMap;
use std::time::SystemTime;

use async_trait::async_trait;
use aws_config::{Region, SdkConfig};
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::error::DisplayErrorContext;
use parking_lot::Mutex;
use sc_error::{Result, ScError};
use sc_traits::{StorageConnector, StorageSession};
use sc_types::{ObjectPage, ObjectRecord, ScopedCredentials};
use tracing::debug;

/// Opens S3 sessions, one per scanned account.
#[derive(Debug, Clone)]
pub struct S3Connector {
    sdk_config: SdkConfig,
    force_path_style: bool,
}

impl S3Connector {
    /// Create a connector from the shared SDK configuration.
    ///
    /// Path-style addressing is enabled when a custom endpoint is used
    /// (LocalStack).
    pub fn new(sdk_config: &SdkConfig, force_path_style: bool) -> Self {
        Self {
            sdk_config: sdk_config.clone(),
            force_path_style,
        }
    }
}

#[async_trait]
impl StorageConnector for S3Connector {
    async fn connect(&self, credentials: ScopedCredentials) -> Result<Box<dyn StorageSession>> {
        let mut builder = aws_sdk_s3::config::Builder::from(&self.sdk_config)
            .force_path_style(self.force_path_style);

        if let ScopedCredentials::Assumed {
            access_key_id,
            secret_access_key,
            session_token,
            expiration,
        } = credentials
        {
            let expiry = expiration.map(SystemTime::from);
            builder = builder.credentials_provider(Credentials::new(
                access_key_id,
                secret_access_key,
                Some(session_token),
                expiry,
                "sc-inventory-assumed",
            ));
        }

        let config = builder.build();
        Ok(Box::new(S3Session {
            client: Client::from_conf(config.clone()),
            config,
            // Custom endpoints serve every bucket from one place.
            resolve_regions: !self.force_path_style,
            regional: Mutex::new(HashMap::new()),
        }))
    }
}

/// Listing access to one account's buckets.
///
/// Buckets live in different regions; a client per bucket region is built
/// lazily from the session configuration and cached.
pub struct S3Session {
    client: Client,
    config: aws_sdk_s3::Config,
    resolve_regions: bool,
    regional: Mutex<HashMap<String, Client>>,
}

impl S3Session {
    async fn client_for(&self, bucket: &str) -> Result<Client> {
        if !self.resolve_regions {
            return Ok(self.client.clone());
        }

        let cached = self.regional.lock().get(bucket).cloned();
        if let Some(client) = cached {
            return Ok(client);
        }

        let resp = self
            .client
            .get_bucket_location()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| ScError::service(DisplayErrorContext(e)))?;

        let region = bucket_region(resp.location_constraint().map(|c| c.as_str()));

        debug!(bucket, region = %region, "Resolved bucket region");

        let client = Client::from_conf(
            self.config
                .to_builder()
                .region(Region::new(region))
                .build(),
        );
        self.regional
            .lock()
            .insert(bucket.to_string(), client.clone());
        Ok(client)
    }
}

#[async_trait]
impl StorageSession for S3Session {
    async fn list_containers(&self) -> Result<Vec<String>> {
        let resp = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(|e| ScError::service(DisplayErrorContext(e)))?;

        Ok(resp
            .buckets()
            .iter()
            .filter_map(|b| b.name().map(str::to_string))
            .collect())
    }

    async fn list_objects(
        &self,
        container: &str,
        continuation_token: Option<&str>,
    ) -> Result<ObjectPage> {
        let client = self.client_for(container).await?;

        let resp = client
            .list_objects_v2()
            .bucket(container)
            .set_continuation_token(continuation_token.map(str::to_string))
            .send()
            .await
            .map_err(|e| ScError::service(DisplayErrorContext(e)))?;

        let objects = resp
            .contents()
            .iter()
            .filter_map(|obj| {
                let key = obj.key()?;
                Some(ObjectRecord::new(key, obj.size().unwrap_or(0).max(0) as u64))
            })
            .collect();

        Ok(ObjectPage {
            objects,
            truncated: resp.is_truncated().unwrap_or(false),
            next_token: resp.next_continuation_token().map(str::to_string),
        })
    }
}

/// Region name for a `GetBucketLocation` constraint.
///
/// No constraint means us-east-1; legacy buckets report `EU` for eu-west-1.
fn bucket_region(constraint: Option<&str>) -> String {
    match constraint {
        None | Some("") => "us-east-1".to_string(),
        Some("EU") => "eu-west-1".to_string(),
        Some(region) => region.to_string(),
    }
}
