//! Shared AWS configuration and SDK loading.

use std::time::Duration;

use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use serde::{Deserialize, Serialize};

/// Configuration for AWS access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsConfig {
    /// AWS region
    pub region: Option<String>,

    /// Custom endpoint URL (for LocalStack)
    pub endpoint: Option<String>,

    /// Explicit AWS access key (optional)
    pub access_key: Option<String>,

    /// Explicit AWS secret key (optional)
    #[serde(skip_serializing)]
    pub secret_key: Option<String>,

    /// AWS profile name (optional)
    pub profile: Option<String>,

    /// Operation timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: None,
            endpoint: None,
            access_key: None,
            secret_key: None,
            profile: None,
            timeout_secs: crate::config::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl AwsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom endpoint (for LocalStack).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the AWS region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set explicit credentials.
    pub fn with_credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Set the AWS profile.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Set the operation timeout in seconds.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Load the shared SDK configuration used by the STS, Organizations and S3
/// clients.
pub async fn load_sdk_config(config: &AwsConfig) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest()).timeout_config(
        TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(config.timeout_secs))
            .build(),
    );

    if let Some(region) = &config.region {
        loader = loader.region(Region::new(region.clone()));
    }

    if let Some(endpoint) = &config.endpoint {
        loader = loader.endpoint_url(endpoint);
    }

    if let (Some(access_key), Some(secret_key)) = (&config.access_key, &config.secret_key) {
        let credentials = aws_sdk_s3::config::Credentials::new(
            access_key,
            secret_key,
            None,
            None,
            "sc-inventory",
        );
        loader = loader.credentials_provider(credentials);
    }

    if let Some(profile) = &config.profile {
        loader = loader.profile_name(profile);
    }

    loader.load().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aws_config_builder() {
        let config = AwsConfig::new()
            .with_endpoint("http://localhost:4566")
            .with_region("us-east-1")
            .with_profile("audit")
            .with_timeout(60);

        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:4566"));
        assert_eq!(config.region.as_deref(), Some("us-east-1"));
        assert_eq!(config.profile.as_deref(), Some("audit"));
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_aws_config_with_credentials() {
        let config = AwsConfig::new().with_credentials("access", "secret");

        assert_eq!(config.access_key.as_deref(), Some("access"));
        assert_eq!(config.secret_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_secret_not_serialized() {
        let config = AwsConfig::new().with_credentials("access", "secret");
        let json = serde_json::to_string(&config).unwrap();

        assert!(json.contains("access"));
        assert!(!json.contains("\"secret\""));
    }

    #[test]
    fn test_aws_config_default() {
        let config = AwsConfig::default();

        assert!(config.endpoint.is_none());
        assert!(config.region.is_none());
        assert_eq!(config.timeout_secs, 300);
    }
}
