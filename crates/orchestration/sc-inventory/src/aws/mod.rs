//! AWS implementations of the service traits.
//!
//! - [`StsIdentity`] - caller identity and role assumption (STS)
//! - [`OrganizationsDirectory`] - member account listing (Organizations)
//! - [`S3Connector`] / [`S3Session`] - bucket and object listing (S3)

mod client;
mod organizations;
mod s3;
mod sts;

pub use client::{AwsConfig, load_sdk_config};
pub use organizations::OrganizationsDirectory;
pub use s3::{S3Connector, S3Session};
pub use sts::StsIdentity;

/// The three AWS services a scan needs, built from one SDK configuration.
#[derive(Debug, Clone)]
pub struct AwsServices {
    pub identity: StsIdentity,
    pub organization: OrganizationsDirectory,
    pub storage: S3Connector,
}

impl AwsServices {
    /// Load the SDK configuration and create all service clients.
    pub async fn connect(config: &AwsConfig) -> Self {
        let sdk_config = load_sdk_config(config).await;
        Self {
            identity: StsIdentity::new(&sdk_config),
            organization: OrganizationsDirectory::new(&sdk_config),
            storage: S3Connector::new(&sdk_config, config.endpoint.is_some()),
        }
    }
}
