//! STS-backed identity service.

use async_trait::async_trait;
use aws_config::SdkConfig;
use chrono::DateTime;
use sc_error::{Result, ScError};
use sc_traits::IdentityService;
use sc_types::ScopedCredentials;
use tracing::debug;

/// Resolves the caller's account and assumes cross-account roles via STS.
#[derive(Debug, Clone)]
pub struct StsIdentity {
    client: aws_sdk_sts::Client,
}

impl StsIdentity {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_sts::Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl IdentityService for StsIdentity {
    async fn caller_account(&self) -> Result<String> {
        let resp = self
            .client
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| ScError::service(aws_sdk_sts::error::DisplayErrorContext(e)))?;

        resp.account()
            .map(str::to_string)
            .ok_or_else(|| ScError::Service("GetCallerIdentity returned no account".to_string()))
    }

    async fn assume_role(&self, role_arn: &str, session_name: &str) -> Result<ScopedCredentials> {
        debug!(role_arn, session_name, "Assuming role");

        let resp = self
            .client
            .assume_role()
            .role_arn(role_arn)
            .role_session_name(session_name)
            .send()
            .await
            .map_err(|e| ScError::service(aws_sdk_sts::error::DisplayErrorContext(e)))?;

        let credentials = resp
            .credentials()
            .ok_or_else(|| ScError::Service(format!("AssumeRole returned no credentials for {role_arn}")))?;

        let expiration = credentials.expiration();

        Ok(ScopedCredentials::Assumed {
            access_key_id: credentials.access_key_id().to_string(),
            secret_access_key: credentials.secret_access_key().to_string(),
            session_token: credentials.session_token().to_string(),
            expiration: DateTime::from_timestamp(expiration.secs(), expiration.subsec_nanos()),
        })
    }
}
