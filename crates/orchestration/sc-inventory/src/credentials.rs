//! Credential resolution for scanned accounts.

use sc_error::{Result, ScError};
use sc_traits::IdentityService;
use sc_types::ScopedCredentials;
use tracing::debug;

/// Build the ARN of `role_name` in `account_id`.
///
/// # Example
///
/// ```
/// use sc_inventory::credentials::role_arn;
///
/// assert_eq!(
///     role_arn("aws", "200", "OrganizationAccountAccessRole"),
///     "arn:aws:iam::200:role/OrganizationAccountAccessRole"
/// );
/// ```
pub fn role_arn(partition: &str, account_id: &str, role_name: &str) -> String {
    format!("arn:{partition}:iam::{account_id}:role/{role_name}")
}

/// Query the identity service for the caller's own account.
///
/// Any failure here is fatal to the scan.
pub async fn resolve_self_identity<I>(identity: &I) -> Result<String>
where
    I: IdentityService + ?Sized,
{
    match identity.caller_account().await {
        Ok(account) => Ok(account),
        Err(ScError::Identity(message)) => Err(ScError::Identity(message)),
        Err(e) => Err(ScError::Identity(e.to_string())),
    }
}

/// Yields scoped credentials for each account, assuming a role where needed.
pub struct CredentialResolver<'a, I: ?Sized> {
    identity: &'a I,
    role_name: &'a str,
    partition: &'a str,
    session_name: &'a str,
}

impl<'a, I> CredentialResolver<'a, I>
where
    I: IdentityService + ?Sized,
{
    pub fn new(identity: &'a I, role_name: &'a str, partition: &'a str, session_name: &'a str) -> Self {
        Self {
            identity,
            role_name,
            partition,
            session_name,
        }
    }

    /// Resolve credentials for `account_id`.
    ///
    /// The caller's own account uses the ambient credentials; any other
    /// account requires assuming the configured role.
    pub async fn resolve(&self, account_id: &str, caller_account: &str) -> Result<ScopedCredentials> {
        if account_id == caller_account {
            return Ok(ScopedCredentials::Ambient);
        }

        let arn = role_arn(self.partition, account_id, self.role_name);
        debug!(account = account_id, role_arn = %arn, "Resolving cross-account credentials");

        self.identity
            .assume_role(&arn, self.session_name)
            .await
            .map_err(|e| match e {
                ScError::Cancelled => ScError::Cancelled,
                other => ScError::RoleAssumption {
                    account: account_id.to_string(),
                    message: other.to_string(),
                },
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeIdentity;

    #[test]
    fn test_role_arn_partition() {
        assert_eq!(
            role_arn("aws-us-gov", "123456789012", "Reader"),
            "arn:aws-us-gov:iam::123456789012:role/Reader"
        );
    }

    #[tokio::test]
    async fn test_self_account_uses_ambient_credentials() {
        let identity = FakeIdentity::new("100");
        let resolver = CredentialResolver::new(&identity, "Reader", "aws", "test");

        let creds = resolver.resolve("100", "100").await.unwrap();

        assert!(creds.is_ambient());
        assert!(identity.assumed_arns().is_empty());
    }

    #[tokio::test]
    async fn test_other_account_assumes_role() {
        let identity = FakeIdentity::new("100");
        let resolver = CredentialResolver::new(&identity, "Reader", "aws", "test");

        let creds = resolver.resolve("200", "100").await.unwrap();

        assert!(!creds.is_ambient());
        assert_eq!(identity.assumed_arns(), vec!["arn:aws:iam::200:role/Reader"]);
    }

    #[tokio::test]
    async fn test_assume_failure_is_role_assumption_error() {
        let identity = FakeIdentity::new("100").deny_account("200");
        let resolver = CredentialResolver::new(&identity, "Reader", "aws", "test");

        let err = resolver.resolve("200", "100").await.unwrap_err();

        assert!(matches!(err, ScError::RoleAssumption { ref account, .. } if account == "200"));
        assert!(!err.is_fatal());
    }

    #[tokio::test]
    async fn test_self_identity_failure_is_fatal() {
        let identity = FakeIdentity::failing("ExpiredToken");

        let err = resolve_self_identity(&identity).await.unwrap_err();

        assert!(matches!(err, ScError::Identity(_)));
        assert!(err.is_fatal());
        assert!(err.to_string().contains("ExpiredToken"));
    }
}
