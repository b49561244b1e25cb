//! Identity service trait.

use async_trait::async_trait;
use sc_error::Result;
use sc_types::ScopedCredentials;

/// Trait for identity backends.
///
/// Implementations include:
/// - AWS STS (production)
/// - In-memory fakes (tests)
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Returns the account identifier of the running caller.
    async fn caller_account(&self) -> Result<String>;

    /// Assumes `role_arn` and returns temporary credentials for its account.
    ///
    /// # Arguments
    ///
    /// * `role_arn` - Full role ARN (e.g., `arn:aws:iam::200:role/Reader`)
    /// * `session_name` - Name recorded for the assumed-role session
    async fn assume_role(&self, role_arn: &str, session_name: &str) -> Result<ScopedCredentials>;
}
