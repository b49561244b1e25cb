//! Organization membership trait.

use async_trait::async_trait;
use sc_error::Result;
use sc_types::AccountPage;

/// Trait for listing the member accounts of an organization.
#[async_trait]
pub trait OrganizationService: Send + Sync {
    /// Fetches one page of member accounts.
    ///
    /// Pass `None` for the first page and the previous page's
    /// `next_cursor` afterwards.
    async fn list_accounts(&self, cursor: Option<&str>) -> Result<AccountPage>;
}
