//! Object storage traits.

use async_trait::async_trait;
use sc_error::Result;
use sc_types::{ObjectPage, ScopedCredentials};

/// Opens storage sessions bound to one account's credentials.
///
/// # Session Lifecycle
///
/// 1. The scanner resolves [`ScopedCredentials`] for an account
/// 2. [`connect`](StorageConnector::connect) takes ownership of them
/// 3. The returned session lists that account's containers and objects
/// 4. The session (and the credentials inside it) is dropped when the
///    account's scan completes
#[async_trait]
pub trait StorageConnector: Send + Sync {
    /// Opens a session scoped to the given credentials.
    async fn connect(&self, credentials: ScopedCredentials) -> Result<Box<dyn StorageSession>>;
}

/// Listing operations within one account.
#[async_trait]
pub trait StorageSession: Send + Sync {
    /// Lists the names of all containers (buckets) visible to this session.
    async fn list_containers(&self) -> Result<Vec<String>>;

    /// Fetches one page of objects from a container.
    ///
    /// # Arguments
    ///
    /// * `container` - Container (bucket) name
    /// * `continuation_token` - `None` for the first page, then the previous
    ///   page's `next_token`
    async fn list_objects(
        &self,
        container: &str,
        continuation_token: Option<&str>,
    ) -> Result<ObjectPage>;
}
