//! Container listing and paginated object scanning.

use std::collections::HashSet;

use sc_error::ScError;
use sc_traits::StorageSession;
use tracing::debug;

use crate::context::ScanContext;
use crate::extension;
use crate::filter::FilterPolicy;

/// List an account's containers.
///
/// A failure is recorded and treated as zero containers.
pub async fn list_containers<S>(session: &S, account_id: &str, ctx: &ScanContext) -> Vec<String>
where
    S: StorageSession + ?Sized,
{
    match ctx.call("ListBuckets", session.list_containers()).await {
        Ok(containers) => containers,
        Err(ScError::Cancelled) => Vec::new(),
        Err(e) => {
            ctx.record(ScError::ContainerList {
                account: account_id.to_string(),
                message: e.to_string(),
            });
            Vec::new()
        }
    }
}

/// Counts from scanning one container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContainerOutcome {
    /// Listing calls that returned a page
    pub pages: usize,

    /// Objects accepted by the filter policy
    pub accepted: u64,

    /// Objects rejected by the filter policy
    pub filtered: u64,
}

/// Scan one container, feeding every accepted object into the stats tree.
///
/// Pagination continues while the provider reports truncation with a fresh
/// continuation token. It stops after the first page in test mode, when the
/// scan is cancelled, or when the provider breaks the contract (truncated
/// without a token, or any token served twice); a contract violation is
/// recorded as a pagination error. Objects already recorded are kept when a
/// later page fails.
pub async fn scan_container<S>(
    session: &S,
    account_id: &str,
    container: &str,
    policy: &FilterPolicy,
    test_mode: bool,
    ctx: &ScanContext,
) -> ContainerOutcome
where
    S: StorageSession + ?Sized,
{
    let mut outcome = ContainerOutcome::default();
    let mut token: Option<String> = None;
    let mut seen = HashSet::new();

    loop {
        if ctx.is_cancelled() {
            break;
        }

        let page = match ctx
            .call(
                "ListObjectsV2",
                session.list_objects(container, token.as_deref()),
            )
            .await
        {
            Ok(page) => page,
            Err(e) => {
                ctx.record(object_list_error(e, account_id, container));
                break;
            }
        };

        outcome.pages += 1;

        for obj in &page.objects {
            let ext = extension::extract(&obj.key);
            debug!(size = obj.size, key = %obj.key, ext = %ext, "Listed object");

            if policy.accept(obj.size, &ext) {
                ctx.stats.record_object(account_id, container, obj.size, &ext);
                outcome.accepted += 1;
            } else {
                ctx.stats.record_filtered();
                outcome.filtered += 1;
            }
        }

        if !page.truncated {
            break;
        }

        if test_mode {
            debug!(account = account_id, container, "Test mode, not requesting further pages");
            break;
        }

        match page.next_token {
            None => {
                ctx.record(ScError::Pagination {
                    account: account_id.to_string(),
                    container: container.to_string(),
                    message: format!(
                        "page {} reported truncation without a continuation token",
                        outcome.pages
                    ),
                });
                break;
            }
            Some(next) if !seen.insert(next.clone()) => {
                ctx.record(ScError::Pagination {
                    account: account_id.to_string(),
                    container: container.to_string(),
                    message: format!(
                        "page {} repeated continuation token {next}",
                        outcome.pages
                    ),
                });
                break;
            }
            Some(next) => token = Some(next),
        }
    }

    debug!(
        account = account_id,
        container,
        pages = outcome.pages,
        accepted = outcome.accepted,
        filtered = outcome.filtered,
        "Container scanned"
    );

    outcome
}

fn object_list_error(error: ScError, account_id: &str, container: &str) -> ScError {
    match error {
        ScError::Cancelled => ScError::Cancelled,
        other => ScError::ObjectList {
            account: account_id.to_string(),
            container: container.to_string(),
            message: other.to_string(),
        },
    }
}
