//! Account enumeration.

use std::collections::HashSet;

use sc_error::ScError;
use sc_traits::OrganizationService;
use sc_types::Account;
use tracing::debug;

use crate::context::ScanContext;

/// List the accounts to scan.
///
/// Without organization mode this is just the caller's own account and the
/// organization service is never called. In organization mode, pages are
/// requested while a next cursor is returned. Failures are recorded in the
/// scan's error log; whatever was gathered before the failure is returned
/// (nothing if the first page fails).
pub async fn list_accounts<O>(
    organization: &O,
    organization_mode: bool,
    caller_account: &str,
    ctx: &ScanContext,
) -> Vec<Account>
where
    O: OrganizationService + ?Sized,
{
    if !organization_mode {
        return vec![Account::new(caller_account)];
    }

    let mut accounts = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0usize;
    let mut seen = HashSet::new();

    loop {
        if ctx.is_cancelled() {
            break;
        }

        let page = match ctx
            .call(
                "ListAccounts",
                organization.list_accounts(cursor.as_deref()),
            )
            .await
        {
            Ok(page) => page,
            Err(e) => {
                ctx.record(organization_error(e));
                break;
            }
        };

        pages += 1;
        accounts.extend(page.accounts);

        match page.next_cursor {
            Some(next) if !seen.insert(next.clone()) => {
                ctx.record(ScError::Organization(format!(
                    "cursor {next} repeated on page {pages}"
                )));
                break;
            }
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    debug!(accounts = accounts.len(), pages, "Listed organization accounts");
    accounts
}

fn organization_error(error: ScError) -> ScError {
    match error {
        ScError::Cancelled => ScError::Cancelled,
        ScError::Organization(message) => ScError::Organization(message),
        other => ScError::Organization(other.to_string()),
    }
}
