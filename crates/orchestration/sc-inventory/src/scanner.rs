//! Traversal orchestrator: accounts, then containers, then objects.

use futures::StreamExt;
use futures::stream;
use sc_error::{Result, ScError};
use sc_traits::{IdentityService, OrganizationService, StorageConnector};
use sc_types::Account;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::accounts::list_accounts;
use crate::config::ScanConfig;
use crate::containers::{list_containers, scan_container};
use crate::context::ScanContext;
use crate::credentials::{CredentialResolver, resolve_self_identity};
use crate::filter::Filter;
use crate::stats::{SharedStats, StatsTree};

/// Runs one inventory pass over every reachable account.
///
/// The scanner is generic over its three services so the same traversal
/// drives both AWS and the in-memory fakes.
///
/// # Example
///
/// ```ignore
/// let services = AwsServices::connect(&config.aws).await;
/// let scanner = Scanner::new(
///     services.identity,
///     services.organization,
///     services.storage,
///     config,
/// );
/// let stats = scanner.scan().await?;
/// ```
pub struct Scanner<I, O, S> {
    identity: I,
    organization: O,
    storage: S,
    config: ScanConfig,
    cancel: CancellationToken,
}

impl<I, O, S> Scanner<I, O, S>
where
    I: IdentityService,
    O: OrganizationService,
    S: StorageConnector,
{
    pub fn new(identity: I, organization: O, storage: S, config: ScanConfig) -> Self {
        Self {
            identity,
            organization,
            storage,
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Use an externally owned cancellation token (e.g. one cancelled on Ctrl-C).
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Run the scan and return the completed stats tree.
    ///
    /// Only a failure to resolve the caller's identity is returned as an
    /// error; everything else ends up in the tree's error log.
    pub async fn scan(&self) -> Result<StatsTree> {
        let stats = SharedStats::new();
        self.scan_into(stats.clone()).await?;
        Ok(stats.into_inner())
    }

    /// Run the scan, recording into a caller-provided stats handle.
    ///
    /// Useful when another task (progress reporting) reads the stats while
    /// the scan runs.
    pub async fn scan_into(&self, stats: SharedStats) -> Result<()> {
        let ctx = ScanContext::new(stats, self.cancel.clone(), self.config.request_timeout);

        let caller = ctx
            .call("GetCallerIdentity", resolve_self_identity(&self.identity))
            .await
            .map_err(|e| match e {
                ScError::Identity(_) | ScError::Cancelled => e,
                other => ScError::Identity(other.to_string()),
            })?;

        info!(
            caller_account = %caller,
            organization = self.config.organization_mode,
            summary_only = self.config.summary_only,
            test_mode = self.config.test_mode,
            filter = %self.config.filter.description(),
            "Starting inventory scan"
        );

        let accounts = list_accounts(
            &self.organization,
            self.config.organization_mode,
            &caller,
            &ctx,
        )
        .await;

        info!(accounts = accounts.len(), "Accounts to consider");

        let resolver = CredentialResolver::new(
            &self.identity,
            &self.config.role_name,
            &self.config.partition,
            &self.config.session_name,
        );

        stream::iter(accounts.iter())
            .map(|account| self.scan_account(account, &caller, &resolver, &ctx))
            .buffer_unordered(self.config.concurrency.max(1))
            .collect::<Vec<()>>()
            .await;

        if ctx.is_cancelled() {
            ctx.stats.record_error(ScError::Cancelled);
        }
        ctx.stats.complete();

        let progress = ctx.stats.progress();
        info!(
            accounts = progress.accounts,
            containers = progress.containers,
            objects = progress.objects_seen,
            bytes = progress.bytes,
            errors = progress.errors,
            "Inventory scan finished"
        );

        Ok(())
    }

    async fn scan_account(
        &self,
        account: &Account,
        caller: &str,
        resolver: &CredentialResolver<'_, I>,
        ctx: &ScanContext,
    ) {
        if ctx.is_cancelled() {
            return;
        }

        let account_id = account.id.as_str();
        if !self.config.accounts.accepts(account_id) {
            debug!(account = account_id, "Account excluded by include/exclude lists");
            return;
        }

        let credentials = match ctx.call("AssumeRole", resolver.resolve(account_id, caller)).await {
            Ok(credentials) => credentials,
            Err(e) => {
                ctx.record(role_error(e, account_id));
                return;
            }
        };

        info!(
            account = account_id,
            name = account.name.as_deref().unwrap_or_default(),
            "Scanning account"
        );
        ctx.stats.ensure_account(account_id);

        // The session owns the credentials and drops them with the account.
        let session = match ctx.call("Connect", self.storage.connect(credentials)).await {
            Ok(session) => session,
            Err(ScError::Cancelled) => return,
            Err(e) => {
                ctx.record(ScError::ContainerList {
                    account: account_id.to_string(),
                    message: e.to_string(),
                });
                return;
            }
        };

        let containers = list_containers(session.as_ref(), account_id, ctx).await;
        if ctx.is_cancelled() {
            return;
        }

        if self.config.summary_only {
            info!(account = account_id, containers = containers.len(), "Counted containers");
            ctx.stats.record_container_count(account_id, containers.len());
            return;
        }

        for container in &containers {
            if ctx.is_cancelled() {
                break;
            }
            ctx.stats.ensure_container(account_id, container);
            let outcome = scan_container(
                session.as_ref(),
                account_id,
                container,
                &self.config.filter,
                self.config.test_mode,
                ctx,
            )
            .await;
            info!(
                account = account_id,
                container = container.as_str(),
                objects = outcome.accepted,
                filtered = outcome.filtered,
                "Scanned container"
            );
        }

        debug!(account = account_id, containers = containers.len(), "Account scanned");
    }
}

fn role_error(error: ScError, account_id: &str) -> ScError {
    match error {
        ScError::Cancelled | ScError::RoleAssumption { .. } => error,
        other => ScError::RoleAssumption {
            account: account_id.to_string(),
            message: other.to_string(),
        },
    }
}
