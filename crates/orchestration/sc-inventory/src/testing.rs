//! In-memory service fakes for exercising the scanner without AWS.
//!
//! Credentials are mapped back to accounts the same way every fake agrees on:
//! ambient credentials belong to the caller, and assumed credentials carry the
//! target account id as their access key id.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use sc_error::{Result, ScError};
use sc_traits::{IdentityService, OrganizationService, StorageConnector, StorageSession};
use sc_types::{AccountPage, ObjectPage, ObjectRecord, ScopedCredentials};
use tokio_util::sync::CancellationToken;

/// Account id embedded in a role ARN (`arn:<partition>:iam::<account>:role/<name>`).
fn account_of(role_arn: &str) -> &str {
    role_arn.split(':').nth(4).unwrap_or_default()
}

/// Identity service with a fixed caller and a deny list.
#[derive(Debug)]
pub struct FakeIdentity {
    caller: std::result::Result<String, String>,
    denied: HashSet<String>,
    assumed: Mutex<Vec<String>>,
}

impl FakeIdentity {
    pub fn new(caller: impl Into<String>) -> Self {
        Self::with_caller(Ok(caller.into()))
    }

    /// An identity whose caller lookup fails.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_caller(Err(message.into()))
    }

    fn with_caller(caller: std::result::Result<String, String>) -> Self {
        Self {
            caller,
            denied: HashSet::new(),
            assumed: Mutex::new(Vec::new()),
        }
    }

    /// Refuse role assumption into `account_id`.
    pub fn deny_account(mut self, account_id: impl Into<String>) -> Self {
        self.denied.insert(account_id.into());
        self
    }

    /// Role ARNs passed to `assume_role`, in call order.
    pub fn assumed_arns(&self) -> Vec<String> {
        self.assumed.lock().clone()
    }
}

#[async_trait]
impl IdentityService for FakeIdentity {
    async fn caller_account(&self) -> Result<String> {
        self.caller.clone().map_err(ScError::Service)
    }

    async fn assume_role(&self, role_arn: &str, _session_name: &str) -> Result<ScopedCredentials> {
        self.assumed.lock().push(role_arn.to_string());

        let account = account_of(role_arn);
        if self.denied.contains(account) {
            return Err(ScError::Service(format!(
                "AccessDenied: not authorized to perform sts:AssumeRole on {role_arn}"
            )));
        }

        Ok(ScopedCredentials::Assumed {
            access_key_id: account.to_string(),
            secret_access_key: format!("secret-{account}"),
            session_token: format!("token-{account}"),
            expiration: None,
        })
    }
}

/// Organization service that serves a scripted sequence of pages.
///
/// The n-th call receives the n-th entry; calls past the end get an empty
/// last page.
#[derive(Debug, Default)]
pub struct FakeOrganization {
    pages: Vec<std::result::Result<AccountPage, String>>,
    cursors: Mutex<Vec<Option<String>>>,
}

impl FakeOrganization {
    pub fn new(pages: Vec<std::result::Result<AccountPage, String>>) -> Self {
        Self {
            pages,
            cursors: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.cursors.lock().len()
    }

    /// Cursors received, in call order.
    pub fn cursors(&self) -> Vec<Option<String>> {
        self.cursors.lock().clone()
    }
}

#[async_trait]
impl OrganizationService for FakeOrganization {
    async fn list_accounts(&self, cursor: Option<&str>) -> Result<AccountPage> {
        let call = {
            let mut cursors = self.cursors.lock();
            cursors.push(cursor.map(str::to_string));
            cursors.len() - 1
        };

        match self.pages.get(call) {
            Some(Ok(page)) => Ok(page.clone()),
            Some(Err(message)) => Err(ScError::Service(message.clone())),
            None => Ok(AccountPage::last(Vec::new())),
        }
    }
}

/// Scripted object pages for one container, served in call order.
#[derive(Debug, Clone, Default)]
pub struct FakeContainer {
    pages: Vec<std::result::Result<ObjectPage, String>>,
}

impl FakeContainer {
    pub fn empty() -> Self {
        Self::paged(Vec::new())
    }

    /// Well-behaved pagination: page `n` links to the next with token `page-n`.
    pub fn paged(pages: Vec<Vec<ObjectRecord>>) -> Self {
        let count = pages.len();
        let pages = pages
            .into_iter()
            .enumerate()
            .map(|(i, objects)| {
                if i + 1 < count {
                    Ok(ObjectPage::truncated(objects, format!("page-{}", i + 1)))
                } else {
                    Ok(ObjectPage::last(objects))
                }
            })
            .collect();
        Self { pages }
    }

    /// Pages exactly as given, including errors and contract violations.
    pub fn raw(pages: Vec<std::result::Result<ObjectPage, String>>) -> Self {
        Self { pages }
    }
}

/// One account's containers.
///
/// Clones share their call log, so a test can keep a handle after giving the
/// session to a [`FakeStorage`].
#[derive(Debug, Clone, Default)]
pub struct FakeSession {
    containers: Vec<(String, FakeContainer)>,
    listing_error: Option<String>,
    delay: Option<Duration>,
    cancel_on_objects: Option<CancellationToken>,
    cancel_on_listing: Option<CancellationToken>,
    object_calls: Arc<Mutex<Vec<(String, Option<String>)>>>,
}

impl FakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_container(mut self, name: impl Into<String>, container: FakeContainer) -> Self {
        self.containers.push((name.into(), container));
        self
    }

    /// Make container listing fail.
    pub fn fail_container_listing(mut self, message: impl Into<String>) -> Self {
        self.listing_error = Some(message.into());
        self
    }

    /// Delay every object listing call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Cancel `token` as soon as the first object page has been served.
    pub fn cancel_on_objects(mut self, token: CancellationToken) -> Self {
        self.cancel_on_objects = Some(token);
        self
    }

    /// Cancel `token` while the container listing is served.
    pub fn cancel_on_container_listing(mut self, token: CancellationToken) -> Self {
        self.cancel_on_listing = Some(token);
        self
    }

    /// Number of object listing calls made against `container`.
    pub fn object_calls(&self, container: &str) -> usize {
        self.object_tokens(container).len()
    }

    /// Continuation tokens passed for `container`, in call order.
    pub fn object_tokens(&self, container: &str) -> Vec<Option<String>> {
        self.object_calls
            .lock()
            .iter()
            .filter(|(name, _)| name == container)
            .map(|(_, token)| token.clone())
            .collect()
    }
}

#[async_trait]
impl StorageSession for FakeSession {
    async fn list_containers(&self) -> Result<Vec<String>> {
        if let Some(token) = &self.cancel_on_listing {
            token.cancel();
        }
        if let Some(message) = &self.listing_error {
            return Err(ScError::Service(message.clone()));
        }
        Ok(self
            .containers
            .iter()
            .map(|(name, _)| name.clone())
            .collect())
    }

    async fn list_objects(
        &self,
        container: &str,
        continuation_token: Option<&str>,
    ) -> Result<ObjectPage> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let call = {
            let mut calls = self.object_calls.lock();
            calls.push((container.to_string(), continuation_token.map(str::to_string)));
            calls.iter().filter(|(name, _)| name == container).count() - 1
        };

        let pages = self
            .containers
            .iter()
            .find(|(name, _)| name == container)
            .map(|(_, c)| &c.pages)
            .ok_or_else(|| ScError::Service(format!("NoSuchBucket: {container}")))?;

        let result = match pages.get(call) {
            Some(Ok(page)) => Ok(page.clone()),
            Some(Err(message)) => Err(ScError::Service(message.clone())),
            None => Ok(ObjectPage::last(Vec::new())),
        };

        if let Some(token) = &self.cancel_on_objects {
            token.cancel();
        }

        result
    }
}

/// Storage connector that hands out a [`FakeSession`] per account.
#[derive(Debug, Default)]
pub struct FakeStorage {
    caller: String,
    sessions: HashMap<String, FakeSession>,
    refused: HashSet<String>,
    connected: Mutex<Vec<String>>,
}

impl FakeStorage {
    pub fn new(caller: impl Into<String>) -> Self {
        Self {
            caller: caller.into(),
            ..Default::default()
        }
    }

    pub fn with_account(mut self, account_id: impl Into<String>, session: FakeSession) -> Self {
        self.sessions.insert(account_id.into(), session);
        self
    }

    /// Make `connect` fail for `account_id`.
    pub fn refuse_account(mut self, account_id: impl Into<String>) -> Self {
        self.refused.insert(account_id.into());
        self
    }

    /// Accounts a session was opened for, in order.
    pub fn connected(&self) -> Vec<String> {
        self.connected.lock().clone()
    }
}

#[async_trait]
impl StorageConnector for FakeStorage {
    async fn connect(&self, credentials: ScopedCredentials) -> Result<Box<dyn StorageSession>> {
        let account = match credentials {
            ScopedCredentials::Ambient => self.caller.clone(),
            ScopedCredentials::Assumed { access_key_id, .. } => access_key_id,
        };

        self.connected.lock().push(account.clone());

        if self.refused.contains(&account) {
            return Err(ScError::Service(format!(
                "InvalidClientTokenId: credentials for {account} rejected"
            )));
        }

        let session = self.sessions.get(&account).cloned().unwrap_or_default();
        Ok(Box::new(session))
    }
}
