//! AWS Organizations-backed account directory.

use async_trait::async_trait;
use aws_config::SdkConfig;
use sc_error::{Result, ScError};
use sc_traits::OrganizationService;
use sc_types::{Account, AccountPage};

/// Lists member accounts of the caller's organization.
#[derive(Debug, Clone)]
pub struct OrganizationsDirectory {
    client: aws_sdk_organizations::Client,
}

impl OrganizationsDirectory {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_organizations::Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl OrganizationService for OrganizationsDirectory {
    async fn list_accounts(&self, cursor: Option<&str>) -> Result<AccountPage> {
        let resp = self
            .client
            .list_accounts()
            .set_next_token(cursor.map(str::to_string))
            .send()
            .await
            .map_err(|e| ScError::service(aws_sdk_organizations::error::DisplayErrorContext(e)))?;

        let accounts = resp
            .accounts()
            .iter()
            .filter_map(|a| {
                let id = a.id()?;
                let account = Account::new(id);
                Some(match a.name() {
                    Some(name) => account.with_name(name),
                    None => account,
                })
            })
            .collect();

        Ok(AccountPage {
            accounts,
            next_cursor: resp.next_token().map(str::to_string),
        })
    }
}
