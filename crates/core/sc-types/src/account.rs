//! Account types produced by organization enumeration.

use serde::{Deserialize, Serialize};

/// A billing/identity boundary within the organization being scanned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account identifier (e.g., "123456789012")
    pub id: String,

    /// Display name reported by the organization service, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Account {
    /// Create an account with just an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// One page of an organization account listing.
#[derive(Debug, Clone, Default)]
pub struct AccountPage {
    /// Accounts on this page
    pub accounts: Vec<Account>,

    /// Cursor for the next page; `None` on the last page
    pub next_cursor: Option<String>,
}

impl AccountPage {
    /// Create a final page (no further cursor).
    pub fn last(accounts: Vec<Account>) -> Self {
        Self {
            accounts,
            next_cursor: None,
        }
    }

    /// Create a page followed by another one.
    pub fn with_cursor(accounts: Vec<Account>, cursor: impl Into<String>) -> Self {
        Self {
            accounts,
            next_cursor: Some(cursor.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_builder() {
        let account = Account::new("100").with_name("prod");
        assert_eq!(account.id, "100");
        assert_eq!(account.name.as_deref(), Some("prod"));
    }

    #[test]
    fn test_account_serialization_skips_missing_name() {
        let json = serde_json::to_string(&Account::new("100")).unwrap();
        assert_eq!(json, r#"{"id":"100"}"#);
    }

    #[test]
    fn test_account_page_constructors() {
        let page = AccountPage::with_cursor(vec![Account::new("1")], "next");
        assert_eq!(page.next_cursor.as_deref(), Some("next"));

        let page = AccountPage::last(vec![]);
        assert!(page.next_cursor.is_none());
        assert!(page.accounts.is_empty());
    }
}
