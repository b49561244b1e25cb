//! Shared test infrastructure.

pub mod localstack;

pub use localstack::LocalStackTestContext;

use sc_inventory::testing::{FakeContainer, FakeIdentity, FakeOrganization, FakeSession, FakeStorage};
use sc_inventory::{FilterPolicy, ScanConfig, Scanner};
use sc_types::{Account, AccountPage, ObjectRecord};

/// Scanner over fakes for the two-account organization used across tests:
/// account 100 (the caller) holds `bkt1` with `x.txt` (10 bytes) and `y.csv`
/// (20 bytes); listing buckets in account 200 fails.
pub fn two_account_scanner(
    config: ScanConfig,
) -> Scanner<FakeIdentity, FakeOrganization, FakeStorage> {
    let organization = FakeOrganization::new(vec![Ok(AccountPage::last(vec![
        Account::new("100").with_name("management"),
        Account::new("200").with_name("workloads"),
    ]))]);

    let storage = FakeStorage::new("100")
        .with_account(
            "100",
            FakeSession::new().with_container(
                "bkt1",
                FakeContainer::paged(vec![vec![
                    ObjectRecord::new("x.txt", 10),
                    ObjectRecord::new("y.csv", 20),
                ]]),
            ),
        )
        .with_account(
            "200",
            FakeSession::new().fail_container_listing("AccessDenied: s3:ListAllMyBuckets"),
        );

    Scanner::new(FakeIdentity::new("100"), organization, storage, config)
}

/// Organization mode with every object accepted.
pub fn org_config() -> ScanConfig {
    ScanConfig::new()
        .with_organization_mode(true)
        .with_filter(FilterPolicy::accept_all())
}
