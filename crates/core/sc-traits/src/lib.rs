//! Core traits for storage-census.
//!
//! This crate defines the external services the scanner consumes:
//! - [`IdentityService`] - Caller identity and cross-account role assumption (STS)
//! - [`OrganizationService`] - Paginated member account listing (Organizations)
//! - [`StorageConnector`] / [`StorageSession`] - Container and object listing (S3)

pub mod identity;
pub mod organization;
pub mod storage;

pub use identity::*;
pub use organization::*;
pub use storage::*;
