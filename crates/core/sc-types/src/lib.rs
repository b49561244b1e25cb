//! Core types for storage-census.
//!
//! This crate provides the value types exchanged with external services:
//! - [`Account`] / [`AccountPage`] - Organization membership listing
//! - [`ObjectRecord`] / [`ObjectPage`] - Paginated object listing
//! - [`ScopedCredentials`] - Per-account access for one scan

pub mod account;
pub mod credentials;
pub mod object;

pub use account::*;
pub use credentials::*;
pub use object::*;
