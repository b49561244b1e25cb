//! Integration tests for storage-census.
//!
//! `scan_test` drives the full scan and report pipeline over the in-memory
//! service fakes and always runs. `localstack_test` talks to a real S3 API
//! and is marked `#[ignore]`.
//!
//! ## Running the LocalStack tests
//!
//! 1. Start LocalStack:
//!    ```bash
//!    docker run -d -p 4566:4566 localstack/localstack
//!    ```
//!
//! 2. Run the ignored tests:
//!    ```bash
//!    LOCALSTACK_ENDPOINT=http://localhost:4566 cargo test -p integration-tests -- --ignored
//!    ```

mod common;
mod localstack_test;
mod scan_test;
