//! Integration tests for the Chargify client.
//!
//! These tests run against a real Chargify test site and create, mutate,
//! and delete live records. They are `#[ignore]`d by default.
//!
//! # Running Tests
//!
//! ```bash
//! export CHARGIFY_SUBDOMAIN=your-test-site
//! export CHARGIFY_API_KEY=your-api-key
//!
//! cargo test -p chargify-integration-tests -- --ignored
//! ```
//!
//! Use a dedicated test site: the product catalog tests archive what they
//! create, but archived products remain visible in the Chargify admin.

#![cfg_attr(not(test), forbid(unsafe_code))]

use chargify::{ChargifyClient, ChargifyConfig};
use rand::Rng;

/// Build a client from `CHARGIFY_SUBDOMAIN` / `CHARGIFY_API_KEY`.
///
/// # Panics
///
/// Panics if the environment is not configured or the client fails to
/// build; the lifecycle tests cannot run without live credentials.
#[must_use]
pub fn test_client() -> ChargifyClient {
    let config = ChargifyConfig::from_env()
        .expect("CHARGIFY_SUBDOMAIN and CHARGIFY_API_KEY must be set for integration tests");
    ChargifyClient::new(&config).expect("Failed to build Chargify client")
}

/// Random suffix for unique names, handles, and references, so repeated
/// runs against the same test site never collide.
#[must_use]
pub fn unique_suffix() -> i64 {
    rand::rng().random_range(0..999_999_999)
}
