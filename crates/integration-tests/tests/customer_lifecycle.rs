//! Live customer lifecycle tests.
//!
//! These tests require:
//! - `CHARGIFY_SUBDOMAIN` and `CHARGIFY_API_KEY` in the environment
//! - A Chargify test site (real records are created and deleted)
//!
//! Run with: cargo test -p chargify-integration-tests -- --ignored

use chargify::{ChargifyError, NewCustomer, SortDirection};
use chargify_integration_tests::{test_client, unique_suffix};

#[tokio::test]
#[ignore = "Requires a Chargify test site and API credentials"]
async fn test_customer_lifecycle() {
    let client = test_client();
    let suffix = unique_suffix();

    let new = NewCustomer {
        first_name: format!("First-{suffix}"),
        last_name: format!("Last-{suffix}"),
        email: format!("test+{suffix}@example.com"),
        reference: Some(format!("test-lib-{suffix}")),
        ..NewCustomer::default()
    };

    // Create: email and reference must round-trip
    let customer = client
        .create_customer(&new)
        .await
        .expect("Failed to create customer");
    assert_eq!(customer.email, new.email);
    assert_eq!(customer.reference, new.reference);

    // Page 1 must now be non-empty
    let listed = client
        .list_customers(1, SortDirection::Asc)
        .await
        .expect("Failed to list customers");
    assert!(!listed.is_empty());

    // Search by the exact email we created
    let by_email = client
        .search_customers_by_email(&new.email)
        .await
        .expect("Failed to search by email");
    assert!(!by_email.is_empty());

    // Lookup by reference: exactly one record, matching email
    let reference = new.reference.as_deref().expect("reference was set");
    let by_reference = client
        .customer_by_reference(reference)
        .await
        .expect("Failed to look up by reference");
    assert_eq!(by_reference.email, new.email);

    client
        .delete_customer(customer.id)
        .await
        .expect("Failed to delete customer");
}

#[tokio::test]
#[ignore = "Requires a Chargify test site and API credentials"]
async fn test_delete_missing_customer_fails() {
    let client = test_client();

    // An ID far outside anything a test site will have assigned
    let result = client.delete_customer(9_999_999_999).await;
    assert!(matches!(
        result,
        Err(ChargifyError::NotFound(_) | ChargifyError::Api { .. })
    ));
}
