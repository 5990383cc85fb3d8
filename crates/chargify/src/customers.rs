//! Customer records and operations.
//!
//! Customers live on the Chargify side; there is no client-side cache.
//! Every read re-fetches, and each returned [`Customer`] is a snapshot of
//! server state at the time of the call.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

use crate::client::ChargifyClient;
use crate::endpoint::Endpoint;
use crate::error::ChargifyError;

/// A Chargify customer.
#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    /// Server-assigned customer ID.
    pub id: i64,
    /// The customer's first name.
    pub first_name: String,
    /// The customer's last name.
    pub last_name: String,
    /// The customer's email address.
    pub email: String,
    /// Company or organization name.
    pub organization: Option<String>,
    /// Caller-chosen opaque reference, usable as an alternate lookup key.
    pub reference: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Street address, second line.
    pub address_2: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or province.
    pub state: Option<String>,
    /// Postal/ZIP code.
    pub zip: Option<String>,
    /// Country code.
    pub country: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Whether the customer's email has been verified.
    #[serde(default)]
    pub verified: bool,
    /// Whether the customer is exempt from tax.
    #[serde(default)]
    pub tax_exempt: bool,
    /// EU VAT number, if provided.
    pub vat_number: Option<String>,
    /// Timestamp indicating when this customer was created.
    pub created_at: Option<String>,
    /// Timestamp indicating when this customer was last updated.
    pub updated_at: Option<String>,
}

/// Fields for creating a customer.
///
/// Email and reference are whatever the caller provides; the library
/// imposes no invariants of its own on them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewCustomer {
    /// The customer's first name.
    pub first_name: String,
    /// The customer's last name.
    pub last_name: String,
    /// The customer's email address.
    pub email: String,
    /// Company or organization name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    /// Opaque reference string, usable later with
    /// [`ChargifyClient::customer_by_reference`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Street address, second line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_2: Option<String>,
    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State or province.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Postal/ZIP code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    /// Country code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// EU VAT number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_number: Option<String>,
}

/// Sort direction for customer listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Query-string value for this direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl ChargifyClient {
    /// Create a new customer.
    ///
    /// Returns the server's record, including its assigned ID. The
    /// returned email and reference round-trip the input's values.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails or the response cannot be
    /// decoded.
    #[instrument(skip(self, new))]
    pub async fn create_customer(&self, new: &NewCustomer) -> Result<Customer, ChargifyError> {
        let body = json!({ "customer": new });
        let envelope = self
            .call(Endpoint::CustomerCreate, &[], &[], Some(&body))
            .await?;
        envelope.resource("customer")
    }

    /// List customers, one page at a time.
    ///
    /// Pages are 1-indexed. An empty page is a valid, empty result, not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails or the response is not an
    /// array.
    #[instrument(skip(self))]
    pub async fn list_customers(
        &self,
        page: u32,
        direction: SortDirection,
    ) -> Result<Vec<Customer>, ChargifyError> {
        let query = [
            ("page", page.to_string()),
            ("direction", direction.as_str().to_string()),
        ];
        let envelope = self.call(Endpoint::CustomerList, &[], &query, None).await?;
        envelope.resource_list("customer")
    }

    /// Search for customers matching an email address.
    ///
    /// Returns every match; an empty result is not an error.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails or the response is not an
    /// array.
    #[instrument(skip(self))]
    pub async fn search_customers_by_email(
        &self,
        email: &str,
    ) -> Result<Vec<Customer>, ChargifyError> {
        let query = [("q", email.to_string())];
        let envelope = self.call(Endpoint::CustomerSearch, &[], &query, None).await?;
        envelope.resource_list("customer")
    }

    /// Look up the single customer with the given reference.
    ///
    /// # Errors
    ///
    /// Returns [`ChargifyError::NotFound`] if no customer carries the
    /// reference, or a shape error if the response lacks the customer
    /// envelope.
    #[instrument(skip(self))]
    pub async fn customer_by_reference(&self, reference: &str) -> Result<Customer, ChargifyError> {
        let query = [("reference", reference.to_string())];
        let envelope = self.call(Endpoint::CustomerLookup, &[], &query, None).await?;
        envelope.resource("customer")
    }

    /// Delete a customer by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the customer does not exist or the request fails.
    #[instrument(skip(self))]
    pub async fn delete_customer(&self, customer_id: i64) -> Result<(), ChargifyError> {
        let id = customer_id.to_string();
        self.call(Endpoint::CustomerDelete, &[("id", &id)], &[], None)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::client::Envelope;

    fn customer_json(id: i64, email: &str) -> Value {
        json!({
            "id": id,
            "first_name": "Jane",
            "last_name": "Doe",
            "email": email,
            "reference": "crm-4521",
            "verified": false,
            "created_at": "2024-03-01T09:12:44-05:00",
            "updated_at": "2024-03-01T09:12:44-05:00"
        })
    }

    #[test]
    fn test_decode_customer_envelope() {
        let envelope =
            Envelope::from_value(json!({"customer": customer_json(8154, "jane@example.com")}))
                .unwrap();
        let customer: Customer = envelope.resource("customer").unwrap();

        assert_eq!(customer.id, 8154);
        assert_eq!(customer.email, "jane@example.com");
        assert_eq!(customer.reference.as_deref(), Some("crm-4521"));
        assert!(customer.organization.is_none());
    }

    #[test]
    fn test_decode_customer_list_skips_bad_elements() {
        let envelope = Envelope::from_value(json!([
            {"customer": customer_json(1, "a@example.com")},
            {"customer": "not an object"},
            {"customer": customer_json(2, "b@example.com")},
        ]))
        .unwrap();

        let customers: Vec<Customer> = envelope.resource_list("customer").unwrap();
        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0].id, 1);
        assert_eq!(customers[1].id, 2);
    }

    #[test]
    fn test_empty_list_is_ok() {
        let envelope = Envelope::from_value(json!([])).unwrap();
        let customers: Vec<Customer> = envelope.resource_list("customer").unwrap();
        assert!(customers.is_empty());
    }

    #[test]
    fn test_new_customer_omits_unset_fields() {
        let new = NewCustomer {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            ..NewCustomer::default()
        };

        let value = serde_json::to_value(&new).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.get("email"), Some(&json!("jane@example.com")));
        assert!(!map.contains_key("reference"));
        assert!(!map.contains_key("organization"));
    }

    #[test]
    fn test_sort_direction_values() {
        assert_eq!(SortDirection::Asc.as_str(), "asc");
        assert_eq!(SortDirection::Desc.as_str(), "desc");
    }
}
