//! Product catalog records and operations.
//!
//! Products are grouped into product families; a product response may
//! embed its family and any public signup pages. All reads re-fetch from
//! Chargify; nothing is cached between calls.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

use crate::client::ChargifyClient;
use crate::endpoint::Endpoint;
use crate::error::ChargifyError;

/// Billing interval unit for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalUnit {
    Month,
    Day,
}

impl IntervalUnit {
    /// Wire value for this unit.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Day => "day",
        }
    }
}

/// A Chargify product.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    /// Server-assigned product ID.
    pub id: i64,
    /// The product price, in integer cents.
    pub price_in_cents: i64,
    /// The product name.
    pub name: String,
    /// The product API handle, usable as an alternate lookup key.
    pub handle: Option<String>,
    /// The product description.
    pub description: Option<String>,
    /// The family this product belongs to.
    pub product_family: Option<ProductFamily>,
    /// Billing interval unit, coupled with `interval`.
    pub interval_unit: Option<IntervalUnit>,
    /// Billing interval value; an interval of 30 with a unit of `day`
    /// renews every 30 days.
    #[serde(default)]
    pub interval: i64,
    /// Up-front charge, in integer cents.
    pub initial_charge_in_cents: Option<i64>,
    /// Trial period price, in integer cents.
    pub trial_price_in_cents: Option<i64>,
    /// Trial period interval value.
    pub trial_interval: Option<i64>,
    /// Trial period interval unit.
    pub trial_interval_unit: Option<IntervalUnit>,
    /// Interval value after which a subscription to this product expires.
    pub expiration_interval: Option<i64>,
    /// Interval unit for `expiration_interval`.
    pub expiration_interval_unit: Option<IntervalUnit>,
    /// The product version.
    pub version_number: Option<i64>,
    /// URL a customer is returned to after a successful account update.
    pub update_return_url: Option<String>,
    /// Params appended to `update_return_url`.
    pub update_return_params: Option<String>,
    /// Whether a credit card is required at signup.
    #[serde(default)]
    pub require_credit_card: bool,
    /// Whether a credit card is requested (but not required) at signup.
    #[serde(default)]
    pub request_credit_card: bool,
    /// Timestamp indicating when this product was created.
    pub created_at: Option<String>,
    /// Timestamp indicating when this product was last updated.
    pub updated_at: Option<String>,
    /// Timestamp indicating when this product was archived.
    pub archived_at: Option<String>,
    /// Public signup pages for this product.
    pub public_signup_pages: Option<Vec<SignupPage>>,
    /// Tax code for the product type (max 10 characters on the vendor
    /// side).
    pub tax_code: Option<String>,
}

/// A product's public signup page.
///
/// Read-only; populated only as part of a product response.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupPage {
    /// The signup page ID.
    pub id: i64,
    /// URL where the signup page can be viewed.
    pub url: Option<String>,
    /// URL a customer is returned to after a successful signup.
    pub return_url: Option<String>,
    /// Params appended to `return_url`.
    pub return_params: Option<String>,
}

/// A Chargify product family.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductFamily {
    /// Server-assigned family ID.
    pub id: i64,
    /// The product family name.
    pub name: String,
    /// The product family API handle.
    pub handle: Option<String>,
    /// The product family description.
    pub description: Option<String>,
    /// Accounting code; carries no behavior on the Chargify side.
    pub accounting_code: Option<String>,
}

/// Fields for creating or updating a product.
///
/// `interval_unit` and `interval` describe the billing period; both must
/// be set before a create call will be issued.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewProduct {
    /// The product name.
    pub name: String,
    /// The product API handle.
    pub handle: String,
    /// The product description.
    pub description: String,
    /// The product price, in integer cents.
    pub price_in_cents: i64,
    /// Billing interval unit.
    pub interval_unit: Option<IntervalUnit>,
    /// Billing interval value.
    pub interval: i64,
    /// Up-front charge, in integer cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_charge_in_cents: Option<i64>,
    /// Trial period price, in integer cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_price_in_cents: Option<i64>,
    /// Trial period interval value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_interval: Option<i64>,
    /// Trial period interval unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_interval_unit: Option<IntervalUnit>,
    /// Interval value after which subscriptions expire.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_interval: Option<i64>,
    /// Interval unit for `expiration_interval`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_interval_unit: Option<IntervalUnit>,
    /// URL a customer is returned to after a successful account update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_return_url: Option<String>,
    /// Params appended to `update_return_url`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_return_params: Option<String>,
    /// Whether a credit card is required at signup.
    pub require_credit_card: bool,
    /// Whether a credit card is requested (but not required) at signup.
    pub request_credit_card: bool,
    /// Whether to create a public signup page with the product.
    pub auto_create_signup_page: bool,
    /// Tax code for the product type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_code: Option<String>,
}

/// Check the fields a product create call requires, before any I/O.
fn validate_new_product(new: &NewProduct) -> Result<(), ChargifyError> {
    if new.name.is_empty() || new.handle.is_empty() || new.description.is_empty() {
        return Err(ChargifyError::Validation(
            "name, handle, and description are required".to_string(),
        ));
    }
    if new.price_in_cents <= 0 {
        return Err(ChargifyError::Validation(
            "price in cents must be greater than 0".to_string(),
        ));
    }
    if new.interval_unit.is_none() || new.interval == 0 {
        return Err(ChargifyError::Validation(
            "interval unit and interval value must be provided".to_string(),
        ));
    }
    Ok(())
}

impl ChargifyClient {
    /// Create a new product family.
    ///
    /// The accounting code may be empty; the other fields may not.
    ///
    /// # Errors
    ///
    /// Returns [`ChargifyError::Validation`] (without making a network
    /// call) if name, description, or handle is empty; otherwise any
    /// transport or decode failure.
    #[instrument(skip(self, description, accounting_code))]
    pub async fn create_product_family(
        &self,
        name: &str,
        description: &str,
        handle: &str,
        accounting_code: &str,
    ) -> Result<ProductFamily, ChargifyError> {
        if name.is_empty() || description.is_empty() || handle.is_empty() {
            return Err(ChargifyError::Validation(
                "name, handle, and description are all required".to_string(),
            ));
        }

        let body = json!({
            "product_family": {
                "name": name,
                "description": description,
                "handle": handle,
                "accounting_code": accounting_code,
            }
        });
        let envelope = self
            .call(Endpoint::ProductFamilyCreate, &[], &[], Some(&body))
            .await?;
        envelope.resource("product_family")
    }

    /// Fetch a product family by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the family does not exist or the response is not
    /// the expected envelope.
    #[instrument(skip(self))]
    pub async fn product_family(&self, family_id: i64) -> Result<ProductFamily, ChargifyError> {
        let id = family_id.to_string();
        let envelope = self
            .call(Endpoint::ProductFamilyGet, &[("family_id", &id)], &[], None)
            .await?;
        envelope.resource("product_family")
    }

    /// Create a product inside a family.
    ///
    /// Returns the server's record, including its assigned ID and
    /// timestamps; the input is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ChargifyError::Validation`] (without making a network
    /// call) if name, handle, or description is empty, the price is not
    /// positive, or the billing interval is unset; otherwise any
    /// transport or decode failure.
    #[instrument(skip(self, new), fields(handle = %new.handle))]
    pub async fn create_product(
        &self,
        family_id: i64,
        new: &NewProduct,
    ) -> Result<Product, ChargifyError> {
        validate_new_product(new)?;

        let id = family_id.to_string();
        let body = json!({ "product": new });
        let envelope = self
            .call(
                Endpoint::ProductCreate,
                &[("family_id", &id)],
                &[],
                Some(&body),
            )
            .await?;
        envelope.resource("product")
    }

    /// Fetch a product by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the product does not exist or the response is not
    /// the expected envelope.
    #[instrument(skip(self))]
    pub async fn product(&self, product_id: i64) -> Result<Product, ChargifyError> {
        let id = product_id.to_string();
        let envelope = self
            .call(Endpoint::ProductById, &[("product_id", &id)], &[], None)
            .await?;
        envelope.resource("product")
    }

    /// Fetch a product by its handle.
    ///
    /// # Errors
    ///
    /// Returns error if no product carries the handle or the response is
    /// not the expected envelope.
    #[instrument(skip(self))]
    pub async fn product_by_handle(&self, handle: &str) -> Result<Product, ChargifyError> {
        let envelope = self
            .call(Endpoint::ProductByHandle, &[("handle", handle)], &[], None)
            .await?;
        envelope.resource("product")
    }

    /// List all products in a family.
    ///
    /// The vendor returns this as an array of `{"product": {...}}`
    /// wrappers; each element is unwrapped individually, and an element
    /// that fails to decode is dropped with a warning rather than
    /// failing the whole listing.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response is not an
    /// array.
    #[instrument(skip(self))]
    pub async fn products_in_family(&self, family_id: i64) -> Result<Vec<Product>, ChargifyError> {
        let id = family_id.to_string();
        let envelope = self
            .call(Endpoint::ProductsInFamily, &[("family_id", &id)], &[], None)
            .await?;
        envelope.resource_list("product")
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails; the response body is not
    /// inspected beyond its status.
    #[instrument(skip(self, update))]
    pub async fn update_product(
        &self,
        product_id: i64,
        update: &NewProduct,
    ) -> Result<(), ChargifyError> {
        let id = product_id.to_string();
        let body = json!({ "product": update });
        self.call(
            Endpoint::ProductUpdate,
            &[("product_id", &id)],
            &[],
            Some(&body),
        )
        .await?;
        Ok(())
    }

    /// Archive (soft-delete) a product by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the product does not exist or the request fails.
    #[instrument(skip(self))]
    pub async fn archive_product(&self, product_id: i64) -> Result<(), ChargifyError> {
        let id = product_id.to_string();
        self.call(Endpoint::ProductArchive, &[("product_id", &id)], &[], None)
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
    use crate::config::ChargifyConfig;

    fn test_client() -> ChargifyClient {
        ChargifyClient::new(&ChargifyConfig::new("test-site", "test-key")).unwrap()
    }

    fn valid_new_product() -> NewProduct {
        NewProduct {
            name: "Gold Plan".to_string(),
            handle: "gold-plan".to_string(),
            description: "Monthly gold subscription".to_string(),
            price_in_cents: 1000,
            interval_unit: Some(IntervalUnit::Month),
            interval: 1,
            ..NewProduct::default()
        }
    }

    fn product_json(id: i64, handle: &str) -> Value {
        json!({
            "id": id,
            "price_in_cents": 1000,
            "name": "Gold Plan",
            "handle": handle,
            "description": "Monthly gold subscription",
            "interval_unit": "month",
            "interval": 1,
            "require_credit_card": true,
            "created_at": "2024-03-01T09:12:44-05:00",
            "updated_at": "2024-03-01T09:12:44-05:00",
            "product_family": {
                "id": 77,
                "name": "Plans",
                "handle": "plans",
                "description": "All plans",
                "accounting_code": "PL-1"
            },
            "public_signup_pages": [
                {
                    "id": 5,
                    "url": "https://acme-test.chargify.com/subscribe/abc/gold-plan",
                    "return_url": "https://example.com/welcome",
                    "return_params": "state=done"
                }
            ]
        })
    }

    #[tokio::test]
    async fn test_create_family_rejects_empty_name() {
        let client = test_client();
        let result = client
            .create_product_family("", "desc", "handle", "acct")
            .await;
        assert!(matches!(result, Err(ChargifyError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_family_rejects_empty_handle() {
        let client = test_client();
        let result = client.create_product_family("name", "desc", "", "").await;
        assert!(matches!(result, Err(ChargifyError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_family_rejects_empty_description() {
        let client = test_client();
        let result = client
            .create_product_family("name", "", "handle", "acct")
            .await;
        assert!(matches!(result, Err(ChargifyError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_product_rejects_zero_price() {
        let client = test_client();
        let new = NewProduct {
            price_in_cents: 0,
            ..valid_new_product()
        };
        let result = client.create_product(77, &new).await;
        assert!(matches!(result, Err(ChargifyError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_product_rejects_negative_price() {
        let client = test_client();
        let new = NewProduct {
            price_in_cents: -500,
            ..valid_new_product()
        };
        let result = client.create_product(77, &new).await;
        assert!(matches!(result, Err(ChargifyError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_product_rejects_missing_interval_unit() {
        let client = test_client();
        let new = NewProduct {
            interval_unit: None,
            ..valid_new_product()
        };
        let result = client.create_product(77, &new).await;
        assert!(matches!(result, Err(ChargifyError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_product_rejects_zero_interval() {
        let client = test_client();
        let new = NewProduct {
            interval: 0,
            ..valid_new_product()
        };
        let result = client.create_product(77, &new).await;
        assert!(matches!(result, Err(ChargifyError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_product_rejects_blank_fields() {
        let client = test_client();
        let new = NewProduct {
            name: String::new(),
            ..valid_new_product()
        };
        let result = client.create_product(77, &new).await;
        assert!(matches!(result, Err(ChargifyError::Validation(_))));
    }

    #[test]
    fn test_decode_product_envelope() {
        let envelope =
            Envelope::from_value(json!({"product": product_json(3801, "gold-plan")})).unwrap();
        let product: Product = envelope.resource("product").unwrap();

        assert_eq!(product.id, 3801);
        assert_eq!(product.handle.as_deref(), Some("gold-plan"));
        assert_eq!(product.interval_unit, Some(IntervalUnit::Month));
        assert!(product.require_credit_card);

        let family = product.product_family.unwrap();
        assert_eq!(family.id, 77);

        let pages = product.public_signup_pages.unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].id, 5);
    }

    #[test]
    fn test_family_listing_skips_undecodable_element() {
        let envelope = Envelope::from_value(json!([
            {"product": product_json(1, "gold-plan")},
            {"product": {"id": "not-a-number", "name": 12}},
            {"product": product_json(2, "silver-plan")},
            {"product": product_json(3, "bronze-plan")},
        ]))
        .unwrap();

        let products: Vec<Product> = envelope.resource_list("product").unwrap();
        assert_eq!(products.len(), 3);
        assert_eq!(products[0].id, 1);
        assert_eq!(products[2].id, 3);
    }

    #[test]
    fn test_interval_unit_round_trip() {
        assert_eq!(serde_json::to_value(IntervalUnit::Month).unwrap(), "month");
        assert_eq!(
            serde_json::from_value::<IntervalUnit>(json!("day")).unwrap(),
            IntervalUnit::Day
        );
        assert_eq!(IntervalUnit::Day.as_str(), "day");
    }

    #[test]
    fn test_new_product_serializes_interval_fields() {
        let value = serde_json::to_value(valid_new_product()).unwrap();
        let map = value.as_object().unwrap();

        assert_eq!(map.get("interval_unit"), Some(&json!("month")));
        assert_eq!(map.get("interval"), Some(&json!(1)));
        assert!(!map.contains_key("trial_price_in_cents"));
    }
}
