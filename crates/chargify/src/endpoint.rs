//! Registry of Chargify API endpoints.
//!
//! Each remote operation is a variant of [`Endpoint`] pairing an HTTP
//! method with a path template, so an unknown operation is a compile
//! error rather than a bad string. Templates use `{name}` placeholders
//! filled in at call time; a call with a missing parameter fails before
//! any request is sent.

use reqwest::Method;

use crate::error::ChargifyError;

/// A named remote operation: HTTP verb plus path template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Create a customer.
    CustomerCreate,
    /// List customers a page at a time.
    CustomerList,
    /// Search customers by email.
    CustomerSearch,
    /// Look up the single customer with a given reference.
    CustomerLookup,
    /// Delete a customer by ID.
    CustomerDelete,
    /// Create a product family.
    ProductFamilyCreate,
    /// Fetch a product family by ID.
    ProductFamilyGet,
    /// Create a product inside a family.
    ProductCreate,
    /// Fetch a product by ID.
    ProductById,
    /// Fetch a product by handle.
    ProductByHandle,
    /// List the products in a family.
    ProductsInFamily,
    /// Update a product.
    ProductUpdate,
    /// Archive (soft-delete) a product.
    ProductArchive,
}

impl Endpoint {
    /// The HTTP method for this operation.
    #[must_use]
    pub fn method(self) -> Method {
        match self {
            Self::CustomerCreate | Self::ProductFamilyCreate | Self::ProductCreate => Method::POST,
            Self::CustomerList
            | Self::CustomerSearch
            | Self::CustomerLookup
            | Self::ProductFamilyGet
            | Self::ProductById
            | Self::ProductByHandle
            | Self::ProductsInFamily => Method::GET,
            Self::ProductUpdate => Method::PUT,
            Self::CustomerDelete | Self::ProductArchive => Method::DELETE,
        }
    }

    /// The path template for this operation, relative to the site base URL.
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::CustomerCreate | Self::CustomerList | Self::CustomerSearch => "customers.json",
            Self::CustomerLookup => "customers/lookup.json",
            Self::CustomerDelete => "customers/{id}.json",
            Self::ProductFamilyCreate => "product_families.json",
            Self::ProductFamilyGet => "product_families/{family_id}.json",
            Self::ProductCreate | Self::ProductsInFamily => {
                "product_families/{family_id}/products.json"
            }
            Self::ProductById | Self::ProductUpdate | Self::ProductArchive => {
                "products/{product_id}.json"
            }
            Self::ProductByHandle => "products/handle/{handle}.json",
        }
    }

    /// Render the path template, substituting `{name}` placeholders from
    /// `params`. Values are percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns an error if a placeholder has no matching parameter.
    pub fn path(self, params: &[(&str, &str)]) -> Result<String, ChargifyError> {
        let mut path = self.template().to_string();
        for (name, value) in params {
            path = path.replace(&format!("{{{name}}}"), &urlencoding::encode(value));
        }
        if path.contains('{') {
            return Err(ChargifyError::Validation(format!(
                "unfilled path parameter in template '{}'",
                self.template()
            )));
        }
        Ok(path)
    }
}
