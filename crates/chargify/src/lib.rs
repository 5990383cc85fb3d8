//! Typed async client for the Chargify billing API.
//!
//! Covers the customer and product catalog surface: customers, products,
//! product families, and the public signup pages nested in product
//! responses.
//!
//! Every operation is a single HTTP round trip: validate inputs locally,
//! build the vendor's `{"<resource>": {...}}` envelope, send it through
//! [`ChargifyClient`], and decode the response back into a typed record.
//! The client holds no state between calls; each returned record is a
//! snapshot of server state at the time of that call.
//!
//! # Example
//!
//! ```no_run
//! use chargify::{ChargifyClient, ChargifyConfig, NewCustomer};
//!
//! # async fn run() -> Result<(), chargify::ChargifyError> {
//! let config = ChargifyConfig::new("acme-test", "s3cr3t-api-key");
//! let client = ChargifyClient::new(&config)?;
//!
//! let customer = client
//!     .create_customer(&NewCustomer {
//!         first_name: "Jane".into(),
//!         last_name: "Doe".into(),
//!         email: "jane@example.com".into(),
//!         reference: Some("crm-4521".into()),
//!         ..NewCustomer::default()
//!     })
//!     .await?;
//! assert_eq!(customer.email, "jane@example.com");
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod config;
pub mod customers;
pub mod endpoint;
pub mod error;
pub mod products;

pub use client::{ChargifyClient, Envelope};
pub use config::{ChargifyConfig, ConfigError};
pub use customers::{Customer, NewCustomer, SortDirection};
pub use endpoint::Endpoint;
pub use error::ChargifyError;
pub use products::{IntervalUnit, NewProduct, Product, ProductFamily, SignupPage};
