//! Error types for the Chargify API client.

use thiserror::Error;

/// Errors that can occur when interacting with the Chargify API.
///
/// No error is retried or suppressed; every failure surfaces directly to
/// the caller. The one tolerated partial failure is the per-element skip
/// in the wrapper-array listings, which is logged rather than returned.
#[derive(Debug, Error)]
pub enum ChargifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Unauthorized (invalid API key or subdomain).
    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input failed local validation; no request was made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Failed to parse a response body.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The response decoded, but not into the expected envelope shape.
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),
}
