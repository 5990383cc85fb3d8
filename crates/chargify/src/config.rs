//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CHARGIFY_SUBDOMAIN` - Site subdomain (e.g., `acme-test` for
//!   acme-test.chargify.com)
//! - `CHARGIFY_API_KEY` - Private API key, sent via HTTP Basic auth
//!
//! ## Optional
//! - `CHARGIFY_BASE_URL` - Full base URL override (points the client at a
//!   test server instead of `https://<subdomain>.chargify.com`)

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// Chargify API client configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct ChargifyConfig {
    /// Site subdomain (e.g., `acme-test`)
    pub subdomain: String,
    /// Private API key for HTTP Basic authentication
    pub api_key: SecretString,
    /// Base URL override; when unset, derived from the subdomain
    pub base_url_override: Option<String>,
}

impl ChargifyConfig {
    /// Create a configuration from a subdomain and API key.
    #[must_use]
    pub fn new(subdomain: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            subdomain: subdomain.into(),
            api_key: SecretString::from(api_key.into()),
            base_url_override: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let subdomain = get_required_env("CHARGIFY_SUBDOMAIN")?;
        let api_key = SecretString::from(get_required_env("CHARGIFY_API_KEY")?);
        let base_url_override = get_optional_env("CHARGIFY_BASE_URL");

        Ok(Self {
            subdomain,
            api_key,
            base_url_override,
        })
    }

    /// The base URL all endpoint paths are resolved against.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.base_url_override
            .clone()
            .unwrap_or_else(|| format!("https://{}.chargify.com", self.subdomain))
    }
}

impl std::fmt::Debug for ChargifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChargifyConfig")
            .field("subdomain", &self.subdomain)
            .field("api_key", &"[REDACTED]")
            .field("base_url_override", &self.base_url_override)
            .finish()
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_from_subdomain() {
        let config = ChargifyConfig::new("acme-test", "key");
        assert_eq!(config.base_url(), "https://acme-test.chargify.com");
    }

    #[test]
    fn test_base_url_override_wins() {
        let mut config = ChargifyConfig::new("acme-test", "key");
        config.base_url_override = Some("http://localhost:4000".to_string());
        assert_eq!(config.base_url(), "http://localhost:4000");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ChargifyConfig::new("acme-test", "super_secret_api_key");

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("acme-test"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_api_key"));
    }
}
