//! The Chargify HTTP client and response envelope handling.
//!
//! Chargify responses come in two shapes: a JSON object keying a single
//! record by its resource name (`{"customer": {...}}`), or an array of
//! such single-key objects. [`Envelope`] models that split explicitly so
//! every operation unwraps its response with a typed accessor instead of
//! a dynamic cast.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde_json::Value;

use crate::config::ChargifyConfig;
use crate::endpoint::Endpoint;
use crate::error::ChargifyError;

/// Chargify API client.
///
/// Stateless: cloning is cheap, clones share the underlying connection
/// pool, and calls are safe to issue concurrently from multiple tasks.
/// No retry, caching, or timeout policy of its own; timeouts are left to
/// the transport.
#[derive(Clone)]
pub struct ChargifyClient {
    inner: Arc<ChargifyClientInner>,
}

struct ChargifyClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl ChargifyClient {
    /// Create a new Chargify API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build or the API key
    /// contains characters invalid in a header.
    pub fn new(config: &ChargifyConfig) -> Result<Self, ChargifyError> {
        let mut headers = HeaderMap::new();

        // Chargify authenticates with HTTP Basic: API key as the
        // username, literal "x" as the password
        let credentials = BASE64.encode(format!("{}:x", config.api_key.expose_secret()));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Basic {credentials}"))
                .map_err(|e| ChargifyError::Parse(format!("Invalid API key format: {e}")))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(ChargifyClientInner {
                client,
                base_url: config.base_url(),
            }),
        })
    }

    /// Invoke a named endpoint: substitute path parameters, attach query
    /// parameters and the JSON body if present, and decode the response
    /// into an [`Envelope`].
    ///
    /// Every public operation funnels through here; none of them touch
    /// the HTTP layer directly.
    pub(crate) async fn call(
        &self,
        endpoint: Endpoint,
        path_params: &[(&str, &str)],
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Envelope, ChargifyError> {
        let path = endpoint.path(path_params)?;
        let url = format!("{}/{path}", self.inner.base_url);

        let mut request = self.inner.client.request(endpoint.method(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Handle an API response, decoding the body into an envelope.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<Envelope, ChargifyError> {
        let status = response.status();

        if status.is_success() {
            let text = response.text().await?;
            // Deletes and archives come back with no body
            if text.is_empty() {
                return Ok(Envelope::empty());
            }
            let value: Value = serde_json::from_str(&text)
                .map_err(|e| ChargifyError::Parse(format!("Failed to parse response: {e}")))?;
            return Envelope::from_value(value);
        }

        Err(self.parse_error(response).await)
    }

    /// Parse an error response from the Chargify API.
    async fn parse_error(&self, response: reqwest::Response) -> ChargifyError {
        let status = response.status().as_u16();

        if status == 401 || status == 403 {
            return ChargifyError::Unauthorized;
        }

        if status == 404 {
            return ChargifyError::NotFound("Resource not found".to_string());
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        ChargifyError::Api { status, message }
    }
}

impl std::fmt::Debug for ChargifyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChargifyClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

/// A decoded response body: either a single-record object envelope or an
/// array of per-record envelopes.
#[derive(Debug, Clone)]
pub enum Envelope {
    /// A JSON object body, e.g. `{"customer": {...}}`.
    Object(serde_json::Map<String, Value>),
    /// A JSON array body, e.g. `[{"product": {...}}, ...]`.
    Array(Vec<Value>),
}

impl Envelope {
    /// An empty object envelope, standing in for bodyless responses.
    #[must_use]
    pub fn empty() -> Self {
        Self::Object(serde_json::Map::new())
    }

    /// Build an envelope from a decoded JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error for scalar or null bodies.
    pub fn from_value(value: Value) -> Result<Self, ChargifyError> {
        match value {
            Value::Object(map) => Ok(Self::Object(map)),
            Value::Array(items) => Ok(Self::Array(items)),
            other => Err(ChargifyError::UnexpectedShape(format!(
                "expected object or array, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Extract and decode the record under `key` from an object envelope.
    ///
    /// # Errors
    ///
    /// Returns an error if the envelope is an array, the key is missing,
    /// or the record does not decode into `T`.
    pub fn resource<T: serde::de::DeserializeOwned>(self, key: &str) -> Result<T, ChargifyError> {
        let Self::Object(mut map) = self else {
            return Err(ChargifyError::UnexpectedShape(format!(
                "expected '{key}' object, got array"
            )));
        };
        let value = map
            .remove(key)
            .ok_or_else(|| ChargifyError::UnexpectedShape(format!("response has no '{key}' key")))?;
        serde_json::from_value(value)
            .map_err(|e| ChargifyError::Parse(format!("Failed to decode '{key}': {e}")))
    }

    /// Unwrap an array envelope of `{"<key>": {...}}` elements into
    /// records.
    ///
    /// An element that is missing the key or fails to decode is dropped
    /// with a warning; the rest of the list is still returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the envelope is not an array.
    pub fn resource_list<T: serde::de::DeserializeOwned>(
        self,
        key: &str,
    ) -> Result<Vec<T>, ChargifyError> {
        let Self::Array(items) = self else {
            return Err(ChargifyError::UnexpectedShape(format!(
                "expected array of '{key}' objects, got object"
            )));
        };
        let mut records = Vec::with_capacity(items.len());
        for item in items {
            let raw = match item {
                Value::Object(mut map) => map.remove(key),
                _ => None,
            };
            let Some(raw) = raw else {
                tracing::warn!(resource = key, "skipping list element without resource key");
                continue;
            };
            match serde_json::from_value::<T>(raw) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(resource = key, error = %e, "skipping undecodable list element");
                }
            }
        }
        Ok(records)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
