//! HTTP client for the inFakt API.
//!
//! [`ApiClient`] is the single choke point for outbound calls: every tool
//! goes through it, every request carries the authentication header, and
//! every failure is translated through [`ApiError`] before propagating.

use std::time::Duration;

use reqwest::{
    Client, Method,
    header::{HeaderMap, HeaderValue},
};
use serde_json::Value;
use tracing::{debug, warn};

use super::error::ApiError;
use crate::core::config::ApiConfig;
use crate::core::error::Error;

/// Authentication header carried on every request.
pub const AUTH_HEADER: &str = "X-inFakt-ApiKey";

/// Fixed timeout for all remote calls. A timeout is surfaced as a network
/// failure; there is no retry.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Query parameter pairs for list endpoints.
pub type QueryPairs = Vec<(String, String)>;

/// Authenticated client bound to a single base URL.
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from validated configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, Error> {
        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| Error::config("API key contains characters not allowed in a header"))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTH_HEADER, api_key);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch a resource, optionally with query parameters.
    pub async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, ApiError> {
        self.request(Method::GET, path, None, query).await
    }

    /// Create a resource.
    pub async fn post(&self, path: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        self.request(Method::POST, path, body, &[]).await
    }

    /// Replace a resource.
    pub async fn put(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.request(Method::PUT, path, Some(body), &[]).await
    }

    /// Delete a resource.
    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::DELETE, path, None, &[]).await
    }

    /// Fetch an opaque binary payload (e.g. a generated PDF).
    pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let url = self.url(path);
        debug!(%url, "GET (binary)");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body: Option<Value> = response.json().await.ok();
            let err = ApiError::from_status(status.as_u16(), body.as_ref());
            warn!(%url, status = status.as_u16(), "binary request failed: {err}");
            return Err(err);
        }

        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| ApiError::network(e.to_string()))
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: &[(String, String)],
    ) -> Result<Value, ApiError> {
        let url = self.url(path);
        debug!(%method, %url, "API request");

        let mut request = self.http.request(method, &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            let err = ApiError::network(e.to_string());
            warn!(%url, "request failed: {err}");
            err
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;

        // Acceptance band is strictly 2xx.
        if !status.is_success() {
            let body: Option<Value> = serde_json::from_str(&text).ok();
            let err = ApiError::from_status(status.as_u16(), body.as_ref());
            warn!(%url, status = status.as_u16(), "API request failed: {err}");
            return Err(err);
        }

        // DELETE and some action endpoints respond with an empty body.
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text)
            .map_err(|e| ApiError::network(format!("failed to decode response body: {e}")))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ApiConfig;

    fn test_config() -> ApiConfig {
        ApiConfig {
            api_key: "test-api-key-0123456789".to_string(),
            base_url: "https://api.sandbox-infakt.pl/api/v3/".to_string(),
            sandbox: true,
        }
    }

    #[test]
    fn test_client_builds_from_config() {
        assert!(ApiClient::new(&test_config()).is_ok());
    }

    #[test]
    fn test_trailing_slash_stripped_from_base_url() {
        let client = ApiClient::new(&test_config()).unwrap();
        assert_eq!(
            client.url("/invoices.json"),
            "https://api.sandbox-infakt.pl/api/v3/invoices.json"
        );
    }

    #[test]
    fn test_api_key_with_invalid_header_bytes_rejected() {
        let mut config = test_config();
        config.api_key = "line\nbreak".to_string();
        assert!(ApiClient::new(&config).is_err());
    }
}
