//! HTTP transport for the submission API
//!
//! This module defines the [`Transport`] trait the submitter talks through
//! and the production [`HttpTransport`] implementation. Keeping the trait
//! narrow (raw status + body in, raw body out) lets the submission logic be
//! tested against scripted responses without a network.

use crate::config::SecretString;
use crate::domain::{ApiError, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use std::time::Duration;

/// Raw response from the submission API
///
/// Non-2xx statuses are data here, not errors. The submitter decides what a
/// status means for the records in the batch.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,

    /// Response body as text
    pub body: String,
}

impl ApiResponse {
    /// Check if the response has a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Headers sent with every submission API request
///
/// The bearer token and supplier key are secrets; `log_preview` is the only
/// sanctioned way to get them near a log line.
pub struct ApiHeaders {
    /// OAuth bearer token
    token: SecretString,

    /// Supplier key issued alongside API access
    supplier_key: SecretString,

    /// User agent string
    user_agent: String,
}

impl ApiHeaders {
    /// Create headers from an acquired token and the configured supplier key
    pub fn new(token: SecretString, supplier_key: SecretString) -> Self {
        Self {
            token,
            supplier_key,
            user_agent: concat!("hermes/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Render the headers as name/value pairs
    ///
    /// Token and supplier key are trimmed; trailing whitespace from an env
    /// var or token endpoint would otherwise corrupt the header values.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "Authorization",
                format!("Bearer {}", self.token.expose_secret().as_ref().trim()),
            ),
            ("Content-Type", "application/json".to_string()),
            (
                "SupplierKey",
                self.supplier_key.expose_secret().as_ref().trim().to_string(),
            ),
            ("User-Agent", self.user_agent.clone()),
        ]
    }

    /// Log a masked preview of the headers at debug level
    pub fn log_preview(&self, endpoint: &str) {
        tracing::debug!(
            authorization = %format!("Bearer {}", self.token.expose_secret().preview()),
            supplier_key = %self.supplier_key.expose_secret().preview(),
            user_agent = %self.user_agent,
            endpoint = %endpoint,
            "Prepared API headers"
        );
    }
}

/// Transport abstraction over the submission API
///
/// Implementations return `Err` only for transport-level failures
/// (connection, timeout, unreadable response). Any HTTP status the server
/// actually produced comes back as an [`ApiResponse`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a JSON body to the given URL
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute URL to post to
    /// * `headers` - Headers to send
    /// * `body` - Serialized JSON body
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent or the response body
    /// cannot be read.
    async fn post(&self, url: &str, headers: &ApiHeaders, body: String) -> Result<ApiResponse>;

    /// GET the given URL (diagnostics only)
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    async fn get(&self, url: &str, headers: &ApiHeaders) -> Result<ApiResponse>;
}

/// Production transport backed by a reqwest client
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a new transport
    ///
    /// # Arguments
    ///
    /// * `timeout_seconds` - Per-request timeout
    pub fn new(timeout_seconds: u64) -> Self {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, url: &str, headers: &ApiHeaders, body: String) -> Result<ApiResponse> {
        let mut request = self.client.post(url).body(body);
        for (name, value) in headers.to_pairs() {
            request = request.header(name, value);
        }

        let resp = request.send().await.map_err(ApiError::from)?;
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();

        tracing::debug!(url = %url, status = status, "POST completed");
        Ok(ApiResponse { status, body })
    }

    async fn get(&self, url: &str, headers: &ApiHeaders) -> Result<ApiResponse> {
        let mut request = self.client.get(url);
        for (name, value) in headers.to_pairs() {
            request = request.header(name, value);
        }

        let resp = request.send().await.map_err(ApiError::from)?;
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();

        tracing::debug!(url = %url, status = status, "GET completed");
        Ok(ApiResponse { status, body })
    }
}

/// Build headers for test fixtures
#[cfg(test)]
pub(crate) fn test_headers() -> ApiHeaders {
    use crate::config::secret_string;

    ApiHeaders::new(
        secret_string("test-token-12345".to_string()),
        secret_string("supplier-key-67890".to_string()),
    )
}
