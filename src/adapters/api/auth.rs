//! OAuth2 token acquisition
//!
//! The submission API authenticates with OAuth2 client credentials. A token
//! is fetched once per run, before the first batch; a run that cannot get a
//! token aborts before touching the staging store.

use crate::config::{secret_string, OAuthConfig, SecretString};
use crate::domain::{HermesError, Result};
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::time::Duration;

/// Token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// OAuth2 client-credentials token client
pub struct TokenClient {
    client: Client,
    config: OAuthConfig,
}

impl TokenClient {
    /// Create a new token client
    ///
    /// # Arguments
    ///
    /// * `config` - OAuth configuration
    /// * `timeout_seconds` - Request timeout
    pub fn new(config: OAuthConfig, timeout_seconds: u64) -> Self {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self { client, config }
    }

    /// Fetch a bearer token from the configured token endpoint
    ///
    /// # Errors
    ///
    /// Returns `HermesError::Authentication` if the request fails, the
    /// endpoint rejects the credentials, or the response carries no token.
    ///
    /// # Returns
    ///
    /// The acquired access token as a secret.
    pub async fn fetch_token(&self) -> Result<SecretString> {
        tracing::info!(
            token_endpoint = %self.config.token_endpoint,
            "Requesting OAuth token"
        );

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.expose_secret().as_ref()),
            ("scope", self.config.scope.as_str()),
        ];

        let resp = self
            .client
            .post(&self.config.token_endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| HermesError::Authentication(format!("Token request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(HermesError::Authentication(format!(
                "Token endpoint returned {status}: {body}"
            )));
        }

        let token_response = resp.json::<TokenResponse>().await.map_err(|e| {
            HermesError::Authentication(format!("Invalid token response: {e}"))
        })?;

        match token_response.access_token {
            Some(token) if !token.trim().is_empty() => {
                let token = secret_string(token);
                tracing::debug!(
                    token = %token.expose_secret().preview(),
                    "OAuth token retrieved"
                );
                Ok(token)
            }
            _ => Err(HermesError::Authentication(
                "Token response missing access_token".to_string(),
            )),
        }
    }
}
