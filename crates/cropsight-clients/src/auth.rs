//! Token issuer binding (OAuth2 client credentials)
//!
//! One form-encoded POST per pipeline run. Credentials are injected
//! configuration resolved at startup, never literals at the call site.

use crate::http::{error_body, join_url};
use async_trait::async_trait;
use cropsight_core::error::AuthError;
use cropsight_core::ports::TokenProvider;
use cropsight_types::AccessToken;
use serde::Deserialize;

/// Token endpoint path at the issuer
pub const TOKEN_PATH: &str = "auth/realms/CDSE/protocol/openid-connect/token";

/// Pre-shared client credentials for the imagery provider.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    /// OAuth2 client identifier
    pub client_id: String,
    /// OAuth2 client secret
    pub client_secret: String,
}

impl Credentials {
    /// Create credentials
    #[inline]
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

// Secret stays out of Debug output and therefore out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Client-credentials token provider against an OAuth2 issuer.
#[derive(Debug, Clone)]
pub struct OAuthTokenProvider {
    client: reqwest::Client,
    token_url: String,
    credentials: Credentials,
}

impl OAuthTokenProvider {
    /// Create a provider for the issuer at `base_url`
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str, credentials: Credentials) -> Self {
        Self {
            client,
            token_url: join_url(base_url, TOKEN_PATH),
            credentials,
        }
    }
}

#[async_trait]
impl TokenProvider for OAuthTokenProvider {
    async fn fetch_token(&self) -> Result<AccessToken, AuthError> {
        tracing::debug!(url = %self.token_url, "exchanging client credentials");

        let response = self
            .client
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::Status {
                status: status.as_u16(),
                body: error_body(response).await,
            });
        }

        response
            .json::<AccessToken>()
            .await
            .map_err(|e| AuthError::Decode(e.to_string()))
    }
}
