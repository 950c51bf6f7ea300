//! Bearer tokens for the imagery provider
//!
//! Fetched anew on every pipeline run; no cross-run cache or refresh.

use serde::{Deserialize, Serialize};

/// An OAuth2 access token from the client-credentials exchange.
///
/// The issuer's response carries more fields (expiry, scope); only the token
/// itself is observable at the call site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// The bearer token value
    pub access_token: String,
}

impl AccessToken {
    /// Create a token
    #[inline]
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    /// `Authorization` header value
    #[inline]
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_decodes_issuer_response() {
        let token: AccessToken =
            serde_json::from_str(r#"{"access_token": "abc123", "expires_in": 600}"#).unwrap();
        assert_eq!(token.access_token, "abc123");
        assert_eq!(token.bearer(), "Bearer abc123");
    }
}
