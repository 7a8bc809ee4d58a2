//! JWKS client: the key resolver for token verification.
//!
//! Fetches the authority's JSON Web Key Set from its
//! `/.well-known/jwks.json` endpoint and selects the signing key matching
//! a token's key id. The fetch is request-scoped: every verification
//! fetches the set fresh, there is no cache. The HTTP call carries a
//! bounded timeout; a timeout counts as a fetch failure.

use crate::errors::MenuError;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

/// JSON Web Key from the JWKS endpoint. Only RSA signing keys are
/// relevant here (`kty` "RSA", modulus and exponent present).
#[derive(Debug, Clone, Deserialize)]
pub struct Jwk {
    /// Key type (expected "RSA").
    pub kty: String,

    /// Key ID - used to select the correct key for verification.
    pub kid: String,

    /// Key use (should be "sig" for signing).
    #[serde(default, rename = "use")]
    pub key_use: Option<String>,

    /// Algorithm (should be "RS256").
    #[serde(default)]
    pub alg: Option<String>,

    /// RSA modulus (base64url encoded).
    #[serde(default)]
    pub n: Option<String>,

    /// RSA public exponent (base64url encoded).
    #[serde(default)]
    pub e: Option<String>,
}

/// JWKS response from the authority.
#[derive(Debug, Clone, Deserialize)]
pub struct JwksResponse {
    /// List of JSON Web Keys.
    pub keys: Vec<Jwk>,
}

/// Client for resolving signing keys from a remote JWKS endpoint.
pub struct JwksClient {
    /// URL to the JWKS endpoint.
    jwks_url: String,

    /// HTTP client for fetching the key set.
    http_client: reqwest::Client,
}

impl JwksClient {
    /// Create a new JWKS client.
    ///
    /// # Arguments
    ///
    /// * `jwks_url` - URL to the authority's JWKS endpoint
    /// * `timeout` - Bound on the key set fetch; a timeout is treated as
    ///   a fetch failure for the current verification
    pub fn new(jwks_url: String, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(target: "menu.auth.jwks", error = %e, "Failed to build HTTP client with custom config, using defaults");
                reqwest::Client::new()
            });

        Self {
            jwks_url,
            http_client,
        }
    }

    /// Resolve the signing key matching a token's key id.
    ///
    /// Fetches the key set fresh and scans it for a descriptor whose `kid`
    /// equals the input. Key ids are expected unique; if the authority
    /// publishes duplicates, the first match wins.
    ///
    /// # Errors
    ///
    /// Returns `MenuError::KeyNotFound` (400) when the fetch fails, the
    /// response does not parse, or no key in the set matches.
    #[instrument(skip(self), fields(kid = %kid))]
    pub async fn get_key(&self, kid: &str) -> Result<Jwk, MenuError> {
        tracing::debug!(target: "menu.auth.jwks", url = %self.jwks_url, "Fetching JWKS");

        let response = self
            .http_client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| MenuError::KeyNotFound(format!("JWKS fetch failed: {e}")))?;

        if !response.status().is_success() {
            return Err(MenuError::KeyNotFound(format!(
                "JWKS endpoint returned {}",
                response.status()
            )));
        }

        let jwks: JwksResponse = response
            .json()
            .await
            .map_err(|e| MenuError::KeyNotFound(format!("JWKS response did not parse: {e}")))?;

        jwks.keys
            .into_iter()
            .find(|key| key.kid == kid)
            .ok_or_else(|| MenuError::KeyNotFound(format!("no key in set matching kid {kid}")))
    }
}
