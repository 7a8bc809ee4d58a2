//! Token verifier.
//!
//! Validates a raw bearer token end to end: structural parse, signing key
//! resolution via the JWKS client, RS256 signature verification, expiry,
//! audience and issuer checks. Each step short-circuits with a classified
//! error; a malformed or unparseable token is never allowed to panic.
//!
//! # Security
//!
//! - Tokens are size-checked BEFORE parsing (DoS prevention)
//! - Exactly one signature algorithm is accepted: RS256
//! - Client-facing error messages are generic; detail goes to logs

use crate::auth::claims::Claims;
use crate::auth::jwks::{Jwk, JwksClient};
use crate::errors::MenuError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::sync::Arc;
use tracing::instrument;

/// Maximum allowed token size in bytes (8KB).
///
/// Typical tokens are a few hundred bytes; anything larger is rejected
/// before base64 decoding or any cryptographic work happens.
pub const MAX_JWT_SIZE_BYTES: usize = 8192;

/// Verifies bearer tokens against keys published by the authority.
pub struct TokenVerifier {
    /// JWKS client for resolving signing keys.
    jwks_client: Arc<JwksClient>,

    /// Expected issuer URL (`https://<authority-domain>/`).
    issuer: String,

    /// Expected audience value.
    audience: String,
}

impl TokenVerifier {
    pub fn new(jwks_client: Arc<JwksClient>, issuer: String, audience: String) -> Self {
        Self {
            jwks_client,
            issuer,
            audience,
        }
    }

    /// Fully validate a token and return its decoded claims.
    ///
    /// Steps, in order, each terminal on failure:
    /// 1. Parse the unverified header and extract the key id
    /// 2. Resolve the signing key from the JWKS endpoint
    /// 3. Verify the RS256 signature, expiry, audience and issuer
    ///
    /// # Errors
    ///
    /// - `MalformedHeader` (401): header parsed but carries no key id
    /// - `KeyNotFound` (400): key set fetch failed or no key matched
    /// - `TokenExpired` (401): expiry claim in the past
    /// - `TokenInvalid` (400): anything else (signature, structure,
    ///   audience or issuer mismatch)
    #[instrument(skip_all)]
    pub async fn verify(&self, token: &str) -> Result<Claims, MenuError> {
        let kid = extract_kid(token)?;
        let jwk = self.jwks_client.get_key(&kid).await?;
        decode_claims(token, &jwk, &self.issuer, &self.audience)
    }
}

/// Extract the key id from an unverified token header.
///
/// Includes the size check, so callers never parse oversized tokens.
fn extract_kid(token: &str) -> Result<String, MenuError> {
    if token.len() > MAX_JWT_SIZE_BYTES {
        return Err(MenuError::TokenInvalid(
            "token exceeds maximum size".to_string(),
        ));
    }

    let mut parts = token.split('.');
    let header_b64 = parts
        .next()
        .filter(|part| !part.is_empty())
        .ok_or_else(|| MenuError::TokenInvalid("empty token header".to_string()))?;
    if parts.count() != 2 {
        return Err(MenuError::TokenInvalid(
            "token is not a three-part JWT".to_string(),
        ));
    }

    let header_bytes = URL_SAFE_NO_PAD
        .decode(header_b64)
        .map_err(|e| MenuError::TokenInvalid(format!("token header is not base64url: {e}")))?;
    let header: serde_json::Value = serde_json::from_slice(&header_bytes)
        .map_err(|e| MenuError::TokenInvalid(format!("token header is not JSON: {e}")))?;

    match header.get("kid").and_then(|kid| kid.as_str()) {
        Some(kid) if !kid.is_empty() => Ok(kid.to_string()),
        _ => Err(MenuError::MalformedHeader),
    }
}

/// Verify signature and registered claims against a resolved key.
fn decode_claims(
    token: &str,
    jwk: &Jwk,
    issuer: &str,
    audience: &str,
) -> Result<Claims, MenuError> {
    if jwk.kty != "RSA" {
        tracing::warn!(target: "menu.auth.jwt", kty = %jwk.kty, "Unexpected JWK key type");
        return Err(MenuError::TokenInvalid(format!(
            "unsupported key type {}",
            jwk.kty
        )));
    }
    if let Some(alg) = &jwk.alg {
        if alg != "RS256" {
            tracing::warn!(target: "menu.auth.jwt", alg = %alg, "Unexpected JWK algorithm");
            return Err(MenuError::TokenInvalid(format!(
                "unsupported key algorithm {alg}"
            )));
        }
    }

    let n = jwk
        .n
        .as_ref()
        .ok_or_else(|| MenuError::TokenInvalid("signing key missing modulus".to_string()))?;
    let e = jwk
        .e
        .as_ref()
        .ok_or_else(|| MenuError::TokenInvalid("signing key missing exponent".to_string()))?;

    let decoding_key = DecodingKey::from_rsa_components(n, e)
        .map_err(|e| MenuError::TokenInvalid(format!("signing key did not decode: {e}")))?;

    // Exactly one accepted algorithm; tokens claiming anything else fail
    // signature verification outright.
    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[audience]);
    validation.set_issuer(&[issuer]);
    validation.validate_exp = true;

    let token_data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => MenuError::TokenExpired,
            _ => MenuError::TokenInvalid(e.to_string()),
        }
    })?;

    Ok(token_data.claims)
}
