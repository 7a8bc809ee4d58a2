//! Authorization middleware for protected routes.
//!
//! Extracts the bearer token from the Authorization header, runs the full
//! verification pipeline (key resolution, signature, expiry, audience,
//! issuer), enforces the route's required permission, and injects the
//! verified claims into request extensions for the wrapped handler.
//!
//! The pipeline is a linear state machine: header extraction, token
//! verification, permission check. Each stage is terminal on failure and
//! carries its own classified error and HTTP status.

use crate::auth::{Claims, TokenVerifier};
use crate::errors::MenuError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::instrument;

/// Per-route state for the authorization middleware.
///
/// The required permission is fixed at route registration time, not per
/// request. An empty string declares no specific permission requirement
/// (the token must still verify and carry a permissions entry).
#[derive(Clone)]
pub struct AuthState {
    /// Token verifier with its JWKS client.
    pub verifier: Arc<TokenVerifier>,

    /// Permission this route requires.
    pub required_permission: &'static str,
}

/// Extract the bearer token from the Authorization header.
///
/// An absent header and a header that is present but not readable as
/// visible ASCII are distinct failures: the former is a missing header,
/// the latter a malformed one.
fn extract_bearer_token(req: &Request) -> Result<&str, MenuError> {
    let header = req
        .headers()
        .get("authorization")
        .ok_or(MenuError::AuthHeaderMissing)?
        .to_str()
        .map_err(|_| {
            MenuError::MalformedAuthHeader(
                "Authorization header must be visible ASCII".to_string(),
            )
        })?;

    bearer_token(header)
}

/// Split an Authorization header value into its bearer token.
///
/// The header must be exactly two whitespace-separated parts, the first
/// being the scheme word "Bearer" (case-insensitive).
pub(crate) fn bearer_token(header: &str) -> Result<&str, MenuError> {
    let mut parts = header.split_whitespace();

    let scheme = parts.next().ok_or_else(|| {
        MenuError::MalformedAuthHeader(
            "Authorization header must start with \"Bearer\"".to_string(),
        )
    })?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(MenuError::MalformedAuthHeader(
            "Authorization header must start with \"Bearer\"".to_string(),
        ));
    }

    let token = parts
        .next()
        .ok_or_else(|| MenuError::MalformedAuthHeader("Token not found".to_string()))?;

    if parts.next().is_some() {
        return Err(MenuError::MalformedAuthHeader(
            "Authorization header must be a single bearer token".to_string(),
        ));
    }

    Ok(token)
}

/// Authorization middleware enforcing a route's required permission.
///
/// # Response
///
/// - 401 when the header is missing or malformed, or the token is expired
/// - 400 when the token does not verify or lacks a permissions claim
/// - 403 when the token verifies but lacks the required permission
/// - Continues to the wrapped handler with `Claims` in extensions otherwise
#[instrument(skip_all, name = "menu.middleware.auth")]
pub async fn require_permission(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, MenuError> {
    let token = extract_bearer_token(&req)?;

    let claims: Claims = state.verifier.verify(token).await?;

    claims.check_permission(state.required_permission)?;

    // Hand the verified claim set to the downstream handler.
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
