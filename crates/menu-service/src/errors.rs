//! Drink menu service error types.
//!
//! Every classified failure maps to one HTTP status via the `IntoResponse`
//! impl and is serialized to the boundary shape
//! `{"success": false, "error": <status>, "message": <string>}`.
//! Internal detail (key ids, backend errors) is logged server-side and not
//! returned to clients.

use crate::store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Drink menu service error type.
///
/// Maps to HTTP status codes:
/// - AuthHeaderMissing, MalformedAuthHeader, MalformedHeader, TokenExpired: 401
/// - KeyNotFound, TokenInvalid, PermissionsClaimMissing, BadRequest: 400
/// - Forbidden: 403
/// - NotFound: 404
/// - Unprocessable: 422
#[derive(Debug, Error)]
pub enum MenuError {
    /// No Authorization header on a protected route.
    #[error("Authorization header is expected")]
    AuthHeaderMissing,

    /// Authorization header present but not a single bearer token.
    #[error("{0}")]
    MalformedAuthHeader(String),

    /// Token header parsed but carries no key id.
    #[error("Authorization token header is malformed")]
    MalformedHeader,

    /// No signing key matched the token, or the key set fetch failed.
    /// The inner reason is logged, never returned to the client.
    #[error("No signing key matched the token")]
    KeyNotFound(String),

    /// Token expiry claim is in the past.
    #[error("Token is expired")]
    TokenExpired,

    /// Catch-all for signature, parse, audience and issuer failures.
    /// The inner reason is logged, never returned to the client.
    #[error("Unable to parse authentication token")]
    TokenInvalid(String),

    /// Decoded claims carry no permissions entry at all.
    #[error("Permissions claim not included in token")]
    PermissionsClaimMissing,

    /// Permissions entry exists but lacks the required permission.
    #[error("You do not have permission to perform this action")]
    Forbidden(String),

    /// Resource-layer miss (unknown drink id).
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Resource-layer failure on an otherwise well-formed request.
    #[error("Unprocessable request")]
    Unprocessable(String),

    /// Malformed request body or duplicate title on create.
    #[error("Bad request")]
    BadRequest(String),
}

impl MenuError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            MenuError::AuthHeaderMissing
            | MenuError::MalformedAuthHeader(_)
            | MenuError::MalformedHeader
            | MenuError::TokenExpired => StatusCode::UNAUTHORIZED,
            MenuError::KeyNotFound(_)
            | MenuError::TokenInvalid(_)
            | MenuError::PermissionsClaimMissing
            | MenuError::BadRequest(_) => StatusCode::BAD_REQUEST,
            MenuError::Forbidden(_) => StatusCode::FORBIDDEN,
            MenuError::NotFound(_) => StatusCode::NOT_FOUND,
            MenuError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

/// Boundary error shape: `{"success": false, "error": <int>, "message": <string>}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

impl IntoResponse for MenuError {
    fn into_response(self) -> Response {
        // Log the detail that is withheld from the client.
        match &self {
            MenuError::KeyNotFound(reason) => {
                tracing::warn!(target: "menu.auth", reason = %reason, "Signing key resolution failed");
            }
            MenuError::TokenInvalid(reason) => {
                tracing::debug!(target: "menu.auth", reason = %reason, "Token verification failed");
            }
            MenuError::Forbidden(reason) => {
                tracing::debug!(target: "menu.auth", reason = %reason, "Permission check failed");
            }
            MenuError::Unprocessable(reason) | MenuError::BadRequest(reason) => {
                tracing::debug!(target: "menu.handlers", reason = %reason, "Request rejected");
            }
            _ => {}
        }

        let status = self.status_code();
        let body = ErrorResponse {
            success: false,
            error: status.as_u16(),
            message: self.to_string(),
        };

        let mut response = (status, Json(body)).into_response();

        // RFC 6750: challenge the client on authentication failures.
        if status == StatusCode::UNAUTHORIZED {
            if let Ok(header_value) =
                "Bearer realm=\"drink-menu\", error=\"invalid_token\"".parse()
            {
                response
                    .headers_mut()
                    .insert("WWW-Authenticate", header_value);
            }
        }

        response
    }
}

impl From<StoreError> for MenuError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::RecordNotFound => MenuError::NotFound("drink"),
            StoreError::DuplicateTitle => {
                MenuError::BadRequest("a drink with that title already exists".to_string())
            }
            StoreError::ValidationFailed(reason) => MenuError::Unprocessable(reason),
            StoreError::Backend(reason) => {
                tracing::error!(target: "menu.store", reason = %reason, "Store operation failed");
                MenuError::Unprocessable("drink store operation failed".to_string())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http_body_util::BodyExt;

    async fn read_body_json(body: Body) -> serde_json::Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(MenuError::AuthHeaderMissing.status_code(), 401);
        assert_eq!(
            MenuError::MalformedAuthHeader("bad".to_string()).status_code(),
            401
        );
        assert_eq!(MenuError::MalformedHeader.status_code(), 401);
        assert_eq!(MenuError::KeyNotFound("kid".to_string()).status_code(), 400);
        assert_eq!(MenuError::TokenExpired.status_code(), 401);
        assert_eq!(
            MenuError::TokenInvalid("sig".to_string()).status_code(),
            400
        );
        assert_eq!(MenuError::PermissionsClaimMissing.status_code(), 400);
        assert_eq!(MenuError::Forbidden("perm".to_string()).status_code(), 403);
        assert_eq!(MenuError::NotFound("drink").status_code(), 404);
        assert_eq!(
            MenuError::Unprocessable("err".to_string()).status_code(),
            422
        );
        assert_eq!(MenuError::BadRequest("err".to_string()).status_code(), 400);
    }

    #[tokio::test]
    async fn test_into_response_body_shape() {
        let response = MenuError::PermissionsClaimMissing.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = read_body_json(response.into_body()).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], 400);
        assert_eq!(body["message"], "Permissions claim not included in token");
    }

    #[tokio::test]
    async fn test_unauthorized_carries_www_authenticate() {
        let response = MenuError::AuthHeaderMissing.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let www_auth = response
            .headers()
            .get("WWW-Authenticate")
            .expect("401 should carry WWW-Authenticate");
        assert!(www_auth.to_str().unwrap().contains("Bearer realm="));
    }

    #[tokio::test]
    async fn test_key_not_found_hides_detail() {
        let response =
            MenuError::KeyNotFound("no key matching kid abc123".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = read_body_json(response.into_body()).await;
        assert_eq!(body["message"], "No signing key matched the token");
    }

    #[test]
    fn test_store_error_mapping() {
        assert_eq!(
            MenuError::from(StoreError::RecordNotFound).status_code(),
            404
        );
        assert_eq!(
            MenuError::from(StoreError::DuplicateTitle).status_code(),
            400
        );
        assert_eq!(
            MenuError::from(StoreError::ValidationFailed("empty title".to_string()))
                .status_code(),
            422
        );
        assert_eq!(
            MenuError::from(StoreError::Backend("connection refused".to_string()))
                .status_code(),
            422
        );
    }
}
