//! Decoded token claims and the permission check.
//!
//! The `sub` field is redacted in Debug output to keep user identifiers
//! out of logs. Claims the service does not model explicitly are retained
//! in a flattened map, so handlers receive the full decoded claim set.

use crate::errors::MenuError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Claims of a verified bearer token.
///
/// Issuer, audience and expiry are guaranteed to have been validated by
/// the time a `Claims` value exists. The `permissions` entry is a set of
/// permission strings granted to the caller; it is optional in the token
/// and its absence is a classified failure when a route requires it.
#[derive(Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer URL.
    pub iss: String,

    /// Subject (user or client identifier) - redacted in Debug output.
    pub sub: String,

    /// Audience this token was minted for.
    pub aud: String,

    /// Expiration timestamp (Unix epoch seconds).
    pub exp: i64,

    /// Issued-at timestamp (Unix epoch seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Permission strings granted to this token. `None` means the claim
    /// was absent from the token entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,

    /// Any further claims, kept verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl fmt::Debug for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Claims")
            .field("iss", &self.iss)
            .field("sub", &"[REDACTED]")
            .field("aud", &self.aud)
            .field("exp", &self.exp)
            .field("iat", &self.iat)
            .field("permissions", &self.permissions)
            .finish()
    }
}

impl Claims {
    /// Check whether the token carries a specific permission.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .as_deref()
            .is_some_and(|permissions| permissions.iter().any(|p| p == permission))
    }

    /// Enforce a route's required permission against this claim set.
    ///
    /// - No `permissions` entry at all is `PermissionsClaimMissing` (400):
    ///   the token is treated as malformed rather than merely insufficient.
    /// - An empty required permission passes as long as a `permissions`
    ///   entry is present, even an empty one. "No permission required" is
    ///   deliberately not distinguished from "empty permission required".
    /// - Otherwise the required string must be present exactly
    ///   (case-sensitive), or the check fails with `Forbidden` (403).
    pub fn check_permission(&self, required: &str) -> Result<(), MenuError> {
        if self.permissions.is_none() {
            return Err(MenuError::PermissionsClaimMissing);
        }

        if required.is_empty() {
            return Ok(());
        }

        if self.has_permission(required) {
            Ok(())
        } else {
            Err(MenuError::Forbidden(format!(
                "token lacks required permission {required}"
            )))
        }
    }
}
