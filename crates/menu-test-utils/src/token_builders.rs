//! Builder for test token claims.
//!
//! Defaults produce a valid, unexpired token for the test authority
//! (`https://menu.test/`, audience `drinks`) with a present-but-empty
//! permissions entry. Every knob a test needs to break is adjustable,
//! including removing the permissions claim entirely.

use crate::crypto_fixtures::sign_claims;
use chrono::{Duration, Utc};
use serde_json::json;

/// Issuer used by default in test tokens.
pub const TEST_ISSUER: &str = "https://menu.test/";

/// Audience used by default in test tokens.
pub const TEST_AUDIENCE: &str = "drinks";

/// Builder for test token claims.
///
/// # Example
/// ```rust,ignore
/// let token = TestTokenBuilder::new()
///     .for_user("barista")
///     .with_permissions(&["post:drinks"])
///     .sign();
/// ```
pub struct TestTokenBuilder {
    sub: String,
    iss: String,
    aud: String,
    exp: i64,
    iat: i64,
    permissions: Option<Vec<String>>,
}

impl TestTokenBuilder {
    /// Create a builder with valid defaults.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            sub: "test-user".to_string(),
            iss: TEST_ISSUER.to_string(),
            aud: TEST_AUDIENCE.to_string(),
            exp: (now + Duration::seconds(3600)).timestamp(),
            iat: now.timestamp(),
            permissions: Some(Vec::new()),
        }
    }

    /// Set the subject.
    pub fn for_user(mut self, subject: &str) -> Self {
        self.sub = subject.to_string();
        self
    }

    /// Set the issuer.
    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.iss = issuer.to_string();
        self
    }

    /// Set the audience.
    pub fn with_audience(mut self, audience: &str) -> Self {
        self.aud = audience.to_string();
        self
    }

    /// Set expiration relative to now; negative values build expired tokens.
    pub fn expires_in(mut self, seconds: i64) -> Self {
        self.exp = (Utc::now() + Duration::seconds(seconds)).timestamp();
        self
    }

    /// Set the granted permissions.
    pub fn with_permissions(mut self, permissions: &[&str]) -> Self {
        self.permissions = Some(permissions.iter().map(ToString::to_string).collect());
        self
    }

    /// Drop the permissions entry from the claims entirely.
    pub fn without_permissions_claim(mut self) -> Self {
        self.permissions = None;
        self
    }

    /// Build the claims as a JSON value.
    pub fn build(self) -> serde_json::Value {
        let mut claims = json!({
            "sub": self.sub,
            "iss": self.iss,
            "aud": self.aud,
            "exp": self.exp,
            "iat": self.iat,
        });
        if let (Some(permissions), Some(map)) = (self.permissions, claims.as_object_mut()) {
            map.insert("permissions".to_string(), json!(permissions));
        }
        claims
    }

    /// Build and sign under the test key.
    pub fn sign(self) -> String {
        sign_claims(&self.build())
    }
}

impl Default for TestTokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}
