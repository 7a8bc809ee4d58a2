//! Drink menu service configuration.
//!
//! Configuration is loaded from environment variables at startup and
//! passed into router construction as a plain value; there are no
//! process-wide mutable globals. The database URL is redacted in Debug
//! output.

use std::collections::HashMap;
use std::env;
use std::fmt;
use thiserror::Error;

/// Default HTTP bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Default bound on the JWKS fetch, in seconds.
pub const DEFAULT_JWKS_TIMEOUT_SECONDS: u64 = 10;

/// Maximum allowed JWKS fetch timeout, in seconds.
pub const MAX_JWKS_TIMEOUT_SECONDS: u64 = 60;

/// Drink menu service configuration.
///
/// The issuer URL and JWKS URL are derived from the authority domain;
/// `AUTH_JWKS_URL` may override the latter for local development and
/// tests (the issuer is always `https://<AUTH_DOMAIN>/`).
#[derive(Clone)]
pub struct Config {
    /// PostgreSQL connection URL.
    pub database_url: String,

    /// Server bind address (default: "0.0.0.0:8080").
    pub bind_address: String,

    /// Token authority domain (e.g. "example.us.auth0.com").
    pub auth_domain: String,

    /// Expected audience claim value.
    pub audience: String,

    /// Expected issuer claim value: `https://<auth_domain>/`.
    pub issuer: String,

    /// URL the signing key set is fetched from.
    pub jwks_url: String,

    /// Bound on each JWKS fetch, in seconds.
    pub jwks_timeout_seconds: u64,
}

/// Custom Debug implementation that redacts the database URL.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("bind_address", &self.bind_address)
            .field("auth_domain", &self.auth_domain)
            .field("audience", &self.audience)
            .field("issuer", &self.issuer)
            .field("jwks_url", &self.jwks_url)
            .field("jwks_timeout_seconds", &self.jwks_timeout_seconds)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid authority domain: {0}")]
    InvalidAuthDomain(String),

    #[error("Invalid JWKS timeout configuration: {0}")]
    InvalidJwksTimeout(String),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let database_url = vars
            .get("DATABASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?
            .clone();

        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let auth_domain = vars
            .get("AUTH_DOMAIN")
            .ok_or_else(|| ConfigError::MissingEnvVar("AUTH_DOMAIN".to_string()))?
            .clone();

        // A bare domain only; the scheme and paths are derived from it.
        if auth_domain.is_empty() || auth_domain.contains('/') || auth_domain.contains("://") {
            return Err(ConfigError::InvalidAuthDomain(format!(
                "AUTH_DOMAIN must be a bare domain name, got '{auth_domain}'"
            )));
        }

        let audience = vars
            .get("AUTH_AUDIENCE")
            .ok_or_else(|| ConfigError::MissingEnvVar("AUTH_AUDIENCE".to_string()))?
            .clone();

        let issuer = format!("https://{auth_domain}/");

        let jwks_url = vars
            .get("AUTH_JWKS_URL")
            .cloned()
            .unwrap_or_else(|| format!("https://{auth_domain}/.well-known/jwks.json"));

        let jwks_timeout_seconds = if let Some(value_str) = vars.get("JWKS_TIMEOUT_SECONDS") {
            let value: u64 = value_str.parse().map_err(|e| {
                ConfigError::InvalidJwksTimeout(format!(
                    "JWKS_TIMEOUT_SECONDS must be a valid positive integer, got '{value_str}': {e}"
                ))
            })?;

            if value == 0 {
                return Err(ConfigError::InvalidJwksTimeout(
                    "JWKS_TIMEOUT_SECONDS must be greater than 0".to_string(),
                ));
            }

            if value > MAX_JWKS_TIMEOUT_SECONDS {
                return Err(ConfigError::InvalidJwksTimeout(format!(
                    "JWKS_TIMEOUT_SECONDS must not exceed {MAX_JWKS_TIMEOUT_SECONDS} seconds, got {value}"
                )));
            }

            value
        } else {
            DEFAULT_JWKS_TIMEOUT_SECONDS
        };

        Ok(Config {
            database_url,
            bind_address,
            auth_domain,
            audience,
            issuer,
            jwks_url,
            jwks_timeout_seconds,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn base_vars() -> HashMap<String, String> {
        HashMap::from([
            (
                "DATABASE_URL".to_string(),
                "postgresql://localhost/menu_test".to_string(),
            ),
            ("AUTH_DOMAIN".to_string(), "menu.test".to_string()),
            ("AUTH_AUDIENCE".to_string(), "drinks".to_string()),
        ])
    }

    #[test]
    fn test_from_vars_success_with_defaults() {
        let config = Config::from_vars(&base_vars()).expect("Config should load");

        assert_eq!(config.database_url, "postgresql://localhost/menu_test");
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.auth_domain, "menu.test");
        assert_eq!(config.audience, "drinks");
        assert_eq!(config.issuer, "https://menu.test/");
        assert_eq!(config.jwks_url, "https://menu.test/.well-known/jwks.json");
        assert_eq!(config.jwks_timeout_seconds, DEFAULT_JWKS_TIMEOUT_SECONDS);
    }

    #[test]
    fn test_jwks_url_override() {
        let mut vars = base_vars();
        vars.insert(
            "AUTH_JWKS_URL".to_string(),
            "http://127.0.0.1:9999/.well-known/jwks.json".to_string(),
        );

        let config = Config::from_vars(&vars).expect("Config should load");

        assert_eq!(
            config.jwks_url,
            "http://127.0.0.1:9999/.well-known/jwks.json"
        );
        // Issuer stays derived from the domain.
        assert_eq!(config.issuer, "https://menu.test/");
    }

    #[test]
    fn test_missing_database_url() {
        let mut vars = base_vars();
        vars.remove("DATABASE_URL");

        let result = Config::from_vars(&vars);
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(v)) if v == "DATABASE_URL"));
    }

    #[test]
    fn test_missing_auth_domain() {
        let mut vars = base_vars();
        vars.remove("AUTH_DOMAIN");

        let result = Config::from_vars(&vars);
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(v)) if v == "AUTH_DOMAIN"));
    }

    #[test]
    fn test_missing_audience() {
        let mut vars = base_vars();
        vars.remove("AUTH_AUDIENCE");

        let result = Config::from_vars(&vars);
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(v)) if v == "AUTH_AUDIENCE"));
    }

    #[test]
    fn test_auth_domain_rejects_urls() {
        let mut vars = base_vars();
        vars.insert("AUTH_DOMAIN".to_string(), "https://menu.test".to_string());

        let result = Config::from_vars(&vars);
        assert!(matches!(result, Err(ConfigError::InvalidAuthDomain(_))));
    }

    #[test]
    fn test_jwks_timeout_rejects_zero() {
        let mut vars = base_vars();
        vars.insert("JWKS_TIMEOUT_SECONDS".to_string(), "0".to_string());

        let result = Config::from_vars(&vars);
        assert!(
            matches!(result, Err(ConfigError::InvalidJwksTimeout(msg)) if msg.contains("greater than 0"))
        );
    }

    #[test]
    fn test_jwks_timeout_rejects_too_large() {
        let mut vars = base_vars();
        vars.insert("JWKS_TIMEOUT_SECONDS".to_string(), "61".to_string());

        let result = Config::from_vars(&vars);
        assert!(
            matches!(result, Err(ConfigError::InvalidJwksTimeout(msg)) if msg.contains("must not exceed 60"))
        );
    }

    #[test]
    fn test_jwks_timeout_accepts_custom_value() {
        let mut vars = base_vars();
        vars.insert("JWKS_TIMEOUT_SECONDS".to_string(), "5".to_string());

        let config = Config::from_vars(&vars).expect("Config should load");
        assert_eq!(config.jwks_timeout_seconds, 5);
    }

    #[test]
    fn test_debug_redacts_database_url() {
        let config = Config::from_vars(&base_vars()).expect("Config should load");
        let debug = format!("{config:?}");

        assert!(!debug.contains("postgresql://localhost/menu_test"));
        assert!(debug.contains("[REDACTED]"));
    }
}
