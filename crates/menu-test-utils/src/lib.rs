//! # Menu Test Utilities
//!
//! Shared test utilities for the drink menu service:
//! - Deterministic RSA crypto fixtures (fixed keypair, JWK JSON)
//! - A test token builder for claims in every shape the tests need
//!
//! ## Usage
//!
//! ```rust,ignore
//! use menu_test_utils::*;
//!
//! let token = TestTokenBuilder::new()
//!     .with_permissions(&["post:drinks"])
//!     .sign();
//! // Serve test_jwks_json() from a mocked JWKS endpoint and the token
//! // verifies against it.
//! ```

pub mod crypto_fixtures;
pub mod token_builders;

pub use crypto_fixtures::*;
pub use token_builders::*;
