//! Bearer token authorization.
//!
//! # Components
//!
//! - `jwks` - key resolver: fetches the authority's key set and selects
//!   the signing key by key id
//! - `jwt` - token verifier: signature, expiry, audience and issuer
//! - `claims` - decoded claims and the permission check

pub mod claims;
pub mod jwks;
pub mod jwt;

pub use claims::Claims;
pub use jwks::JwksClient;
pub use jwt::TokenVerifier;
