//! Drink Menu Service Library
//!
//! A small CRUD API for a menu of drink items, gated by bearer-token
//! authorization with per-route permission scopes. Tokens are verified
//! against the authority's published signing key set (JWKS); verified
//! claims are handed to route handlers through request extensions.
//!
//! # Architecture
//!
//! ```text
//! routes/mod.rs -> middleware/auth.rs -> handlers/*.rs -> store/*.rs
//!                      |
//!                      +-> auth/{jwks,jwt,claims}.rs
//! ```
//!
//! # Modules
//!
//! - `config` - service configuration from environment
//! - `errors` - error types with HTTP status code mapping
//! - `auth` - key resolution, token verification, permission checks
//! - `middleware` - per-route authorization middleware
//! - `handlers` - HTTP request handlers
//! - `models` - drink records and response envelopes
//! - `store` - drink record store (Postgres and in-memory)
//! - `routes` - axum router setup

pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod store;
