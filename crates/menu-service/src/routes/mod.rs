//! HTTP routes for the drink menu service.
//!
//! Route registration is explicit middleware composition: a protected
//! route is a handler layered with the authorization middleware carrying
//! that route's required permission. There is no global mutable auth
//! state; the verifier is built once from configuration and shared.

use crate::auth::{JwksClient, TokenVerifier};
use crate::config::Config;
use crate::handlers;
use crate::middleware::{require_permission, AuthState};
use crate::store::DrinkStore;
use axum::handler::Handler;
use axum::{
    middleware,
    routing::{get, patch},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Drink record store.
    pub store: Arc<dyn DrinkStore>,

    /// Service configuration.
    pub config: Config,
}

/// Build the application routes.
///
/// - `GET /health` - liveness probe (public)
/// - `GET /drinks` - public short-form listing
/// - `GET /drinks-detail` - requires `get:drinks-detail`
/// - `POST /drinks` - requires `post:drinks`
/// - `PATCH /drinks/:id` - requires `patch:drinks`
/// - `DELETE /drinks/:id` - requires `delete:drinks`
///
/// Plus TraceLayer for request logging and a 30 second request timeout.
pub fn build_routes(state: Arc<AppState>) -> Router {
    let jwks_client = Arc::new(JwksClient::new(
        state.config.jwks_url.clone(),
        Duration::from_secs(state.config.jwks_timeout_seconds),
    ));
    let verifier = Arc::new(TokenVerifier::new(
        jwks_client,
        state.config.issuer.clone(),
        state.config.audience.clone(),
    ));

    let auth = |required_permission: &'static str| AuthState {
        verifier: verifier.clone(),
        required_permission,
    };

    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/drinks",
            get(handlers::get_drinks).post(handlers::create_drink.layer(
                middleware::from_fn_with_state(auth("post:drinks"), require_permission),
            )),
        )
        .route(
            "/drinks-detail",
            get(handlers::get_drinks_detail.layer(middleware::from_fn_with_state(
                auth("get:drinks-detail"),
                require_permission,
            ))),
        )
        .route(
            "/drinks/:id",
            patch(handlers::update_drink.layer(middleware::from_fn_with_state(
                auth("patch:drinks"),
                require_permission,
            )))
            .delete(handlers::delete_drink.layer(middleware::from_fn_with_state(
                auth("delete:drinks"),
                require_permission,
            ))),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
}
