//! Route definitions for the TrialGate HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Largest request body accepted. Hook payloads are small.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(hook_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Hosting platform hook endpoints
fn hook_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/hooks/shopping-cart-validate-checkout",
            post(handlers::hooks::validate_checkout),
        )
        .route(
            "/hooks/admin-area-head-output",
            post(handlers::hooks::admin_head_output),
        )
}

/// Health and introspection endpoints
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/plugins", get(handlers::health::list_plugins))
}
