//! # Routes
//!
//! Axum router configuration for the checkout API.
//!
//! CORS is handled inside the checkout handler rather than by a layer:
//! the allow-origin echo is origin-specific and must also appear on error
//! responses, which a blanket middleware cannot decide for us.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{any, get},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the main application router
///
/// Routes:
/// - GET  /health - Health check
/// - POST/OPTIONS /api/create-checkout-session - Create checkout session
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        // Matched for any verb: the handler owns the 405 so the error
        // shape and CORS headers stay uniform.
        .route(
            "/api/create-checkout-session",
            any(handlers::create_checkout_session),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
