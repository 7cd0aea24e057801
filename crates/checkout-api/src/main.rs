//! # Rise Checkout
//!
//! Cart re-validation and Stripe checkout-session service.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export CHECKOUT_SUCCESS_URL=https://risemobility.co.uk/thanks
//! export CHECKOUT_CANCEL_URL=https://risemobility.co.uk/basket
//! export FRONTEND_ORIGIN=https://risemobility.co.uk
//!
//! # Run the server
//! rise-checkout
//! ```

use checkout_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr();

    info!("Environment: {}", state.config.environment);
    info!("Products loaded: {}", state.catalog.len());

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("rise-checkout listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
