//! # checkout-api
//!
//! HTTP API layer for rise-checkout-rs.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/create-checkout-session` | Validate cart, create session |
//! | OPTIONS | `/api/create-checkout-session` | CORS preflight |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
