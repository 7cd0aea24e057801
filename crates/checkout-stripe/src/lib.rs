//! # checkout-stripe
//!
//! Stripe Checkout Session client for rise-checkout-rs.
//!
//! The flow is deliberately small: a validated cart goes in, a hosted
//! payment page URL comes out. Request construction uses only catalog
//! values; the client's echoed name/price never reach the wire.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout_stripe::{SessionClient, StripeSettings};
//!
//! let client = SessionClient::from_env()?;
//! let url = client.create_session(&validated_items).await?;
//! // Redirect the customer to `url`
//! ```

pub mod config;
pub mod session;

// Re-exports
pub use config::{RequiredSettings, StripeSettings};
pub use session::SessionClient;
