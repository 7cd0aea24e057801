//! # checkout-core
//!
//! Core types for the rise-checkout engine.
//!
//! This crate provides:
//! - `Catalog` and `Product` — the trusted server-side catalog
//! - `validate_cart` — strict re-validation of untrusted cart payloads
//! - `OriginPolicy` — the CORS origin allow-list
//! - `CheckoutError` — the rejection taxonomy with codes and status mapping
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_core::{validate_cart, Catalog, OriginPolicy};
//!
//! let catalog = Catalog::builtin();
//! let policy = OriginPolicy::from_sources(Some("https://risemobility.co.uk"), None);
//!
//! let echo = policy.resolve(request_origin)?;
//! let items = validate_cart(&body, &catalog)?;
//! // hand `items` to the session client
//! ```

pub mod cart;
pub mod catalog;
pub mod error;
pub mod origin;

// Re-exports for convenience
pub use cart::{validate_cart, ValidatedLineItem, MAX_LINE_ITEMS, MAX_QUANTITY_PER_ITEM};
pub use catalog::{Catalog, Product, CURRENCY};
pub use error::{CheckoutError, CheckoutResult, ErrorClass};
pub use origin::OriginPolicy;
