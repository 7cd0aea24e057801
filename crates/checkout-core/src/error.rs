//! # Checkout Error Types
//!
//! Typed error handling for the checkout pipeline.
//! Every rejection carries a stable machine-readable code, an HTTP status,
//! and a severity class separating caller mistakes from deployment faults.

use serde::Serialize;
use thiserror::Error;

/// Severity class for a rejection: whose fault is it?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    /// The caller sent something wrong (4xx)
    UserError,
    /// The deployment or an upstream dependency is broken (5xx)
    SystemError,
}

/// Core error type for the checkout request pipeline
#[derive(Debug, Clone, Error)]
pub enum CheckoutError {
    /// Request body has the wrong shape (not an object, unknown fields)
    #[error("{0}")]
    InvalidPayload(String),

    /// `items` is missing, not an array, or has a bad length
    #[error("{0}")]
    InvalidItems(String),

    /// A cart entry is not an object
    #[error("{0}")]
    InvalidItem(String),

    /// Product id not present in the catalog
    #[error("{0}")]
    InvalidProduct(String),

    /// Quantity outside the allowed range or not an integer
    #[error("{0}")]
    InvalidQuantity(String),

    /// Selected option not offered for this product
    #[error("{0}")]
    InvalidOption(String),

    /// An echoed field disagrees with the trusted catalog.
    /// Kept distinct from plain invalidity: it signals a manipulated client.
    #[error("{0}")]
    TamperedPayload(String),

    /// Declared origin is not on the allow-list
    #[error("This origin is not allowed for checkout.")]
    OriginNotAllowed,

    /// Request was forwarded over plain HTTP in production
    #[error("Checkout requires HTTPS.")]
    HttpsRequired,

    /// Wrong HTTP verb
    #[error("Only POST is supported for this route.")]
    MethodNotAllowed,

    /// Required runtime configuration is missing
    #[error("Missing required environment variables: {0}")]
    ServerMisconfigured(String),

    /// The origin allow-list itself is empty
    #[error("Checkout origin policy is not configured.")]
    ServerOriginMisconfigured,

    /// The payment provider rejected the session request
    #[error("{0}")]
    ProviderCheckoutFailed(String),

    /// The provider reported success but returned no usable redirect URL
    #[error("Payment provider returned an invalid checkout response.")]
    ProviderInvalidResponse,

    /// Catch-all; the message never leaks internal detail
    #[error("An unexpected server error occurred.")]
    Internal,
}

impl CheckoutError {
    /// Stable wire code for this error
    pub fn code(&self) -> &'static str {
        match self {
            CheckoutError::InvalidPayload(_) => "invalid_payload",
            CheckoutError::InvalidItems(_) => "invalid_items",
            CheckoutError::InvalidItem(_) => "invalid_item",
            CheckoutError::InvalidProduct(_) => "invalid_product",
            CheckoutError::InvalidQuantity(_) => "invalid_quantity",
            CheckoutError::InvalidOption(_) => "invalid_option",
            CheckoutError::TamperedPayload(_) => "tampered_payload",
            CheckoutError::OriginNotAllowed => "origin_not_allowed",
            CheckoutError::HttpsRequired => "https_required",
            CheckoutError::MethodNotAllowed => "method_not_allowed",
            CheckoutError::ServerMisconfigured(_) => "server_misconfigured",
            CheckoutError::ServerOriginMisconfigured => "server_origin_misconfigured",
            CheckoutError::ProviderCheckoutFailed(_) => "provider_checkout_failed",
            CheckoutError::ProviderInvalidResponse => "provider_invalid_response",
            CheckoutError::Internal => "internal_error",
        }
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CheckoutError::InvalidPayload(_)
            | CheckoutError::InvalidItems(_)
            | CheckoutError::InvalidItem(_)
            | CheckoutError::InvalidProduct(_)
            | CheckoutError::InvalidQuantity(_)
            | CheckoutError::InvalidOption(_)
            | CheckoutError::TamperedPayload(_)
            | CheckoutError::HttpsRequired => 400,
            CheckoutError::OriginNotAllowed => 403,
            CheckoutError::MethodNotAllowed => 405,
            CheckoutError::ServerMisconfigured(_)
            | CheckoutError::ServerOriginMisconfigured
            | CheckoutError::Internal => 500,
            CheckoutError::ProviderCheckoutFailed(_) | CheckoutError::ProviderInvalidResponse => {
                502
            }
        }
    }

    /// Severity class: user mistake vs. deployment/upstream fault
    pub fn class(&self) -> ErrorClass {
        match self {
            CheckoutError::ServerMisconfigured(_)
            | CheckoutError::ServerOriginMisconfigured
            | CheckoutError::ProviderCheckoutFailed(_)
            | CheckoutError::ProviderInvalidResponse
            | CheckoutError::Internal => ErrorClass::SystemError,
            _ => ErrorClass::UserError,
        }
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(CheckoutError::InvalidPayload("x".into()).status_code(), 400);
        assert_eq!(CheckoutError::OriginNotAllowed.status_code(), 403);
        assert_eq!(CheckoutError::MethodNotAllowed.status_code(), 405);
        assert_eq!(
            CheckoutError::ProviderCheckoutFailed("x".into()).status_code(),
            502
        );
        assert_eq!(CheckoutError::Internal.status_code(), 500);
    }

    #[test]
    fn test_classes() {
        assert_eq!(
            CheckoutError::TamperedPayload("x".into()).class(),
            ErrorClass::UserError
        );
        assert_eq!(
            CheckoutError::ServerOriginMisconfigured.class(),
            ErrorClass::SystemError
        );
        assert_eq!(
            CheckoutError::ProviderInvalidResponse.class(),
            ErrorClass::SystemError
        );
    }

    #[test]
    fn test_class_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorClass::UserError).unwrap();
        assert_eq!(json, "\"user_error\"");
        let json = serde_json::to_string(&ErrorClass::SystemError).unwrap();
        assert_eq!(json, "\"system_error\"");
    }
}
