//! # Stripe Settings
//!
//! Runtime configuration for the checkout-session client.
//! All values come from environment variables; every field is optional at
//! load time so a misconfigured deployment can still boot, answer health
//! checks, and fail each checkout request with a precise
//! `server_misconfigured` error instead of a panic.

use checkout_core::{CheckoutError, CheckoutResult};
use std::env;

/// Stripe checkout configuration, possibly incomplete
#[derive(Debug, Clone)]
pub struct StripeSettings {
    /// Secret API key (sk_test_... or sk_live_...)
    pub secret_key: Option<String>,

    /// Redirect target after a successful payment
    pub success_url: Option<String>,

    /// Redirect target when the customer cancels
    pub cancel_url: Option<String>,

    /// Front-end origin used to absolutize catalog image paths
    pub frontend_origin: Option<String>,

    /// API base URL (overridable for testing/mocking)
    pub api_base_url: String,
}

/// The subset of settings a checkout request actually needs, proven present
#[derive(Debug, Clone, Copy)]
pub struct RequiredSettings<'a> {
    pub secret_key: &'a str,
    pub success_url: &'a str,
    pub cancel_url: &'a str,
}

impl StripeSettings {
    /// Load configuration from environment variables.
    ///
    /// Reads `STRIPE_SECRET_KEY`, `CHECKOUT_SUCCESS_URL`,
    /// `CHECKOUT_CANCEL_URL`, and `FRONTEND_ORIGIN`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self {
            secret_key: env::var("STRIPE_SECRET_KEY").ok(),
            success_url: env::var("CHECKOUT_SUCCESS_URL").ok(),
            cancel_url: env::var("CHECKOUT_CANCEL_URL").ok(),
            frontend_origin: env::var("FRONTEND_ORIGIN").ok(),
            api_base_url: "https://api.stripe.com".to_string(),
        }
    }

    /// Create settings with explicit values (for testing)
    pub fn new(
        secret_key: impl Into<String>,
        success_url: impl Into<String>,
        cancel_url: impl Into<String>,
    ) -> Self {
        Self {
            secret_key: Some(secret_key.into()),
            success_url: Some(success_url.into()),
            cancel_url: Some(cancel_url.into()),
            frontend_origin: None,
            api_base_url: "https://api.stripe.com".to_string(),
        }
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Builder: set the front-end origin for image resolution
    pub fn with_frontend_origin(mut self, origin: impl Into<String>) -> Self {
        self.frontend_origin = Some(origin.into());
        self
    }

    /// Check that every required value is present, naming the missing
    /// variables. Runs per request, before any cart validation, so a
    /// misconfigured deployment never leaks partial validation detail.
    pub fn require(&self) -> CheckoutResult<RequiredSettings<'_>> {
        let fields = [
            ("STRIPE_SECRET_KEY", &self.secret_key),
            ("CHECKOUT_SUCCESS_URL", &self.success_url),
            ("CHECKOUT_CANCEL_URL", &self.cancel_url),
        ];

        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(CheckoutError::ServerMisconfigured(missing.join(", ")));
        }

        Ok(RequiredSettings {
            secret_key: self.secret_key.as_deref().unwrap_or_default(),
            success_url: self.success_url.as_deref().unwrap_or_default(),
            cancel_url: self.cancel_url.as_deref().unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_settings_pass() {
        let settings = StripeSettings::new(
            "sk_test_abc",
            "https://risemobility.co.uk/thanks",
            "https://risemobility.co.uk/basket",
        );

        let required = settings.require().unwrap();
        assert_eq!(required.secret_key, "sk_test_abc");
        assert_eq!(required.success_url, "https://risemobility.co.uk/thanks");
    }

    #[test]
    fn test_missing_values_are_named() {
        let settings = StripeSettings {
            secret_key: None,
            success_url: Some("https://risemobility.co.uk/thanks".into()),
            cancel_url: None,
            frontend_origin: None,
            api_base_url: "https://api.stripe.com".into(),
        };

        let err = settings.require().unwrap_err();
        assert_eq!(err.code(), "server_misconfigured");
        assert_eq!(err.status_code(), 500);
        let message = err.to_string();
        assert!(message.contains("STRIPE_SECRET_KEY"));
        assert!(message.contains("CHECKOUT_CANCEL_URL"));
        assert!(!message.contains("CHECKOUT_SUCCESS_URL"));
    }
}
