//! # Stripe Checkout Sessions
//!
//! Exchanges a validated cart for a hosted-payment-page URL via the Stripe
//! Checkout Sessions API. Requests are form-encoded; every amount is the
//! catalog's integer minor-unit price, never a client-supplied float.

use crate::config::StripeSettings;
use checkout_core::{CheckoutError, CheckoutResult, ValidatedLineItem, CURRENCY};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

/// Client for creating Stripe checkout sessions
pub struct SessionClient {
    settings: StripeSettings,
    client: Client,
}

impl SessionClient {
    /// Create a new session client
    pub fn new(settings: StripeSettings) -> CheckoutResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                error!("Failed to build HTTP client: {e}");
                CheckoutError::Internal
            })?;

        Ok(Self { settings, client })
    }

    /// Create from environment variables
    pub fn from_env() -> CheckoutResult<Self> {
        Self::new(StripeSettings::from_env())
    }

    /// The underlying settings (for per-request configuration checks)
    pub fn settings(&self) -> &StripeSettings {
        &self.settings
    }

    /// Create a checkout session and return the hosted payment page URL.
    ///
    /// Fails `provider_checkout_failed` when Stripe reports failure or the
    /// call does not complete, and `provider_invalid_response` when Stripe
    /// reports success without a usable redirect URL.
    #[instrument(skip(self, items), fields(items = items.len()))]
    pub async fn create_session(&self, items: &[ValidatedLineItem]) -> CheckoutResult<String> {
        let required = self.settings.require()?;
        let form_params = self.build_form_params(items, required.success_url, required.cancel_url);

        debug!("Creating Stripe checkout session: {} line items", items.len());

        let url = format!("{}/v1/checkout/sessions", self.settings.api_base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(required.secret_key)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| {
                error!("Stripe request failed: {e}");
                CheckoutError::ProviderCheckoutFailed(
                    "Unable to create payment session.".to_string(),
                )
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            error!("Stripe API error: status={status}, body={body}");

            // Surface Stripe's own message when it parses; never the raw body.
            let message = serde_json::from_str::<StripeErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| "Unable to create payment session.".to_string());

            return Err(CheckoutError::ProviderCheckoutFailed(message));
        }

        let session: SessionResponse =
            serde_json::from_str(&body).unwrap_or_default();

        let checkout_url = session
            .url
            .filter(|u| !u.is_empty())
            .ok_or(CheckoutError::ProviderInvalidResponse)?;

        info!("Created Stripe checkout session");

        Ok(checkout_url)
    }

    /// Build the form body for the Checkout Sessions API.
    ///
    /// Success/cancel targets, automatic tax, and promotion-code support are
    /// fixed configuration, never request-controlled.
    fn build_form_params(
        &self,
        items: &[ValidatedLineItem],
        success_url: &str,
        cancel_url: &str,
    ) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = vec![
            ("mode".to_string(), "payment".to_string()),
            ("success_url".to_string(), success_url.to_string()),
            ("cancel_url".to_string(), cancel_url.to_string()),
            ("automatic_tax[enabled]".to_string(), "true".to_string()),
            ("allow_promotion_codes".to_string(), "true".to_string()),
        ];

        for (i, entry) in items.iter().enumerate() {
            params.push((
                format!("line_items[{i}][quantity]"),
                entry.quantity.to_string(),
            ));
            params.push((
                format!("line_items[{i}][price_data][currency]"),
                CURRENCY.to_string(),
            ));
            params.push((
                format!("line_items[{i}][price_data][unit_amount]"),
                entry.product.unit_amount.to_string(),
            ));
            params.push((
                format!("line_items[{i}][price_data][product_data][name]"),
                entry.product.name.clone(),
            ));

            if let (Some(image), Some(origin)) =
                (&entry.product.image, &self.settings.frontend_origin)
            {
                params.push((
                    format!("line_items[{i}][price_data][product_data][images][0]"),
                    resolve_image_url(image, origin),
                ));
            }

            if let Some(color) = &entry.selected_color {
                params.push((
                    format!("line_items[{i}][price_data][product_data][metadata][selectedColor]"),
                    color.clone(),
                ));
            }

            // Canonical id travels as metadata for fulfillment/audit only.
            params.push((
                format!("line_items[{i}][price_data][product_data][metadata][productId]"),
                entry.product.id.clone(),
            ));
        }

        params
    }
}

/// Resolve a catalog image path against the front-end origin.
/// Already-absolute URLs pass through unchanged.
fn resolve_image_url(image: &str, origin: &str) -> String {
    if image.starts_with("http://") || image.starts_with("https://") {
        image.to_string()
    } else {
        format!(
            "{}/{}",
            origin.trim_end_matches('/'),
            image.trim_start_matches('/')
        )
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Default, Deserialize)]
struct SessionResponse {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}
