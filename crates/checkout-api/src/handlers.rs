//! # Request Handlers
//!
//! The checkout-session endpoint: origin gate, transport and configuration
//! checks, cart re-validation, provider call, and a uniform response shape
//! for every outcome. The handler is the single place that maps errors to
//! responses; nothing below it writes HTTP.

use crate::state::AppState;
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use checkout_core::{validate_cart, CheckoutError, CheckoutResult, ErrorClass};
use serde_json::{json, Value};
use tracing::{error, instrument, warn};

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "rise-checkout",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Checkout-session endpoint. Accepts POST and OPTIONS; every other verb
/// gets the same uniform error shape, so the route matches any method.
#[instrument(skip(state, headers, body), fields(method = %method))]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let origin = headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    match handle_checkout(&state, &method, &headers, &body, origin.as_deref()).await {
        Ok(response) => response,
        Err(err) => {
            // The origin echo is computed independently of the failure: an
            // origin can be allowed for CORS even when the request itself
            // is rejected.
            let echo = state.origins.echo(origin.as_deref());
            match err.class() {
                ErrorClass::UserError => warn!("Checkout rejected: {} ({})", err.code(), err),
                ErrorClass::SystemError => error!("Checkout failed: {} ({})", err.code(), err),
            }
            error_response(&err, echo.as_deref())
        }
    }
}

async fn handle_checkout(
    state: &AppState,
    method: &Method,
    headers: &HeaderMap,
    body: &Bytes,
    origin: Option<&str>,
) -> CheckoutResult<Response> {
    let echo = state.origins.resolve(origin)?;

    if method == Method::OPTIONS {
        return Ok(preflight_response(echo.as_deref()));
    }

    if method != Method::POST {
        return Err(CheckoutError::MethodNotAllowed);
    }

    require_https(state, headers)?;

    // Configuration is checked before any validation work so a
    // misconfigured deployment never leaks partial cart detail.
    state.stripe.settings().require()?;

    let payload: Value = serde_json::from_slice(body)
        .map_err(|_| CheckoutError::InvalidPayload("Request body must be a JSON object.".into()))?;

    let items = validate_cart(&payload, &state.catalog)?;
    let url = state.stripe.create_session(&items).await?;

    Ok(json_response(
        StatusCode::OK,
        json!({ "url": url }),
        echo.as_deref(),
    ))
}

/// In production, reject requests forwarded over plain HTTP. A missing
/// forwarded-protocol header passes (direct, non-proxied traffic).
fn require_https(state: &AppState, headers: &HeaderMap) -> CheckoutResult<()> {
    if !state.config.is_production() {
        return Ok(());
    }

    match headers.get("x-forwarded-proto").and_then(|v| v.to_str().ok()) {
        Some(proto) if proto != "https" => Err(CheckoutError::HttpsRequired),
        _ => Ok(()),
    }
}

fn error_response(err: &CheckoutError, origin_echo: Option<&str>) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    json_response(
        status,
        json!({
            "error": {
                "code": err.code(),
                "message": err.to_string(),
                "type": err.class(),
            }
        }),
        origin_echo,
    )
}

fn preflight_response(origin_echo: Option<&str>) -> Response {
    cors_builder(StatusCode::NO_CONTENT, origin_echo)
        .body(Body::empty())
        .expect("static preflight response")
}

fn json_response(status: StatusCode, payload: Value, origin_echo: Option<&str>) -> Response {
    cors_builder(status, origin_echo)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("static json response")
}

/// Every response carries the CORS surface; the allow-origin echo and
/// `Vary: Origin` appear only for allow-listed origins.
fn cors_builder(status: StatusCode, origin_echo: Option<&str>) -> axum::http::response::Builder {
    let mut builder = Response::builder()
        .status(status)
        .header(header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS")
        .header(header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type");

    if let Some(origin) = origin_echo {
        builder = builder
            .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin)
            .header(header::VARY, "Origin");
    }

    builder
}
