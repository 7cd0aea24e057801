//! # Network-Call Interceptor
//!
//! Decorator over an injected network-call dependency. Callers that want
//! checkout observation opt in by composing `MonitoredSend` around their
//! sender; no ambient global is patched. Only checkout-shaped requests
//! (POST to a checkout path) are observed; everything else passes through
//! untouched.

use crate::monitor::CheckoutMonitor;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

/// An outbound HTTP request, reduced to what classification needs
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: String,
    pub url: String,
    pub body: Option<String>,
}

impl OutboundRequest {
    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: "POST".to_string(),
            url: url.into(),
            body: Some(body.into()),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            url: url.into(),
            body: None,
        }
    }
}

/// A completed outbound response
#[derive(Debug, Clone)]
pub struct OutboundResponse {
    pub status: u16,
    pub body: String,
}

impl OutboundResponse {
    /// Whether the status indicates success (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport-level failure: the call never completed
#[derive(Debug, Error)]
#[error("transport error: {0}")]
pub struct SendError(pub String);

/// Network-call primitive the interceptor wraps
#[async_trait]
pub trait HttpSend: Send + Sync {
    async fn send(&self, request: OutboundRequest) -> Result<OutboundResponse, SendError>;
}

/// `HttpSend` backed by reqwest
pub struct ReqwestSend {
    client: Client,
}

impl ReqwestSend {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for ReqwestSend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpSend for ReqwestSend {
    async fn send(&self, request: OutboundRequest) -> Result<OutboundResponse, SendError> {
        let method: reqwest::Method = request
            .method
            .parse()
            .map_err(|_| SendError(format!("invalid method: {}", request.method)))?;

        let mut builder = self.client.request(method, &request.url);
        if let Some(body) = request.body {
            builder = builder
                .header("Content-Type", "application/json")
                .body(body);
        }

        let response = builder.send().await.map_err(|e| SendError(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| SendError(e.to_string()))?;

        Ok(OutboundResponse { status, body })
    }
}

/// A request is a checkout attempt iff it targets a checkout path with POST
pub fn is_checkout_request(method: &str, url: &str) -> bool {
    method.eq_ignore_ascii_case("POST") && url.to_ascii_lowercase().contains("checkout")
}

/// Decorator feeding checkout outcomes into a `CheckoutMonitor`
pub struct MonitoredSend<S: HttpSend> {
    inner: S,
    monitor: Arc<CheckoutMonitor>,
}

impl<S: HttpSend> MonitoredSend<S> {
    pub fn new(inner: S, monitor: Arc<CheckoutMonitor>) -> Self {
        Self { inner, monitor }
    }
}

#[async_trait]
impl<S: HttpSend> HttpSend for MonitoredSend<S> {
    async fn send(&self, request: OutboundRequest) -> Result<OutboundResponse, SendError> {
        let observed = is_checkout_request(&request.method, &request.url);
        let method = request.method.clone();
        let endpoint = request.url.clone();

        match self.inner.send(request).await {
            Ok(response) => {
                if observed {
                    self.monitor.observe(
                        response.ok(),
                        json!({
                            "status": response.status,
                            "method": method,
                            "endpoint": endpoint,
                        }),
                    );
                }
                Ok(response)
            }
            Err(error) => {
                if observed {
                    self.monitor.observe(
                        false,
                        json!({
                            "method": method,
                            "endpoint": endpoint,
                            "transportError": { "message": error.to_string() },
                        }),
                    );
                }
                // Surfaced once to the caller; retry policy belongs upstream.
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::MonitorConfig;

    struct StubSend {
        result: Result<u16, String>,
    }

    #[async_trait]
    impl HttpSend for StubSend {
        async fn send(&self, _request: OutboundRequest) -> Result<OutboundResponse, SendError> {
            match &self.result {
                Ok(status) => Ok(OutboundResponse {
                    status: *status,
                    body: String::new(),
                }),
                Err(message) => Err(SendError(message.clone())),
            }
        }
    }

    fn monitored(result: Result<u16, String>) -> (MonitoredSend<StubSend>, Arc<CheckoutMonitor>) {
        let monitor = Arc::new(CheckoutMonitor::new(MonitorConfig {
            secure_context: false,
            ..Default::default()
        }));
        (
            MonitoredSend::new(StubSend { result }, monitor.clone()),
            monitor,
        )
    }

    #[test]
    fn test_classification() {
        assert!(is_checkout_request("POST", "/api/create-checkout-session"));
        assert!(is_checkout_request("post", "https://x.example/Checkout"));
        assert!(!is_checkout_request("GET", "/api/create-checkout-session"));
        assert!(!is_checkout_request("POST", "/api/telemetry"));
    }

    #[tokio::test]
    async fn test_checkout_success_recorded() {
        let (send, monitor) = monitored(Ok(200));

        let response = send
            .send(OutboundRequest::post("/api/create-checkout-session", "{}"))
            .await
            .unwrap();

        assert!(response.ok());
        let stats = monitor.snapshot();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.failures, 0);
    }

    #[tokio::test]
    async fn test_checkout_http_failure_recorded() {
        let (send, monitor) = monitored(Ok(502));

        send.send(OutboundRequest::post("/api/create-checkout-session", "{}"))
            .await
            .unwrap();

        let stats = monitor.snapshot();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.failures, 1);
    }

    #[tokio::test]
    async fn test_transport_error_recorded_and_surfaced() {
        let (send, monitor) = monitored(Err("connection reset".into()));

        let err = send
            .send(OutboundRequest::post("/api/create-checkout-session", "{}"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("connection reset"));
        let stats = monitor.snapshot();
        assert_eq!(stats.failures, 1);
    }

    #[tokio::test]
    async fn test_non_checkout_calls_pass_unobserved() {
        let (send, monitor) = monitored(Ok(500));

        send.send(OutboundRequest::get("/api/create-checkout-session"))
            .await
            .unwrap();
        send.send(OutboundRequest::post("/api/telemetry", "{}"))
            .await
            .unwrap();

        assert_eq!(monitor.snapshot().total, 0);
    }
}
