//! # Telemetry Emitter
//!
//! Best-effort, fire-and-forget delivery of structured events to the
//! telemetry and alert sinks. Delivery never blocks the observed call,
//! never retries, and its own failures are logged locally and swallowed.
//! When the execution context is not secure, events are dropped outright:
//! plaintext delivery of monitoring data is unacceptable, not degraded.

use chrono::{Duration, Utc};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// Monitoring configuration; defaults mirror the production deployment
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Application identifier stamped on every event
    pub app: String,
    /// Deployment environment name
    pub env: String,
    /// Telemetry sink (JSON POST)
    pub telemetry_endpoint: String,
    /// Alert sink (JSON POST)
    pub alert_endpoint: String,
    /// Sliding window covering recent checkout outcomes
    pub window: Duration,
    /// Minimum failures inside the window before an alert is eligible
    pub failure_threshold: usize,
    /// Minimum failure rate inside the window before an alert is eligible
    pub failure_rate_threshold: f64,
    /// Minimum interval between consecutive alerts
    pub alert_cooldown: Duration,
    /// Whether the execution context allows telemetry delivery at all
    pub secure_context: bool,
    /// Page or service URL stamped on telemetry events
    pub source_url: Option<String>,
    /// Agent string stamped on telemetry events
    pub user_agent: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            app: "rise-frontend".to_string(),
            env: "production".to_string(),
            telemetry_endpoint: "/api/telemetry".to_string(),
            alert_endpoint: "/api/alerts".to_string(),
            window: Duration::minutes(5),
            failure_threshold: 5,
            failure_rate_threshold: 0.2,
            alert_cooldown: Duration::minutes(10),
            secure_context: true,
            source_url: None,
            user_agent: concat!("rise-checkout-monitor/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Telemetry event wire shape
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryEvent {
    pub app: String,
    pub env: String,
    pub event_type: String,
    pub severity: String,
    pub detail: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub user_agent: String,
    pub timestamp: String,
}

/// Alert event wire shape
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertEvent {
    pub app: String,
    pub env: String,
    pub alert_type: String,
    pub severity: String,
    pub detail: Value,
    pub timestamp: String,
}

/// Fire-and-forget sender for telemetry and alert events
#[derive(Clone)]
pub struct TelemetryEmitter {
    config: Arc<MonitorConfig>,
    client: Client,
}

impl TelemetryEmitter {
    pub fn new(config: Arc<MonitorConfig>) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Emit one telemetry event. Returns immediately; delivery happens on a
    /// spawned task and cannot affect the caller.
    pub fn emit(&self, event_type: &str, severity: &str, detail: Value) {
        let event = TelemetryEvent {
            app: self.config.app.clone(),
            env: self.config.env.clone(),
            event_type: event_type.to_string(),
            severity: severity.to_string(),
            detail,
            url: self.config.source_url.clone(),
            user_agent: self.config.user_agent.clone(),
            timestamp: Utc::now().to_rfc3339(),
        };

        self.post_json(self.config.telemetry_endpoint.clone(), event);
    }

    /// Emit one high-severity alert
    pub fn emit_alert(&self, alert_type: &str, detail: Value) {
        let event = AlertEvent {
            app: self.config.app.clone(),
            env: self.config.env.clone(),
            alert_type: alert_type.to_string(),
            severity: "high".to_string(),
            detail,
            timestamp: Utc::now().to_rfc3339(),
        };

        self.post_json(self.config.alert_endpoint.clone(), event);
    }

    fn post_json<T: Serialize + Send + 'static>(&self, endpoint: String, payload: T) {
        if !self.config.secure_context {
            warn!("Telemetry skipped: insecure context");
            return;
        }

        let client = self.client.clone();
        tokio::spawn(async move {
            if let Err(error) = client.post(&endpoint).json(&payload).send().await {
                warn!("Telemetry transport failed: {error}");
            }
        });
    }
}
