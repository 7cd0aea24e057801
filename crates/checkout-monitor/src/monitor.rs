//! # Checkout Monitor
//!
//! Composition of the sliding window, the alert gate, and the telemetry
//! emitter. One instance per process or session; all mutable monitoring
//! state lives behind its lock, never in ambient globals.

use crate::alert::AlertGate;
use crate::telemetry::{MonitorConfig, TelemetryEmitter};
use crate::window::{FailureWindowMonitor, WindowStats};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Telemetry event types for checkout attempts
pub const EVENT_CHECKOUT_SUCCESS: &str = "checkout.session.success";
pub const EVENT_CHECKOUT_FAILURE: &str = "checkout.session.failure";

/// Alert type for a breached failure threshold
pub const ALERT_THRESHOLD_BREACHED: &str = "checkout.session.failure.threshold_breached";

struct MonitorState {
    window: FailureWindowMonitor,
    gate: AlertGate,
}

/// Process-lifetime monitor of checkout reliability
pub struct CheckoutMonitor {
    config: Arc<MonitorConfig>,
    state: Mutex<MonitorState>,
    emitter: TelemetryEmitter,
}

impl CheckoutMonitor {
    pub fn new(config: MonitorConfig) -> Self {
        let config = Arc::new(config);
        let state = MonitorState {
            window: FailureWindowMonitor::new(config.window),
            gate: AlertGate::new(
                config.failure_threshold,
                config.failure_rate_threshold,
                config.alert_cooldown,
            ),
        };

        Self {
            emitter: TelemetryEmitter::new(config.clone()),
            state: Mutex::new(state),
            config,
        }
    }

    /// Record one checkout attempt outcome.
    ///
    /// Always emits exactly one telemetry event; additionally emits one
    /// alert when a failed attempt breaches both thresholds and the
    /// cooldown allows it. Telemetry and alert delivery are fire-and-forget
    /// and cannot affect the returned statistics.
    pub fn observe(&self, success: bool, detail: Value) -> WindowStats {
        self.observe_at(success, detail, Utc::now())
    }

    /// `observe` with an explicit clock, for deterministic tests
    pub fn observe_at(&self, success: bool, detail: Value, now: DateTime<Utc>) -> WindowStats {
        let (stats, alert) = {
            let mut state = self.state.lock().expect("monitor state poisoned");
            let stats = state.window.record_at(success, now);
            // Alerts are evaluated on failed attempts only; a success that
            // leaves the window unhealthy should not page anyone by itself.
            let alert = !success && state.gate.maybe_alert(&stats, now);
            (stats, alert)
        };

        let mut event_detail = json!({
            "total": stats.total,
            "failures": stats.failures,
            "failureRate": stats.rounded_rate(),
        });
        merge_detail(&mut event_detail, detail);

        let (event_type, severity) = if success {
            (EVENT_CHECKOUT_SUCCESS, "info")
        } else {
            (EVENT_CHECKOUT_FAILURE, "error")
        };
        self.emitter.emit(event_type, severity, event_detail);

        if alert {
            self.emitter.emit_alert(
                ALERT_THRESHOLD_BREACHED,
                json!({
                    "total": stats.total,
                    "failures": stats.failures,
                    "failureRate": stats.rounded_rate(),
                    "threshold": {
                        "minFailures": self.config.failure_threshold,
                        "minFailureRate": self.config.failure_rate_threshold,
                        "windowMs": self.config.window.num_milliseconds(),
                    },
                }),
            );
        }

        stats
    }

    /// Current window statistics without recording anything
    pub fn snapshot(&self) -> WindowStats {
        self.state.lock().expect("monitor state poisoned").window.stats()
    }
}

fn merge_detail(base: &mut Value, extra: Value) {
    if let (Some(base), Some(extra)) = (base.as_object_mut(), extra.as_object()) {
        for (key, value) in extra {
            base.insert(key.clone(), value.clone());
        }
    }
}
