//! # checkout-monitor
//!
//! Client-side checkout reliability monitoring for rise-checkout-rs.
//!
//! This crate provides:
//! - `FailureWindowMonitor` — sliding time window over checkout outcomes
//! - `AlertGate` — cooldown-gated threshold alerting
//! - `TelemetryEmitter` — fire-and-forget event delivery
//! - `MonitoredSend` — a decorator that classifies outbound calls and feeds
//!   checkout outcomes into the monitor
//!
//! The two halves of the system share nothing but the notion of a
//! "checkout attempt": this crate never talks to the server-side pipeline.
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_monitor::{CheckoutMonitor, MonitorConfig, MonitoredSend, ReqwestSend};
//! use std::sync::Arc;
//!
//! let monitor = Arc::new(CheckoutMonitor::new(MonitorConfig::default()));
//! let send = MonitoredSend::new(ReqwestSend::new(), monitor);
//! // Use `send` for outbound calls; checkout attempts are observed,
//! // everything else passes through.
//! ```

pub mod alert;
pub mod intercept;
pub mod monitor;
pub mod telemetry;
pub mod window;

// Re-exports for convenience
pub use alert::AlertGate;
pub use intercept::{
    is_checkout_request, HttpSend, MonitoredSend, OutboundRequest, OutboundResponse, ReqwestSend,
    SendError,
};
pub use monitor::{
    CheckoutMonitor, ALERT_THRESHOLD_BREACHED, EVENT_CHECKOUT_FAILURE, EVENT_CHECKOUT_SUCCESS,
};
pub use telemetry::{AlertEvent, MonitorConfig, TelemetryEmitter, TelemetryEvent};
pub use window::{CheckoutOutcome, FailureWindowMonitor, WindowStats};
