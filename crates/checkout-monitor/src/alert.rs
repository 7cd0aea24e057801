//! # Alert Gate
//!
//! Rate-limits high-severity alerts derived from window threshold breaches.
//! Count and rate must both hold: count alone would trigger during heavy
//! traffic with a healthy rate, rate alone would trigger on one failure out
//! of one attempt.

use crate::window::WindowStats;
use chrono::{DateTime, Duration, Utc};

/// Cooldown-gated alert decision
#[derive(Debug)]
pub struct AlertGate {
    min_failures: usize,
    min_failure_rate: f64,
    cooldown: Duration,
    cooldown_until: Option<DateTime<Utc>>,
}

impl AlertGate {
    pub fn new(min_failures: usize, min_failure_rate: f64, cooldown: Duration) -> Self {
        Self {
            min_failures,
            min_failure_rate,
            cooldown,
            cooldown_until: None,
        }
    }

    /// Decide whether an alert should fire for these statistics.
    ///
    /// Returns `true` at most once per cooldown period; the deadline is
    /// pushed forward before the caller sends anything, so a send that
    /// races a second breach cannot double-fire.
    pub fn maybe_alert(&mut self, stats: &WindowStats, now: DateTime<Utc>) -> bool {
        let eligible =
            stats.failures >= self.min_failures && stats.failure_rate >= self.min_failure_rate;
        if !eligible {
            return false;
        }

        if let Some(until) = self.cooldown_until {
            if now < until {
                return false;
            }
        }

        self.cooldown_until = Some(now + self.cooldown);
        true
    }
}
