//! # Sliding Failure Window
//!
//! Time-bounded record of checkout attempt outcomes. The window slides with
//! the most recent event: pruning happens on every observation, so the
//! statistics always describe "the last N minutes as of the latest outcome",
//! never wall-clock-aligned buckets.

use chrono::{DateTime, Duration, Utc};

/// One observed checkout attempt
#[derive(Debug, Clone, Copy)]
pub struct CheckoutOutcome {
    pub success: bool,
    pub at: DateTime<Utc>,
}

/// Statistics over the outcomes currently inside the window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    pub total: usize,
    pub failures: usize,
    pub failure_rate: f64,
}

impl WindowStats {
    /// Failure rate rounded to 3 decimal places, as carried on the wire
    pub fn rounded_rate(&self) -> f64 {
        (self.failure_rate * 1000.0).round() / 1000.0
    }
}

/// Append-then-prune record of checkout outcomes
#[derive(Debug)]
pub struct FailureWindowMonitor {
    window: Duration,
    outcomes: Vec<CheckoutOutcome>,
}

impl FailureWindowMonitor {
    /// Create a monitor covering the given window
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            outcomes: Vec::new(),
        }
    }

    /// Record an outcome at the current time
    pub fn record(&mut self, success: bool) -> WindowStats {
        self.record_at(success, Utc::now())
    }

    /// Record an outcome at an explicit time. Outcomes older than the
    /// window relative to `now` are dropped before computing statistics.
    pub fn record_at(&mut self, success: bool, now: DateTime<Utc>) -> WindowStats {
        self.outcomes.push(CheckoutOutcome { success, at: now });
        self.outcomes.retain(|outcome| now - outcome.at <= self.window);
        self.stats()
    }

    /// Statistics over the currently retained outcomes
    pub fn stats(&self) -> WindowStats {
        let total = self.outcomes.len();
        let failures = self.outcomes.iter().filter(|o| !o.success).count();
        let failure_rate = if total == 0 {
            0.0
        } else {
            failures as f64 / total as f64
        };

        WindowStats {
            total,
            failures,
            failure_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_all_failures() {
        let mut monitor = FailureWindowMonitor::new(Duration::minutes(5));

        let mut stats = monitor.record_at(false, t(0));
        for i in 1..5 {
            stats = monitor.record_at(false, t(i));
        }

        assert_eq!(stats.total, 5);
        assert_eq!(stats.failures, 5);
        assert_eq!(stats.failure_rate, 1.0);
    }

    #[test]
    fn test_one_failure_in_ten() {
        let mut monitor = FailureWindowMonitor::new(Duration::minutes(5));

        for i in 0..9 {
            monitor.record_at(true, t(i));
        }
        let stats = monitor.record_at(false, t(9));

        assert_eq!(stats.total, 10);
        assert_eq!(stats.failures, 1);
        assert_eq!(stats.failure_rate, 0.1);
        assert_eq!(stats.rounded_rate(), 0.1);
    }

    #[test]
    fn test_old_outcomes_expire() {
        let mut monitor = FailureWindowMonitor::new(Duration::minutes(5));

        monitor.record_at(false, t(0));
        monitor.record_at(false, t(10));

        // 301 s after the first outcome: only it has left the window
        let stats = monitor.record_at(true, t(301));
        assert_eq!(stats.total, 2);
        assert_eq!(stats.failures, 1);
        assert_eq!(stats.failure_rate, 0.5);
    }

    #[test]
    fn test_outcome_exactly_at_window_edge_is_kept() {
        let mut monitor = FailureWindowMonitor::new(Duration::minutes(5));

        monitor.record_at(false, t(0));
        let stats = monitor.record_at(true, t(300));
        assert_eq!(stats.total, 2);
    }

    #[test]
    fn test_empty_window_rate_is_zero() {
        let monitor = FailureWindowMonitor::new(Duration::minutes(5));
        let stats = monitor.stats();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.failure_rate, 0.0);
    }

    #[test]
    fn test_rounded_rate() {
        let stats = WindowStats {
            total: 3,
            failures: 1,
            failure_rate: 1.0 / 3.0,
        };
        assert_eq!(stats.rounded_rate(), 0.333);
    }
}
