//! Statistics snapshot and its display form

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fraction of requests that received a built-in intervention
///
/// Defined as 0 when nothing has been recorded yet.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn chaos_rate(delayed: u64, errored: u64, gibberish: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (delayed + errored + gibberish) as f64 / total as f64
}

/// Immutable copy of the running statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChaosStats {
    /// Decisions recorded, including `None`
    pub total_requests: u64,
    /// Delay outcomes
    pub delayed_requests: u64,
    /// Error outcomes
    pub error_requests: u64,
    /// Gibberish outcomes
    pub gibberish_requests: u64,
    /// Custom outcomes
    pub custom_requests: u64,
    /// Incremental mean of injected delays in milliseconds
    pub average_delay_ms: f64,
    /// When counting started (process start or last reset)
    pub started_at: DateTime<Utc>,
    /// Milliseconds since `started_at` at snapshot time
    pub uptime_ms: u64,
}

impl ChaosStats {
    /// Empty statistics starting at `started_at`
    #[must_use]
    pub const fn empty(started_at: DateTime<Utc>) -> Self {
        Self {
            total_requests: 0,
            delayed_requests: 0,
            error_requests: 0,
            gibberish_requests: 0,
            custom_requests: 0,
            average_delay_ms: 0.0,
            started_at,
            uptime_ms: 0,
        }
    }

    /// Requests that received any intervention, custom ones included
    #[must_use]
    pub const fn chaos_requests(&self) -> u64 {
        self.delayed_requests + self.error_requests + self.gibberish_requests + self.custom_requests
    }

    /// Built-in chaos rate in `[0, 1]`
    #[must_use]
    pub fn chaos_rate(&self) -> f64 {
        chaos_rate(
            self.delayed_requests,
            self.error_requests,
            self.gibberish_requests,
            self.total_requests,
        )
    }

    /// Display form used by the HTTP API and the CLI
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn report(&self) -> StatsReport {
        StatsReport {
            total_requests: self.total_requests,
            delayed_requests: self.delayed_requests,
            error_requests: self.error_requests,
            gibberish_requests: self.gibberish_requests,
            custom_requests: self.custom_requests,
            chaos_rate_percent: format!("{:.1}", self.chaos_rate() * 100.0),
            average_delay_ms: self.average_delay_ms.round() as u64,
            uptime_seconds: self.uptime_ms / 1000,
            started_at: self.started_at,
        }
    }
}

/// Rounded statistics for presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsReport {
    pub total_requests: u64,
    pub delayed_requests: u64,
    pub error_requests: u64,
    pub gibberish_requests: u64,
    pub custom_requests: u64,
    /// Percentage with one decimal, e.g. `"12.5"`
    pub chaos_rate_percent: String,
    pub average_delay_ms: u64,
    pub uptime_seconds: u64,
    pub started_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> ChaosStats {
        ChaosStats {
            total_requests: 8,
            delayed_requests: 2,
            error_requests: 1,
            gibberish_requests: 0,
            custom_requests: 1,
            average_delay_ms: 499.6,
            started_at: Utc::now(),
            uptime_ms: 12_345,
        }
    }

    #[test]
    fn rate_is_zero_without_requests() {
        assert!(chaos_rate(0, 0, 0, 0).abs() < f64::EPSILON);
        assert!(ChaosStats::empty(Utc::now()).chaos_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn rate_excludes_custom_outcomes() {
        assert!((stats().chaos_rate() - 0.375).abs() < f64::EPSILON);
        assert_eq!(stats().chaos_requests(), 4);
    }

    #[test]
    fn report_rounds_values() {
        let report = stats().report();
        assert_eq!(report.chaos_rate_percent, "37.5");
        assert_eq!(report.average_delay_ms, 500);
        assert_eq!(report.uptime_seconds, 12);
        assert_eq!(report.total_requests, 8);
    }

    #[test]
    fn empty_report() {
        let report = ChaosStats::empty(Utc::now()).report();
        assert_eq!(report.chaos_rate_percent, "0.0");
        assert_eq!(report.average_delay_ms, 0);
    }
}
