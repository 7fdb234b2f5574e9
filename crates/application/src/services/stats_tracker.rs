//! Running chaos statistics

use std::time::Instant;

use chrono::{DateTime, Utc};
use domain::{ChaosStats, Outcome};
use parking_lot::Mutex;

#[derive(Debug)]
struct Counters {
    total: u64,
    delayed: u64,
    errored: u64,
    gibberish: u64,
    custom: u64,
    average_delay_ms: f64,
    started_at: DateTime<Utc>,
    started: Instant,
}

impl Counters {
    fn fresh() -> Self {
        Self {
            total: 0,
            delayed: 0,
            errored: 0,
            gibberish: 0,
            custom: 0,
            average_delay_ms: 0.0,
            started_at: Utc::now(),
            started: Instant::now(),
        }
    }
}

/// Thread-safe outcome counters
///
/// Every `record` happens under a single lock, so concurrent decisions never
/// lose updates. The lock is never held across an await point.
#[derive(Debug)]
pub struct StatsTracker {
    counters: Mutex<Counters>,
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsTracker {
    /// Create an empty tracker; uptime starts now
    #[must_use]
    pub fn new() -> Self {
        Self {
            counters: Mutex::new(Counters::fresh()),
        }
    }

    /// Count one finished decision
    #[allow(clippy::cast_precision_loss)]
    pub fn record(&self, outcome: &Outcome) {
        let mut counters = self.counters.lock();
        counters.total += 1;
        match outcome {
            Outcome::None => {},
            Outcome::Delay { milliseconds, .. } => {
                counters.delayed += 1;
                // Incremental mean keeps precision under sustained load
                let delta = *milliseconds as f64 - counters.average_delay_ms;
                counters.average_delay_ms += delta / counters.delayed as f64;
            },
            Outcome::Error { .. } => counters.errored += 1,
            Outcome::Gibberish { .. } => counters.gibberish += 1,
            Outcome::Custom { .. } => counters.custom += 1,
        }
    }

    /// Immutable copy of the current counters
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn snapshot(&self) -> ChaosStats {
        let counters = self.counters.lock();
        ChaosStats {
            total_requests: counters.total,
            delayed_requests: counters.delayed,
            error_requests: counters.errored,
            gibberish_requests: counters.gibberish,
            custom_requests: counters.custom,
            average_delay_ms: counters.average_delay_ms,
            started_at: counters.started_at,
            uptime_ms: counters.started.elapsed().as_millis() as u64,
        }
    }

    /// Zero all counters and restart the uptime clock
    pub fn reset(&self) {
        *self.counters.lock() = Counters::fresh();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use domain::{CorrelationId, CustomPayload, GibberishFormat};

    use super::*;

    fn delay(ms: u64) -> Outcome {
        Outcome::Delay {
            correlation_id: CorrelationId::new(),
            milliseconds: ms,
        }
    }

    #[test]
    fn starts_empty() {
        let stats = StatsTracker::new().snapshot();
        assert_eq!(stats.total_requests, 0);
        assert!(stats.chaos_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn counts_each_kind() {
        let tracker = StatsTracker::new();
        tracker.record(&Outcome::None);
        tracker.record(&delay(100));
        tracker.record(&Outcome::Error {
            correlation_id: CorrelationId::new(),
            status_code: 500,
            message: "boom".to_string(),
        });
        tracker.record(&Outcome::Gibberish {
            correlation_id: CorrelationId::new(),
            format: GibberishFormat::Text,
            body: "OOGA".to_string(),
        });
        tracker.record(&Outcome::Custom {
            correlation_id: CorrelationId::new(),
            name: "network-jitter".to_string(),
            payload: CustomPayload::Note {
                message: "jitter".to_string(),
                details: serde_json::Value::Null,
            },
        });

        let stats = tracker.snapshot();
        assert_eq!(stats.total_requests, 5);
        assert_eq!(stats.delayed_requests, 1);
        assert_eq!(stats.error_requests, 1);
        assert_eq!(stats.gibberish_requests, 1);
        assert_eq!(stats.custom_requests, 1);
        assert!((stats.chaos_rate() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn average_delay_is_incremental_mean() {
        let tracker = StatsTracker::new();
        for ms in [100, 200, 600] {
            tracker.record(&delay(ms));
        }
        assert!((tracker.snapshot().average_delay_ms - 300.0).abs() < 1e-9);
    }

    #[test]
    fn mean_stays_stable_over_many_updates() {
        let tracker = StatsTracker::new();
        for _ in 0..100_000 {
            tracker.record(&delay(u64::MAX / 4));
        }
        let expected = (u64::MAX / 4) as f64;
        let stats = tracker.snapshot();
        assert!((stats.average_delay_ms - expected).abs() / expected < 1e-9);
    }

    #[test]
    fn reset_zeroes_everything() {
        let tracker = StatsTracker::new();
        tracker.record(&delay(500));
        let before = tracker.snapshot().started_at;
        tracker.reset();

        let stats = tracker.snapshot();
        assert_eq!(stats.total_requests, 0);
        assert_eq!(stats.delayed_requests, 0);
        assert!(stats.average_delay_ms.abs() < f64::EPSILON);
        assert!(stats.started_at >= before);
    }

    #[test]
    fn concurrent_records_are_not_lost() {
        let tracker = Arc::new(StatsTracker::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let tracker = Arc::clone(&tracker);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        tracker.record(&delay(10));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let stats = tracker.snapshot();
        assert_eq!(stats.total_requests, 8000);
        assert_eq!(stats.delayed_requests, 8000);
        assert!((stats.average_delay_ms - 10.0).abs() < 1e-9);
    }
}
