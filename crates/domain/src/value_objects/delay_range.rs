//! Injected latency bounds

use std::{fmt, time::Duration};

use serde::Serialize;

use crate::errors::ConfigurationError;

/// Inclusive bounds, in milliseconds, for an injected delay
///
/// `min == max` is accepted and describes a fixed delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DelayRange {
    min_ms: u64,
    max_ms: u64,
}

impl DelayRange {
    /// Create a delay range with validation
    ///
    /// # Errors
    ///
    /// Returns `InvalidDelayRange` if `min_ms > max_ms`
    pub const fn new(min_ms: u64, max_ms: u64) -> Result<Self, ConfigurationError> {
        if min_ms > max_ms {
            return Err(ConfigurationError::InvalidDelayRange {
                min: min_ms,
                max: max_ms,
            });
        }
        Ok(Self { min_ms, max_ms })
    }

    /// Lower bound in milliseconds
    #[must_use]
    pub const fn min_ms(&self) -> u64 {
        self.min_ms
    }

    /// Upper bound in milliseconds
    #[must_use]
    pub const fn max_ms(&self) -> u64 {
        self.max_ms
    }

    /// Upper bound as a duration
    #[must_use]
    pub const fn max_duration(&self) -> Duration {
        Duration::from_millis(self.max_ms)
    }

    /// Whether a delay lies within the bounds (inclusive)
    #[must_use]
    pub const fn contains(&self, ms: u64) -> bool {
        ms >= self.min_ms && ms <= self.max_ms
    }
}

impl fmt::Display for DelayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}ms", self.min_ms, self.max_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_range() {
        let range = DelayRange::new(100, 2000).unwrap();
        assert_eq!(range.min_ms(), 100);
        assert_eq!(range.max_ms(), 2000);
        assert_eq!(range.max_duration(), Duration::from_secs(2));
    }

    #[test]
    fn fixed_range_is_allowed() {
        let range = DelayRange::new(500, 500).unwrap();
        assert!(range.contains(500));
        assert!(!range.contains(501));
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert_eq!(
            DelayRange::new(2000, 100),
            Err(ConfigurationError::InvalidDelayRange {
                min: 2000,
                max: 100
            })
        );
    }

    #[test]
    fn contains_is_inclusive() {
        let range = DelayRange::new(10, 20).unwrap();
        assert!(range.contains(10));
        assert!(range.contains(20));
        assert!(!range.contains(9));
        assert!(!range.contains(21));
    }

    #[test]
    fn display() {
        assert_eq!(DelayRange::new(1, 2).unwrap().to_string(), "1-2ms");
    }
}
