//! Relative weights of the built-in intervention kinds

use serde::{Deserialize, Serialize};

use super::ChaosKind;

/// Relative weights for delay, error and gibberish interventions
///
/// Selection partitions `[0, total)` cumulatively in the fixed order
/// delay → error → gibberish. An all-zero set of weights is replaced by
/// [`OutcomeWeights::DEFAULT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawWeights")]
pub struct OutcomeWeights {
    delay: u32,
    error: u32,
    gibberish: u32,
}

#[derive(Deserialize)]
struct RawWeights {
    #[serde(default)]
    delay: u32,
    #[serde(default)]
    error: u32,
    #[serde(default)]
    gibberish: u32,
}

impl From<RawWeights> for OutcomeWeights {
    fn from(raw: RawWeights) -> Self {
        Self::new(raw.delay, raw.error, raw.gibberish)
    }
}

impl OutcomeWeights {
    /// Fallback weights, also used when no preset is selected
    pub const DEFAULT: Self = Self {
        delay: 60,
        error: 25,
        gibberish: 15,
    };

    /// Create weights, falling back to `DEFAULT` when all are zero
    #[must_use]
    pub const fn new(delay: u32, error: u32, gibberish: u32) -> Self {
        if delay == 0 && error == 0 && gibberish == 0 {
            return Self::DEFAULT;
        }
        Self {
            delay,
            error,
            gibberish,
        }
    }

    /// Delay weight
    #[must_use]
    pub const fn delay(&self) -> u32 {
        self.delay
    }

    /// Error weight
    #[must_use]
    pub const fn error(&self) -> u32 {
        self.error
    }

    /// Gibberish weight
    #[must_use]
    pub const fn gibberish(&self) -> u32 {
        self.gibberish
    }

    /// Sum of all weights (never zero)
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.delay as u64 + self.error as u64 + self.gibberish as u64
    }

    /// Map a point in `[0, total)` to an intervention kind
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pick(&self, point: f64) -> ChaosKind {
        let delay_bound = f64::from(self.delay);
        let error_bound = (u64::from(self.delay) + u64::from(self.error)) as f64;

        if point < delay_bound {
            ChaosKind::Delay
        } else if point < error_bound {
            ChaosKind::Error
        } else {
            ChaosKind::Gibberish
        }
    }
}

impl Default for OutcomeWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_zero_falls_back_to_default() {
        assert_eq!(OutcomeWeights::new(0, 0, 0), OutcomeWeights::DEFAULT);
    }

    #[test]
    fn total_sums_weights() {
        assert_eq!(OutcomeWeights::new(50, 30, 20).total(), 100);
        assert_eq!(
            OutcomeWeights::new(u32::MAX, u32::MAX, 1).total(),
            2 * u64::from(u32::MAX) + 1
        );
    }

    #[test]
    fn pick_partitions_in_fixed_order() {
        let weights = OutcomeWeights::new(50, 30, 20);
        assert_eq!(weights.pick(0.0), ChaosKind::Delay);
        assert_eq!(weights.pick(49.9), ChaosKind::Delay);
        assert_eq!(weights.pick(50.0), ChaosKind::Error);
        assert_eq!(weights.pick(79.9), ChaosKind::Error);
        assert_eq!(weights.pick(80.0), ChaosKind::Gibberish);
        assert_eq!(weights.pick(99.9), ChaosKind::Gibberish);
    }

    #[test]
    fn zero_weight_kind_is_never_picked() {
        let weights = OutcomeWeights::new(0, 0, 100);
        assert_eq!(weights.pick(0.0), ChaosKind::Gibberish);

        let weights = OutcomeWeights::new(100, 0, 0);
        assert_eq!(weights.pick(99.99), ChaosKind::Delay);
    }

    #[test]
    fn deserialize_all_zero_uses_default() {
        let weights: OutcomeWeights =
            serde_json::from_str(r#"{"delay":0,"error":0,"gibberish":0}"#).unwrap();
        assert_eq!(weights, OutcomeWeights::DEFAULT);
    }

    #[test]
    fn deserialize_missing_fields_default_to_zero() {
        let weights: OutcomeWeights = serde_json::from_str(r#"{"error":10}"#).unwrap();
        assert_eq!(weights.delay(), 0);
        assert_eq!(weights.error(), 10);
        assert_eq!(weights.gibberish(), 0);
    }
}
