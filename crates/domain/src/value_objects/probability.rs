//! Probability value object

use std::fmt;

use serde::Serialize;

use crate::errors::ConfigurationError;

/// A probability in the closed interval `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Probability(f64);

impl Probability {
    /// Never
    pub const ZERO: Self = Self(0.0);

    /// Always
    pub const ONE: Self = Self(1.0);

    /// Create a probability with validation
    ///
    /// # Errors
    ///
    /// Returns `InvalidProbability` if the value is outside `[0, 1]` or NaN
    pub fn new(value: f64) -> Result<Self, ConfigurationError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConfigurationError::InvalidProbability(value))
        }
    }

    /// Get the raw value
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Whether a uniform draw from `[0, 1)` falls inside this probability
    ///
    /// The comparison is strict, so `ZERO` admits nothing and `ONE` admits
    /// every draw.
    #[must_use]
    pub fn admits(self, roll: f64) -> bool {
        roll < self.0
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for Probability {
    type Error = ConfigurationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert!(Probability::new(0.0).is_ok());
        assert!(Probability::new(1.0).is_ok());
        assert!(Probability::new(0.42).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            Probability::new(1.5),
            Err(ConfigurationError::InvalidProbability(1.5))
        );
        assert!(Probability::new(-0.1).is_err());
    }

    #[test]
    fn rejects_nan() {
        assert!(Probability::new(f64::NAN).is_err());
    }

    #[test]
    fn zero_admits_nothing() {
        assert!(!Probability::ZERO.admits(0.0));
        assert!(!Probability::ZERO.admits(0.5));
    }

    #[test]
    fn one_admits_everything_below_one() {
        assert!(Probability::ONE.admits(0.0));
        assert!(Probability::ONE.admits(0.999_999));
    }

    #[test]
    fn admits_is_strict() {
        let p = Probability::new(0.3).unwrap();
        assert!(p.admits(0.299));
        assert!(!p.admits(0.3));
    }
}
