//! Domain-level errors

use thiserror::Error;

/// Errors raised while validating a chaos configuration
///
/// These are only ever produced at construction time. An engine is never
/// built from a configuration that failed validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// Probability outside of `[0, 1]` (or NaN)
    #[error("Probability must be between 0 and 1, got {0}")]
    InvalidProbability(f64),

    /// Delay range whose minimum exceeds its maximum
    #[error("Delay range min must not exceed max, got [{min}, {max}]")]
    InvalidDelayRange { min: u64, max: u64 },

    /// No error codes configured
    #[error("Error codes must be a non-empty list")]
    EmptyErrorCodes,

    /// Error code that is not a valid HTTP status
    #[error("Invalid HTTP status code: {0}")]
    InvalidStatusCode(u16),

    /// Unparseable `HH:MM` value
    #[error("Invalid time of day: {0}")]
    InvalidTimeOfDay(String),

    /// Window whose start is after its end
    #[error("Time window {start}-{end} crosses midnight, which is not supported")]
    MidnightCrossingWindow { start: String, end: String },

    /// Route pattern that is not a valid regular expression
    #[error("Invalid route pattern '{pattern}': {reason}")]
    InvalidRoutePattern { pattern: String, reason: String },

    /// Preset name that is not in the lookup table
    #[error("Unknown chaos preset: {0}")]
    UnknownPreset(String),

    /// Custom chaos share outside of `[0, 1]`
    #[error("Custom chaos share must be between 0 and 1, got {0}")]
    InvalidCustomShare(f64),

    /// Custom chaos generator name that is not registered
    #[error("Unknown custom chaos generator: {0}")]
    UnknownCustomChaos(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_probability_message() {
        let err = ConfigurationError::InvalidProbability(1.5);
        assert_eq!(err.to_string(), "Probability must be between 0 and 1, got 1.5");
    }

    #[test]
    fn invalid_delay_range_message() {
        let err = ConfigurationError::InvalidDelayRange {
            min: 2000,
            max: 100,
        };
        assert_eq!(
            err.to_string(),
            "Delay range min must not exceed max, got [2000, 100]"
        );
    }

    #[test]
    fn empty_error_codes_message() {
        assert_eq!(
            ConfigurationError::EmptyErrorCodes.to_string(),
            "Error codes must be a non-empty list"
        );
    }

    #[test]
    fn midnight_window_message() {
        let err = ConfigurationError::MidnightCrossingWindow {
            start: "22:00".to_string(),
            end: "02:00".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Time window 22:00-02:00 crosses midnight, which is not supported"
        );
    }

    #[test]
    fn unknown_preset_message() {
        let err = ConfigurationError::UnknownPreset("banana".to_string());
        assert_eq!(err.to_string(), "Unknown chaos preset: banana");
    }
}
