//! HTTP status codes used for error interventions

use serde::Serialize;

use crate::errors::ConfigurationError;

/// Status codes with a dedicated message pool
///
/// Other valid HTTP statuses are accepted but fall back to the generic pool.
pub const RECOGNIZED_ERROR_CODES: [u16; 9] = [400, 401, 403, 404, 429, 500, 502, 503, 504];

/// Non-empty list of HTTP status codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorCodes(Vec<u16>);

impl ErrorCodes {
    /// Create an error code list with validation
    ///
    /// Duplicates are kept, so repeating a code raises its selection weight.
    ///
    /// # Errors
    ///
    /// Returns `EmptyErrorCodes` for an empty list and `InvalidStatusCode`
    /// for anything outside `100..=599`
    pub fn new(codes: Vec<u16>) -> Result<Self, ConfigurationError> {
        if codes.is_empty() {
            return Err(ConfigurationError::EmptyErrorCodes);
        }
        if let Some(&bad) = codes.iter().find(|code| !(100..=599).contains(*code)) {
            return Err(ConfigurationError::InvalidStatusCode(bad));
        }
        Ok(Self(codes))
    }

    /// All configured codes in order
    #[must_use]
    pub fn as_slice(&self) -> &[u16] {
        &self.0
    }

    /// Number of configured codes (never zero)
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Code at `index`, clamped to the last entry
    #[must_use]
    pub fn at(&self, index: usize) -> u16 {
        let last = self.0.len() - 1;
        self.0[index.min(last)]
    }

    /// Codes that have no dedicated message pool
    #[must_use]
    pub fn unrecognized(&self) -> Vec<u16> {
        self.0
            .iter()
            .copied()
            .filter(|code| !RECOGNIZED_ERROR_CODES.contains(code))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_rejected() {
        assert_eq!(
            ErrorCodes::new(vec![]),
            Err(ConfigurationError::EmptyErrorCodes)
        );
    }

    #[test]
    fn invalid_status_is_rejected() {
        assert_eq!(
            ErrorCodes::new(vec![500, 700]),
            Err(ConfigurationError::InvalidStatusCode(700))
        );
        assert!(ErrorCodes::new(vec![42]).is_err());
    }

    #[test]
    fn at_clamps_index() {
        let codes = ErrorCodes::new(vec![500, 503]).unwrap();
        assert_eq!(codes.at(0), 500);
        assert_eq!(codes.at(1), 503);
        assert_eq!(codes.at(99), 503);
    }

    #[test]
    fn unrecognized_codes_are_reported() {
        let codes = ErrorCodes::new(vec![500, 418, 503, 507]).unwrap();
        assert_eq!(codes.unrecognized(), vec![418, 507]);
        assert_eq!(codes.len(), 4);
        assert!(!codes.is_empty());
    }
}
