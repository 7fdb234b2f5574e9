//! Application-level errors

use domain::ConfigurationError;
use thiserror::Error;

/// Errors that can occur while assembling a chaos engine
///
/// `ChaosEngine::decide` itself never fails; these errors only surface
/// while configuration is loaded and validated.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Invalid chaos configuration
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Configuration source could not be read or parsed
    #[error("Failed to load configuration: {0}")]
    ConfigLoad(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Whether the error came from validating chaos settings
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
