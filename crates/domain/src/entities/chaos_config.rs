//! Chaos configuration: raw settings and their validated form

use serde::{Deserialize, Serialize};

use super::Preset;
use crate::{
    errors::ConfigurationError,
    value_objects::{
        DelayRange, ErrorCodes, OutcomeWeights, Probability, RouteMatcher, RouteSpec, TimeWindow,
        TimeWindowSpec,
    },
};

/// Share of interventions handed to custom generators when none is configured
pub const DEFAULT_CUSTOM_SHARE: f64 = 0.25;

const fn default_custom_share() -> f64 {
    DEFAULT_CUSTOM_SHARE
}

/// Custom chaos generators selected by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomChaosSpec {
    /// Probability, once all gates pass, that a custom generator is used
    /// instead of the built-in weighted selection
    #[serde(default = "default_custom_share")]
    pub share: f64,

    /// Registered generator names
    #[serde(default)]
    pub generators: Vec<String>,
}

/// Unvalidated chaos settings as written in configuration or presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaosSettings {
    /// Fraction of eligible requests that receive an intervention
    pub probability: f64,

    /// `[min, max]` injected latency in milliseconds
    pub delay_range: (u64, u64),

    /// HTTP status codes used for error interventions
    pub error_codes: Vec<u16>,

    /// Relative weights of delay, error and gibberish
    pub outcome_weights: OutcomeWeights,

    /// Whitelist of routes eligible for chaos
    pub enabled_routes: Option<Vec<RouteSpec>>,

    /// Routes never touched, overriding the whitelist
    pub disabled_routes: Option<Vec<RouteSpec>>,

    /// Local wall-clock windows in which chaos is allowed
    pub time_windows: Option<Vec<TimeWindowSpec>>,

    /// Named custom generators
    pub custom_chaos: Option<CustomChaosSpec>,

    /// Whether decisions are logged
    pub logging: bool,
}

impl Default for ChaosSettings {
    fn default() -> Self {
        Self {
            probability: 0.2,
            delay_range: (100, 2000),
            error_codes: vec![500, 503],
            outcome_weights: OutcomeWeights::DEFAULT,
            enabled_routes: None,
            disabled_routes: None,
            time_windows: None,
            custom_chaos: None,
            logging: false,
        }
    }
}

/// Validated custom generator selection
#[derive(Debug, Clone, PartialEq)]
pub struct CustomChaosSettings {
    share: Probability,
    generators: Vec<String>,
}

impl CustomChaosSettings {
    /// Probability that an intervention is delegated to a custom generator
    #[must_use]
    pub const fn share(&self) -> Probability {
        self.share
    }

    /// Generator names, in configuration order
    #[must_use]
    pub fn generators(&self) -> &[String] {
        &self.generators
    }
}

/// A fully validated chaos configuration
///
/// Immutable once built; engines read it without synchronization.
#[derive(Debug, Clone)]
pub struct ChaosConfig {
    probability: Probability,
    delay_range: DelayRange,
    error_codes: ErrorCodes,
    outcome_weights: OutcomeWeights,
    enabled_routes: Option<Vec<RouteMatcher>>,
    disabled_routes: Option<Vec<RouteMatcher>>,
    time_windows: Option<Vec<TimeWindow>>,
    custom_chaos: Option<CustomChaosSettings>,
    logging: bool,
}

impl ChaosConfig {
    /// Validate settings into a configuration
    ///
    /// All fields are checked before anything is returned, so a failing
    /// configuration is never partially applied.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigurationError` encountered
    pub fn new(settings: ChaosSettings) -> Result<Self, ConfigurationError> {
        let probability = Probability::new(settings.probability)?;
        let delay_range = DelayRange::new(settings.delay_range.0, settings.delay_range.1)?;
        let error_codes = ErrorCodes::new(settings.error_codes)?;

        let enabled_routes = settings
            .enabled_routes
            .as_deref()
            .map(compile_routes)
            .transpose()?;
        let disabled_routes = settings
            .disabled_routes
            .as_deref()
            .map(compile_routes)
            .transpose()?;
        let time_windows = settings
            .time_windows
            .as_deref()
            .map(|specs| specs.iter().map(TimeWindow::from_spec).collect())
            .transpose()?;

        let custom_chaos = match settings.custom_chaos {
            Some(spec) if !spec.generators.is_empty() => Some(CustomChaosSettings {
                share: Probability::new(spec.share)
                    .map_err(|_| ConfigurationError::InvalidCustomShare(spec.share))?,
                generators: spec.generators,
            }),
            _ => None,
        };

        Ok(Self {
            probability,
            delay_range,
            error_codes,
            outcome_weights: settings.outcome_weights,
            enabled_routes,
            disabled_routes,
            time_windows,
            custom_chaos,
            logging: settings.logging,
        })
    }

    /// Build the configuration of a preset
    ///
    /// # Errors
    ///
    /// Presets are valid by construction; an error here is a bug in the table
    pub fn from_preset(preset: Preset) -> Result<Self, ConfigurationError> {
        Self::new(preset.settings())
    }

    /// Intervention probability
    #[must_use]
    pub const fn probability(&self) -> Probability {
        self.probability
    }

    /// Delay bounds
    #[must_use]
    pub const fn delay_range(&self) -> DelayRange {
        self.delay_range
    }

    /// Error status codes
    #[must_use]
    pub const fn error_codes(&self) -> &ErrorCodes {
        &self.error_codes
    }

    /// Built-in kind weights
    #[must_use]
    pub const fn outcome_weights(&self) -> OutcomeWeights {
        self.outcome_weights
    }

    /// Route whitelist, if any
    #[must_use]
    pub fn enabled_routes(&self) -> Option<&[RouteMatcher]> {
        self.enabled_routes.as_deref()
    }

    /// Route blacklist, if any
    #[must_use]
    pub fn disabled_routes(&self) -> Option<&[RouteMatcher]> {
        self.disabled_routes.as_deref()
    }

    /// Time windows, if any
    #[must_use]
    pub fn time_windows(&self) -> Option<&[TimeWindow]> {
        self.time_windows.as_deref()
    }

    /// Custom generator selection, if any
    #[must_use]
    pub const fn custom_chaos(&self) -> Option<&CustomChaosSettings> {
        self.custom_chaos.as_ref()
    }

    /// Whether decisions should be logged
    #[must_use]
    pub const fn logging(&self) -> bool {
        self.logging
    }

    /// Convert back into settings, e.g. for display
    #[must_use]
    pub fn to_settings(&self) -> ChaosSettings {
        ChaosSettings {
            probability: self.probability.value(),
            delay_range: (self.delay_range.min_ms(), self.delay_range.max_ms()),
            error_codes: self.error_codes.as_slice().to_vec(),
            outcome_weights: self.outcome_weights,
            enabled_routes: self
                .enabled_routes
                .as_ref()
                .map(|routes| routes.iter().map(RouteMatcher::to_spec).collect()),
            disabled_routes: self
                .disabled_routes
                .as_ref()
                .map(|routes| routes.iter().map(RouteMatcher::to_spec).collect()),
            time_windows: self
                .time_windows
                .as_ref()
                .map(|windows| windows.iter().map(TimeWindow::to_spec).collect()),
            custom_chaos: self.custom_chaos.as_ref().map(|custom| CustomChaosSpec {
                share: custom.share.value(),
                generators: custom.generators.clone(),
            }),
            logging: self.logging,
        }
    }
}

impl TryFrom<ChaosSettings> for ChaosConfig {
    type Error = ConfigurationError;

    fn try_from(settings: ChaosSettings) -> Result<Self, Self::Error> {
        Self::new(settings)
    }
}

fn compile_routes(specs: &[RouteSpec]) -> Result<Vec<RouteMatcher>, ConfigurationError> {
    specs.iter().map(RouteMatcher::from_spec).collect()
}
