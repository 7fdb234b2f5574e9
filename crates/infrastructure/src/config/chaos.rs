//! Chaos configuration as loaded from file and environment
//!
//! Every field is an optional override. The base is either a named preset
//! or the built-in defaults; overrides are applied on top.

use domain::{
    ChaosConfig, ChaosSettings, ConfigurationError, CustomChaosSpec, OutcomeWeights, Preset,
    RouteSpec, TimeWindowSpec,
};
use serde::{Deserialize, Serialize};

use super::default_true;

/// Chaos section of the application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChaosAppConfig {
    /// Master switch; when false the chaos layer passes everything through
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Named preset used as the base (e.g. "mild", "wild", "network-like")
    #[serde(default)]
    pub preset: Option<String>,

    /// Seed for reproducible runs
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub probability: Option<f64>,

    #[serde(default)]
    pub delay_range: Option<(u64, u64)>,

    #[serde(default)]
    pub error_codes: Option<Vec<u16>>,

    #[serde(default)]
    pub outcome_weights: Option<OutcomeWeights>,

    #[serde(default)]
    pub enabled_routes: Option<Vec<RouteSpec>>,

    #[serde(default)]
    pub disabled_routes: Option<Vec<RouteSpec>>,

    #[serde(default)]
    pub time_windows: Option<Vec<TimeWindowSpec>>,

    #[serde(default)]
    pub custom_chaos: Option<CustomChaosSpec>,

    /// Attach the tracing observer
    #[serde(default)]
    pub logging: Option<bool>,
}

impl Default for ChaosAppConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            preset: None,
            seed: None,
            probability: None,
            delay_range: None,
            error_codes: None,
            outcome_weights: None,
            enabled_routes: None,
            disabled_routes: None,
            time_windows: None,
            custom_chaos: None,
            logging: None,
        }
    }
}

impl ChaosAppConfig {
    /// Configuration that only selects a preset
    #[must_use]
    pub fn with_preset(preset: Preset) -> Self {
        Self {
            preset: Some(preset.name().to_string()),
            ..Self::default()
        }
    }

    /// The selected preset, if any
    ///
    /// # Errors
    ///
    /// Returns `UnknownPreset` for a name that is not in the preset table
    pub fn preset(&self) -> Result<Option<Preset>, ConfigurationError> {
        self.preset.as_deref().map(str::parse).transpose()
    }

    /// Merge overrides over the preset (or defaults) into raw settings
    ///
    /// # Errors
    ///
    /// Returns `UnknownPreset` for a name that is not in the preset table
    pub fn to_settings(&self) -> Result<ChaosSettings, ConfigurationError> {
        let base = self
            .preset()?
            .map_or_else(ChaosSettings::default, |preset| preset.settings());

        Ok(ChaosSettings {
            probability: self.probability.unwrap_or(base.probability),
            delay_range: self.delay_range.unwrap_or(base.delay_range),
            error_codes: self.error_codes.clone().unwrap_or(base.error_codes),
            outcome_weights: self.outcome_weights.unwrap_or(base.outcome_weights),
            enabled_routes: self.enabled_routes.clone().or(base.enabled_routes),
            disabled_routes: self.disabled_routes.clone().or(base.disabled_routes),
            time_windows: self.time_windows.clone().or(base.time_windows),
            custom_chaos: self.custom_chaos.clone().or(base.custom_chaos),
            logging: self.logging.unwrap_or(base.logging),
        })
    }

    /// Merge and validate in one step
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigurationError` found
    pub fn to_chaos_config(&self) -> Result<ChaosConfig, ConfigurationError> {
        ChaosConfig::new(self.to_settings()?)
    }
}
