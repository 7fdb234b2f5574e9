//! Named chaos presets

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::ChaosSettings;
use crate::{
    errors::ConfigurationError,
    value_objects::{OutcomeWeights, TimeWindowSpec},
};

/// Built-in configuration presets, from barely noticeable to hostile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Occasional short delays
    Mild,
    /// Frequent delays and errors
    Wild,
    /// Most requests are disrupted
    Extreme,
    /// Conservative starting point for hand-tuned configurations
    Custom,
    /// Heavy chaos restricted to a time window
    Scheduled,
    /// Slow, flaky upstream network
    NetworkLike,
}

impl Preset {
    /// Canonical preset name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Wild => "wild",
            Self::Extreme => "extreme",
            Self::Custom => "custom",
            Self::Scheduled => "scheduled",
            Self::NetworkLike => "network-like",
        }
    }

    /// Short human-readable description
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Mild => "10% of requests, mostly short delays",
            Self::Wild => "30% of requests, delays and server errors",
            Self::Extreme => "70% of requests, long delays and a wide range of errors",
            Self::Custom => "20% of requests, quiet defaults to start tuning from",
            Self::Scheduled => "50% of requests inside the configured time window",
            Self::NetworkLike => "40% of requests, long timeouts and gateway errors",
        }
    }

    /// All presets in table order
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::Mild,
            Self::Wild,
            Self::Extreme,
            Self::Custom,
            Self::Scheduled,
            Self::NetworkLike,
        ]
    }

    /// Settings described by this preset
    #[must_use]
    pub fn settings(&self) -> ChaosSettings {
        match self {
            Self::Mild => ChaosSettings {
                probability: 0.1,
                delay_range: (100, 1000),
                error_codes: vec![500],
                outcome_weights: OutcomeWeights::new(70, 20, 10),
                logging: true,
                ..ChaosSettings::default()
            },
            Self::Wild => ChaosSettings {
                probability: 0.3,
                delay_range: (500, 3000),
                error_codes: vec![500, 503, 502],
                outcome_weights: OutcomeWeights::new(50, 30, 20),
                logging: true,
                ..ChaosSettings::default()
            },
            Self::Extreme => ChaosSettings {
                probability: 0.7,
                delay_range: (1000, 10_000),
                error_codes: vec![500, 503, 502, 429, 404],
                outcome_weights: OutcomeWeights::new(40, 40, 20),
                logging: true,
                ..ChaosSettings::default()
            },
            Self::Custom => ChaosSettings {
                probability: 0.2,
                delay_range: (200, 2000),
                error_codes: vec![500, 503],
                outcome_weights: OutcomeWeights::DEFAULT,
                logging: false,
                ..ChaosSettings::default()
            },
            Self::Scheduled => ChaosSettings {
                probability: 0.5,
                delay_range: (2000, 8000),
                error_codes: vec![503, 502],
                outcome_weights: OutcomeWeights::new(30, 50, 20),
                time_windows: Some(vec![TimeWindowSpec::new("00:00", "23:59")]),
                logging: true,
                ..ChaosSettings::default()
            },
            Self::NetworkLike => ChaosSettings {
                probability: 0.4,
                delay_range: (3000, 15_000),
                error_codes: vec![502, 503, 504],
                outcome_weights: OutcomeWeights::new(60, 35, 5),
                logging: true,
                ..ChaosSettings::default()
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Preset {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mild" => Ok(Self::Mild),
            "wild" => Ok(Self::Wild),
            "extreme" | "ape-pocalypse" => Ok(Self::Extreme),
            "custom" => Ok(Self::Custom),
            "scheduled" | "weekend" => Ok(Self::Scheduled),
            "network-like" | "network" => Ok(Self::NetworkLike),
            other => Err(ConfigurationError::UnknownPreset(other.to_string())),
        }
    }
}
