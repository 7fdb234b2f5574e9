//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `chaos`: preset selection and chaos overrides
//!
//! Telemetry settings live next to their initialisation in `telemetry`.

mod chaos;
mod server;

use std::path::Path;

use application::ApplicationError;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use chaos::ChaosAppConfig;
pub use server::ServerConfig;

use crate::telemetry::TelemetryConfig;

/// Prefix of environment variables, e.g. `CHAOS_MONKEY_CHAOS__PRESET=wild`
pub const ENV_PREFIX: &str = "CHAOS_MONKEY";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Chaos configuration
    #[serde(default)]
    pub chaos: ChaosAppConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment and an optional `config.toml`
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from("config", false)
    }

    /// Load configuration from a specific file plus environment
    ///
    /// The file name may omit its extension. Environment variables override
    /// file values (e.g. `CHAOS_MONKEY_SERVER__PORT=8080`).
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::ConfigLoad` when the file is required but
    /// missing, or when any source fails to parse
    pub fn load_from(path: impl AsRef<Path>, required: bool) -> Result<Self, ApplicationError> {
        let path = path.as_ref();
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")
            .and_then(|b| b.set_default("server.port", 3000))
            .map_err(load_error)?
            // Load from file if exists
            .add_source(config::File::from(path).required(required))
            // Override with environment variables
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("chaos.error_codes")
                    .try_parsing(true),
            );

        let config: Self = builder
            .build()
            .and_then(config::Config::try_deserialize)
            .map_err(load_error)?;

        debug!(path = %path.display(), preset = ?config.chaos.preset, "Configuration loaded");
        Ok(config)
    }
}

fn load_error(err: config::ConfigError) -> ApplicationError {
    ApplicationError::ConfigLoad(err.to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use domain::Preset;

    use super::*;
    use crate::telemetry::LogFormat;

    #[test]
    fn default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert!(config.chaos.enabled);
        assert!(config.chaos.preset.is_none());
        assert_eq!(config.telemetry.log_format, LogFormat::Text);
    }

    #[test]
    fn load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 8088
capture_body = true

[chaos]
preset = "wild"
seed = 7
probability = 0.5

[telemetry]
log_format = "json"
"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path(), true).unwrap();
        assert_eq!(config.server.port, 8088);
        assert!(config.server.capture_body);
        assert_eq!(config.chaos.preset().unwrap(), Some(Preset::Wild));
        assert_eq!(config.chaos.seed, Some(7));
        assert_eq!(config.chaos.probability, Some(0.5));
        assert_eq!(config.telemetry.log_format, LogFormat::Json);
    }

    #[test]
    fn missing_required_file_fails() {
        let result = AppConfig::load_from("/definitely/not/here.toml", true);
        assert!(matches!(result, Err(ApplicationError::ConfigLoad(_))));
    }

    #[test]
    fn missing_optional_file_uses_defaults() {
        let config = AppConfig::load_from("/definitely/not/here.toml", false).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn malformed_file_fails() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[chaos\nprobability = ").unwrap();
        let result = AppConfig::load_from(file.path(), true);
        assert!(matches!(result, Err(ApplicationError::ConfigLoad(_))));
    }

    #[test]
    fn serialization_roundtrip() {
        let config = AppConfig {
            chaos: ChaosAppConfig::with_preset(Preset::NetworkLike),
            ..AppConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
