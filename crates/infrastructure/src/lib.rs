//! Infrastructure layer - Adapters and configuration loading
//!
//! Implements the ports defined in the application layer, loads the
//! application configuration and initialises logging.

pub mod adapters;
pub mod config;
pub mod engine_factory;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, ChaosAppConfig, ENV_PREFIX, ServerConfig};
pub use engine_factory::{EngineOptions, build_engine, build_engine_with_registry};
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
