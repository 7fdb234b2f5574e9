//! Logging infrastructure
//!
//! Installs the `tracing` subscriber used by both binaries.

mod subscriber;

pub use subscriber::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
