//! Assembles chaos engines from application configuration

use std::sync::Arc;

use application::{ApplicationError, ChaosEngine, CustomChaosRegistry};
use tracing::info;

use crate::{
    adapters::{StdRandomSource, SystemClock, TracingObserver},
    config::ChaosAppConfig,
};

/// Options that are not part of the chaos configuration itself
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineOptions {
    /// Produce delays without waiting them out
    pub dry_run: bool,
    /// Overrides the configured seed
    pub seed: Option<u64>,
}

/// Build an engine with the system clock, a `rand` source and the
/// built-in custom generators
///
/// # Errors
///
/// Returns `ApplicationError::Configuration` when the merged settings are
/// invalid; no engine is produced in that case
pub fn build_engine(
    config: &ChaosAppConfig,
    options: EngineOptions,
) -> Result<ChaosEngine, ApplicationError> {
    build_engine_with_registry(config, options, &CustomChaosRegistry::with_builtins())
}

/// Like [`build_engine`], resolving custom generators in `registry`
pub fn build_engine_with_registry(
    config: &ChaosAppConfig,
    options: EngineOptions,
    registry: &CustomChaosRegistry,
) -> Result<ChaosEngine, ApplicationError> {
    let chaos_config = config.to_chaos_config()?;
    let seed = options.seed.or(config.seed);
    let logging = chaos_config.logging();

    info!(
        preset = config.preset.as_deref().unwrap_or("none"),
        probability = %chaos_config.probability(),
        delay_range = %chaos_config.delay_range(),
        seeded = seed.is_some(),
        dry_run = options.dry_run,
        "🐒 Chaos engine configured"
    );

    let mut engine = ChaosEngine::new(
        chaos_config,
        Arc::new(StdRandomSource::new(seed)),
        Arc::new(SystemClock),
    )
    .with_custom_chaos(registry)?
    .with_dry_run(options.dry_run);

    if logging {
        engine = engine.with_observer(Arc::new(TracingObserver));
    }

    Ok(engine)
}
