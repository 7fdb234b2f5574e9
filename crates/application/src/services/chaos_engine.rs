//! Chaos decision engine
//!
//! Decides per request whether to intervene, which intervention to apply and
//! with what parameters, and keeps running statistics of its decisions.

use std::{fmt, sync::Arc, time::Duration};

use domain::{
    BodyTransform, ChaosConfig, ChaosKind, ChaosSettings, ChaosStats, CorrelationId,
    GibberishFormat, Outcome, RequestDescriptor, TimeOfDay, any_window_contains, matches_any,
};
use tracing::{debug, warn};

use super::{
    custom_generators::CustomChaosRegistry,
    outcome_synthesis::{apply_transform, error_message, gibberish_body},
    stats_tracker::StatsTracker,
};
use crate::{
    error::ApplicationError,
    ports::{ChaosEvent, ChaosObserver, Clock, CustomChaos, RandomSource, RandomSourceExt, SkipReason},
};

/// Per-request chaos decisions over an immutable configuration
///
/// Engines are shared through `Arc` and decide concurrently. Only the
/// statistics are mutable, and they are updated under a short lock.
pub struct ChaosEngine {
    config: ChaosConfig,
    random: Arc<dyn RandomSource>,
    clock: Arc<dyn Clock>,
    observer: Option<Arc<dyn ChaosObserver>>,
    generators: Vec<Arc<dyn CustomChaos>>,
    stats: StatsTracker,
    dry_run: bool,
}

impl fmt::Debug for ChaosEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChaosEngine")
            .field("config", &self.config)
            .field("has_observer", &self.observer.is_some())
            .field(
                "generators",
                &self.generators.iter().map(|g| g.name()).collect::<Vec<_>>(),
            )
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

impl ChaosEngine {
    /// Create an engine over a validated configuration
    ///
    /// Custom generators named by the configuration are attached with
    /// [`ChaosEngine::with_custom_chaos`].
    pub fn new(config: ChaosConfig, random: Arc<dyn RandomSource>, clock: Arc<dyn Clock>) -> Self {
        warn_unrecognized_codes(&config);
        Self {
            config,
            random,
            clock,
            observer: None,
            generators: Vec::new(),
            stats: StatsTracker::new(),
            dry_run: false,
        }
    }

    /// Validate raw settings and build an engine with the built-in generators
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the settings are invalid
    /// or name an unknown generator; no engine is produced in that case
    pub fn from_settings(
        settings: ChaosSettings,
        random: Arc<dyn RandomSource>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ApplicationError> {
        let config = ChaosConfig::new(settings)?;
        let engine =
            Self::new(config, random, clock).with_custom_chaos(&CustomChaosRegistry::with_builtins())?;
        Ok(engine)
    }

    /// Attach an observer that receives every decision event
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ChaosObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Resolve the configured custom generators against a registry
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` for unknown generator names
    pub fn with_custom_chaos(mut self, registry: &CustomChaosRegistry) -> Result<Self, ApplicationError> {
        self.generators = match self.config.custom_chaos() {
            Some(custom) => registry.resolve(custom.generators())?,
            None => Vec::new(),
        };
        Ok(self)
    }

    /// Skip the suspension of delay outcomes while still producing them
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The configuration this engine decides with
    #[must_use]
    pub const fn config(&self) -> &ChaosConfig {
        &self.config
    }

    /// Whether delay suspensions are skipped
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Decide what to do with a request
    ///
    /// Never fails. For `Delay` outcomes the returned future completes only
    /// after the delay has elapsed. Statistics are recorded once the outcome
    /// is final, so dropping the future mid-delay records nothing.
    pub async fn decide(&self, request: &RequestDescriptor) -> Outcome {
        self.notify(|| ChaosEvent::DecisionStarted {
            method: request.method().to_string(),
            path: request.path().to_string(),
        });

        let outcome = match self.check_gates(request) {
            Ok(()) => self.intervene(request).await,
            Err(reason) => {
                self.skip(request, reason);
                Outcome::None
            },
        };

        self.stats.record(&outcome);
        outcome
    }

    /// Snapshot of the running statistics
    #[must_use]
    pub fn stats(&self) -> ChaosStats {
        self.stats.snapshot()
    }

    /// Zero the statistics; in-flight decisions are unaffected
    pub fn reset_stats(&self) {
        self.stats.reset();
        debug!("Chaos statistics reset");
    }

    /// Rewrite a response body according to a custom `Transform` payload
    #[must_use]
    pub fn transform_body(&self, body: &[u8], transform: BodyTransform) -> Vec<u8> {
        apply_transform(body, transform, self.random.as_ref())
    }

    fn check_gates(&self, request: &RequestDescriptor) -> Result<(), SkipReason> {
        if !self.config.probability().admits(self.random.next_f64()) {
            return Err(SkipReason::Probability);
        }

        let path = request.path();
        let whitelisted = self
            .config
            .enabled_routes()
            .is_none_or(|routes| matches_any(routes, path));
        let blacklisted = self
            .config
            .disabled_routes()
            .is_some_and(|routes| matches_any(routes, path));
        if !whitelisted || blacklisted {
            return Err(SkipReason::Route);
        }

        if let Some(windows) = self.config.time_windows() {
            let now = TimeOfDay::from_naive(self.clock.local_time());
            if !any_window_contains(windows, now) {
                return Err(SkipReason::TimeWindow);
            }
        }

        Ok(())
    }

    async fn intervene(&self, request: &RequestDescriptor) -> Outcome {
        if let Some(outcome) = self.try_custom(request).await {
            return outcome;
        }

        let weights = self.config.outcome_weights();
        #[allow(clippy::cast_precision_loss)]
        let point = self.random.next_f64() * weights.total() as f64;
        let correlation_id = CorrelationId::new();

        match weights.pick(point) {
            ChaosKind::Delay => self.delay(request, correlation_id).await,
            ChaosKind::Error => self.error(request, correlation_id),
            ChaosKind::Gibberish => self.gibberish(request, correlation_id),
        }
    }

    /// `None` when the custom source is not taken for this request
    async fn try_custom(&self, request: &RequestDescriptor) -> Option<Outcome> {
        let custom = self.config.custom_chaos()?;
        if self.generators.is_empty() || !custom.share().admits(self.random.next_f64()) {
            return None;
        }

        let generator = self.random.pick(&self.generators)?;
        let name = generator.name().to_string();
        match generator.produce(request, self.random.as_ref()).await {
            Some(payload) => {
                let correlation_id = CorrelationId::new();
                self.notify(|| ChaosEvent::CustomChosen {
                    correlation_id,
                    path: request.path().to_string(),
                    name: name.clone(),
                    message: payload.message().to_string(),
                });
                Some(Outcome::Custom {
                    correlation_id,
                    name,
                    payload,
                })
            },
            None => {
                self.skip(request, SkipReason::GeneratorDeclined);
                Some(Outcome::None)
            },
        }
    }

    async fn delay(&self, request: &RequestDescriptor, correlation_id: CorrelationId) -> Outcome {
        let range = self.config.delay_range();
        let milliseconds = self.random.range_inclusive(range.min_ms(), range.max_ms());

        self.notify(|| ChaosEvent::DelayChosen {
            correlation_id,
            path: request.path().to_string(),
            milliseconds,
        });

        if !self.dry_run && milliseconds > 0 {
            tokio::time::sleep(Duration::from_millis(milliseconds)).await;
        }

        Outcome::Delay {
            correlation_id,
            milliseconds,
        }
    }

    fn error(&self, request: &RequestDescriptor, correlation_id: CorrelationId) -> Outcome {
        let codes = self.config.error_codes();
        let status_code = codes.at(self.random.pick_index(codes.len()));
        let message = error_message(status_code, self.random.as_ref());

        self.notify(|| ChaosEvent::ErrorChosen {
            correlation_id,
            path: request.path().to_string(),
            status_code,
            message: message.clone(),
        });

        Outcome::Error {
            correlation_id,
            status_code,
            message,
        }
    }

    fn gibberish(&self, request: &RequestDescriptor, correlation_id: CorrelationId) -> Outcome {
        let format = GibberishFormat::ALL[self.random.pick_index(GibberishFormat::ALL.len())];
        let body = gibberish_body(format, self.random.as_ref());

        self.notify(|| ChaosEvent::GibberishChosen {
            correlation_id,
            path: request.path().to_string(),
            format,
        });

        Outcome::Gibberish {
            correlation_id,
            format,
            body,
        }
    }

    fn skip(&self, request: &RequestDescriptor, reason: SkipReason) {
        self.notify(|| ChaosEvent::Skipped {
            path: request.path().to_string(),
            reason,
        });
    }

    /// Events are only built when someone listens
    fn notify(&self, event: impl FnOnce() -> ChaosEvent) {
        if let Some(observer) = &self.observer {
            observer.on_event(&event());
        }
    }
}

/// Log configured error codes that have no dedicated message pool
fn warn_unrecognized_codes(config: &ChaosConfig) {
    let unrecognized = config.error_codes().unrecognized();
    if !unrecognized.is_empty() {
        warn!(
            codes = ?unrecognized,
            "Unrecognized error codes configured, generic messages will be used"
        );
    }
}
