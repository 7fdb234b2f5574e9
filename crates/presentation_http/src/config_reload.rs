//! Hot-reloadable chaos engine
//!
//! Provides SIGHUP signal handling that reloads the configuration and swaps
//! in a freshly built engine without restarting the server. Requests that
//! are already being decided keep the engine they started with.

use std::sync::Arc;

use application::{ApplicationError, ChaosEngine};
use arc_swap::ArcSwap;
use infrastructure::{AppConfig, EngineOptions, build_engine};
use tokio::sync::watch;
use tracing::{error, info, warn};

/// A configuration together with the engine built from it
#[derive(Debug)]
pub struct ChaosRuntime {
    /// Configuration the engine was built from
    pub config: AppConfig,
    /// Engine serving decisions
    pub engine: Arc<ChaosEngine>,
}

/// Configuration and engine that are replaced together, atomically
#[derive(Debug, Clone)]
pub struct ReloadableChaos {
    inner: Arc<ArcSwap<ChaosRuntime>>,
    options: EngineOptions,
    /// Notifier for reload events
    notify: watch::Sender<u64>,
    /// Receiver for reload events
    receiver: watch::Receiver<u64>,
}

impl ReloadableChaos {
    /// Wrap an already built engine
    #[must_use]
    pub fn new(config: AppConfig, engine: ChaosEngine) -> Self {
        let (notify, receiver) = watch::channel(0);
        Self {
            inner: Arc::new(ArcSwap::from_pointee(ChaosRuntime {
                config,
                engine: Arc::new(engine),
            })),
            options: EngineOptions::default(),
            notify,
            receiver,
        }
    }

    /// Build the engine described by `config`
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` when the chaos section is
    /// invalid
    pub fn from_config(config: AppConfig, options: EngineOptions) -> Result<Self, ApplicationError> {
        let engine = build_engine(&config.chaos, options)?;
        let mut reloadable = Self::new(config, engine);
        reloadable.options = options;
        Ok(reloadable)
    }

    /// Current configuration and engine
    #[must_use]
    pub fn load(&self) -> Arc<ChaosRuntime> {
        self.inner.load_full()
    }

    /// Current engine
    #[must_use]
    pub fn engine(&self) -> Arc<ChaosEngine> {
        Arc::clone(&self.inner.load().engine)
    }

    /// Replace configuration and engine
    ///
    /// Nothing changes when the new configuration is invalid. Statistics
    /// start over with the new engine.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` when the chaos section is
    /// invalid
    pub fn apply(&self, config: AppConfig) -> Result<(), ApplicationError> {
        let engine = build_engine(&config.chaos, self.options)?;
        let old = self.inner.swap(Arc::new(ChaosRuntime {
            config,
            engine: Arc::new(engine),
        }));
        info!(
            old_preset = old.config.chaos.preset.as_deref().unwrap_or("none"),
            old_total_requests = old.engine.stats().total_requests,
            "Chaos engine replaced"
        );

        let version = *self.notify.borrow() + 1;
        if self.notify.send(version).is_err() {
            warn!("No reload receivers active");
        }
        Ok(())
    }

    /// Reload configuration from disk and environment
    ///
    /// Returns `true` if the reload was successful
    pub fn reload(&self) -> bool {
        match AppConfig::load().and_then(|config| self.apply(config)) {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to reload configuration: {}", e);
                false
            },
        }
    }

    /// Subscribe to reload notifications
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.receiver.clone()
    }
}

/// Spawn a background task that listens for SIGHUP and reloads the engine
#[cfg(unix)]
pub fn spawn_config_reload_handler(chaos: ReloadableChaos) -> ReloadableChaos {
    use tokio::signal::unix::{SignalKind, signal};

    let chaos_clone = chaos.clone();
    tokio::spawn(async move {
        let mut sighup = match signal(SignalKind::hangup()) {
            Ok(s) => s,
            Err(e) => {
                error!("Failed to install SIGHUP handler: {}", e);
                return;
            },
        };

        loop {
            sighup.recv().await;
            info!("📥 Received SIGHUP, reloading configuration...");
            if chaos_clone.reload() {
                info!("✅ Chaos engine reload complete");
            } else {
                warn!("⚠️ Configuration reload failed, keeping previous engine");
            }
        }
    });

    chaos
}

/// No-op on non-Unix systems
#[cfg(not(unix))]
pub fn spawn_config_reload_handler(chaos: ReloadableChaos) -> ReloadableChaos {
    warn!("SIGHUP config reload not supported on this platform");
    chaos
}
