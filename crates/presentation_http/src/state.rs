//! Application state shared across handlers

use crate::config_reload::ReloadableChaos;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current configuration and chaos engine, replaced on reload
    pub chaos: ReloadableChaos,
}

impl AppState {
    /// Create state around a reloadable engine
    #[must_use]
    pub const fn new(chaos: ReloadableChaos) -> Self {
        Self { chaos }
    }
}
