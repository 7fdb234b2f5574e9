//! Chaos statistics and configuration handlers
//!
//! These routes are never wrapped by the chaos layer, so they stay
//! reliable while the demo API misbehaves.

use axum::{Json, extract::State};
use domain::{ChaosSettings, StatsReport};
use serde::Serialize;
use tracing::info;

use crate::state::AppState;

/// Current statistics of the active engine
pub async fn get_stats(State(state): State<AppState>) -> Json<StatsReport> {
    Json(state.chaos.engine().stats().report())
}

/// Response to a statistics reset
#[derive(Debug, Clone, Serialize)]
pub struct ResetResponse {
    pub message: String,
    /// Statistics right after the reset
    pub stats: StatsReport,
}

/// Zero the statistics of the active engine
pub async fn reset_stats(State(state): State<AppState>) -> Json<ResetResponse> {
    let engine = state.chaos.engine();
    engine.reset_stats();
    info!("🧹 Chaos statistics reset");

    Json(ResetResponse {
        message: "Chaos statistics reset".to_string(),
        stats: engine.stats().report(),
    })
}

/// Effective chaos configuration
#[derive(Debug, Clone, Serialize)]
pub struct ConfigResponse {
    pub enabled: bool,
    pub preset: Option<String>,
    pub dry_run: bool,
    /// Validated settings the engine runs with
    pub settings: ChaosSettings,
}

/// The configuration of the active engine, after preset merging
pub async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    let runtime = state.chaos.load();
    Json(ConfigResponse {
        enabled: runtime.config.chaos.enabled,
        preset: runtime.config.chaos.preset.clone(),
        dry_run: runtime.engine.is_dry_run(),
        settings: runtime.engine.config().to_settings(),
    })
}
