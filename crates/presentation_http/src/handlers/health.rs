//! Health check handler

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Whether the chaos layer is currently active
    pub chaos_enabled: bool,
}

/// Liveness check - is the server running?
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        chaos_enabled: state.chaos.load().config.chaos.enabled,
    })
}

#[cfg(test)]
mod tests {
    use infrastructure::{AppConfig, EngineOptions};

    use super::*;
    use crate::config_reload::ReloadableChaos;

    #[test]
    fn health_response_serialization() {
        let resp = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
            chaos_enabled: true,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"chaos_enabled\":true"));
    }

    #[test]
    fn health_response_deserialization() {
        let json = r#"{"status":"ok","version":"0.1.0","chaos_enabled":false}"#;
        let resp: HealthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.status, "ok");
        assert!(!resp.chaos_enabled);
    }

    #[tokio::test]
    async fn health_check_reports_switch() {
        let mut config = AppConfig::default();
        config.chaos.enabled = false;
        let chaos = ReloadableChaos::from_config(config, EngineOptions::default()).unwrap();

        let Json(response) = health_check(State(AppState::new(chaos))).await;
        assert_eq!(response.status, "ok");
        assert!(!response.version.is_empty());
        assert!(!response.chaos_enabled);
    }
}
