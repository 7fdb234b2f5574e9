//! Observer that writes decision events as `tracing` events

use application::ports::{ChaosEvent, ChaosObserver};
use tracing::{debug, info};

/// Structured logger for chaos decisions
///
/// Starts and skips go to `debug`, interventions to `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ChaosObserver for TracingObserver {
    fn on_event(&self, event: &ChaosEvent) {
        match event {
            ChaosEvent::DecisionStarted { method, path } => {
                debug!(%method, %path, "Chaos decision started");
            },
            ChaosEvent::Skipped { path, reason } => {
                debug!(%path, %reason, "Chaos skipped");
            },
            ChaosEvent::DelayChosen {
                correlation_id,
                path,
                milliseconds,
            } => {
                info!(%correlation_id, %path, delay_ms = milliseconds, "🐒⏰ Chaos delay injected");
            },
            ChaosEvent::ErrorChosen {
                correlation_id,
                path,
                status_code,
                message,
            } => {
                info!(%correlation_id, %path, status_code, %message, "🐒💥 Chaos error injected");
            },
            ChaosEvent::GibberishChosen {
                correlation_id,
                path,
                format,
            } => {
                info!(%correlation_id, %path, %format, "🐒🎭 Chaos gibberish served");
            },
            ChaosEvent::CustomChosen {
                correlation_id,
                path,
                name,
                message,
            } => {
                info!(%correlation_id, %path, generator = %name, %message, "🐒🔧 Custom chaos applied");
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use application::ports::SkipReason;
    use domain::{CorrelationId, GibberishFormat};

    use super::*;

    #[test]
    fn handles_every_event_without_subscriber() {
        let observer = TracingObserver;
        let correlation_id = CorrelationId::new();
        let events = [
            ChaosEvent::DecisionStarted {
                method: "GET".to_string(),
                path: "/api".to_string(),
            },
            ChaosEvent::Skipped {
                path: "/api".to_string(),
                reason: SkipReason::Route,
            },
            ChaosEvent::DelayChosen {
                correlation_id,
                path: "/api".to_string(),
                milliseconds: 10,
            },
            ChaosEvent::ErrorChosen {
                correlation_id,
                path: "/api".to_string(),
                status_code: 503,
                message: "down".to_string(),
            },
            ChaosEvent::GibberishChosen {
                correlation_id,
                path: "/api".to_string(),
                format: GibberishFormat::Json,
            },
            ChaosEvent::CustomChosen {
                correlation_id,
                path: "/api".to_string(),
                name: "cpu-spike".to_string(),
                message: "spike".to_string(),
            },
        ];
        for event in &events {
            observer.on_event(event);
        }
    }
}
