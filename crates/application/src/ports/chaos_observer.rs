//! Observer port for decision events
//!
//! The engine calls the observer synchronously at a fixed set of points.
//! Implementations must be cheap; they run on the request path.

use domain::{CorrelationId, GibberishFormat};
#[cfg(test)]
use mockall::automock;
use serde::Serialize;

/// Why a decision ended without an intervention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The probability draw did not admit the request
    Probability,
    /// The path is not whitelisted or is blacklisted
    Route,
    /// The local time is outside every configured window
    TimeWindow,
    /// A custom generator was chosen but produced nothing
    GeneratorDeclined,
}

impl SkipReason {
    /// Stable identifier for logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Probability => "probability",
            Self::Route => "route",
            Self::TimeWindow => "time_window",
            Self::GeneratorDeclined => "generator_declined",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Events emitted during a decision
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ChaosEvent {
    /// A decision began for a request
    DecisionStarted { method: String, path: String },
    /// A gate rejected the request
    Skipped { path: String, reason: SkipReason },
    /// A delay was chosen; emitted before the suspension
    DelayChosen {
        correlation_id: CorrelationId,
        path: String,
        milliseconds: u64,
    },
    /// An error response was chosen
    ErrorChosen {
        correlation_id: CorrelationId,
        path: String,
        status_code: u16,
        message: String,
    },
    /// A gibberish body was chosen
    GibberishChosen {
        correlation_id: CorrelationId,
        path: String,
        format: GibberishFormat,
    },
    /// A custom generator produced a payload
    CustomChosen {
        correlation_id: CorrelationId,
        path: String,
        name: String,
        message: String,
    },
}

/// Receiver of decision events
#[cfg_attr(test, automock)]
pub trait ChaosObserver: Send + Sync {
    /// Handle a single event
    fn on_event(&self, event: &ChaosEvent);
}
