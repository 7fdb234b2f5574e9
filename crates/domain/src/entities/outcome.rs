//! The result of a single chaos decision

use serde::Serialize;

use crate::value_objects::{ChaosKind, CorrelationId, GibberishFormat};

/// What a sink adapter should do with a request
///
/// Exactly one variant is produced per decision. Every variant except
/// `None` carries a correlation ID.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outcome {
    /// No intervention
    None,

    /// The request was held back; the wait has already elapsed
    Delay {
        correlation_id: CorrelationId,
        milliseconds: u64,
    },

    /// Answer with an HTTP error instead of calling the handler
    Error {
        correlation_id: CorrelationId,
        status_code: u16,
        message: String,
    },

    /// Answer with a nonsense body instead of calling the handler
    Gibberish {
        correlation_id: CorrelationId,
        format: GibberishFormat,
        body: String,
    },

    /// Produced by a named custom chaos generator
    Custom {
        correlation_id: CorrelationId,
        name: String,
        payload: CustomPayload,
    },
}

impl Outcome {
    /// Whether this outcome is an intervention
    #[must_use]
    pub const fn is_intervention(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Correlation ID of an intervention
    #[must_use]
    pub const fn correlation_id(&self) -> Option<CorrelationId> {
        match self {
            Self::None => None,
            Self::Delay { correlation_id, .. }
            | Self::Error { correlation_id, .. }
            | Self::Gibberish { correlation_id, .. }
            | Self::Custom { correlation_id, .. } => Some(*correlation_id),
        }
    }

    /// Built-in kind, if this is a built-in intervention
    #[must_use]
    pub const fn kind(&self) -> Option<ChaosKind> {
        match self {
            Self::Delay { .. } => Some(ChaosKind::Delay),
            Self::Error { .. } => Some(ChaosKind::Error),
            Self::Gibberish { .. } => Some(ChaosKind::Gibberish),
            Self::None | Self::Custom { .. } => None,
        }
    }

    /// Stable lowercase label for logs and metrics
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Delay { .. } => "delay",
            Self::Error { .. } => "error",
            Self::Gibberish { .. } => "gibberish",
            Self::Custom { .. } => "custom",
        }
    }
}

/// Effect requested by a custom chaos generator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum CustomPayload {
    /// The generator already applied its side effect; pass the request on
    Note {
        message: String,
        details: serde_json::Value,
    },

    /// Answer with an HTTP error
    Fail { status_code: u16, message: String },

    /// Let the handler run, then rewrite its response body
    Transform {
        transform: BodyTransform,
        message: String,
    },
}

impl CustomPayload {
    /// Human-readable description of the effect
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Note { message, .. }
            | Self::Fail { message, .. }
            | Self::Transform { message, .. } => message,
        }
    }
}

/// Rewrite applied to a handler's response body
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodyTransform {
    /// Replace roughly `rate` of the characters with random printable ASCII
    Corrupt { rate: f64 },
    /// Append about `padding_bytes` bytes of padding
    Inflate { padding_bytes: usize },
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn id() -> CorrelationId {
        CorrelationId::from_uuid(Uuid::nil())
    }

    #[test]
    fn none_is_not_an_intervention() {
        assert!(!Outcome::None.is_intervention());
        assert!(Outcome::None.correlation_id().is_none());
        assert_eq!(Outcome::None.label(), "none");
    }

    #[test]
    fn interventions_carry_correlation_id() {
        let outcome = Outcome::Delay {
            correlation_id: id(),
            milliseconds: 10,
        };
        assert!(outcome.is_intervention());
        assert_eq!(outcome.correlation_id(), Some(id()));
        assert_eq!(outcome.kind(), Some(ChaosKind::Delay));
    }

    #[test]
    fn custom_has_no_builtin_kind() {
        let outcome = Outcome::Custom {
            correlation_id: id(),
            name: "network-jitter".to_string(),
            payload: CustomPayload::Note {
                message: "jitter".to_string(),
                details: serde_json::json!({ "jitter_count": 3 }),
            },
        };
        assert_eq!(outcome.kind(), None);
        assert_eq!(outcome.label(), "custom");
    }

    #[test]
    fn outcome_serializes_with_type_tag() {
        let outcome = Outcome::Error {
            correlation_id: id(),
            status_code: 503,
            message: "down".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["status_code"], 503);
    }

    #[test]
    fn payload_message() {
        let payload = CustomPayload::Fail {
            status_code: 503,
            message: "moody".to_string(),
        };
        assert_eq!(payload.message(), "moody");
    }
}
