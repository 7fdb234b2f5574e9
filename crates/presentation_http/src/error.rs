//! API error handling
//!
//! Two response shapes live here: `ApiError` for failures of the server's
//! own endpoints, and the chaos error body written when the engine decides
//! to fail a request.

use application::ApplicationError;
use axum::{
    Json,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use domain::CorrelationId;
use serde::Serialize;
use thiserror::Error;

/// Response header naming the correlation ID of an intervention
pub const CHAOS_ID_HEADER: &str = "x-chaos-id";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            },
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Configuration(e) => Self::BadRequest(e.to_string()),
            ApplicationError::ConfigLoad(msg) | ApplicationError::Internal(msg) => {
                Self::Internal(msg)
            },
        }
    }
}

/// Body of a chaos-injected error response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChaosErrorBody {
    /// Always `true`
    pub error: bool,
    pub message: String,
    pub correlation_id: CorrelationId,
    pub timestamp: DateTime<Utc>,
}

impl ChaosErrorBody {
    /// Body for an intervention decided now
    #[must_use]
    pub fn new(message: impl Into<String>, correlation_id: CorrelationId) -> Self {
        Self {
            error: true,
            message: message.into(),
            correlation_id,
            timestamp: Utc::now(),
        }
    }
}

/// Response for an injected error
///
/// Codes that `http` cannot represent fall back to 500.
pub fn chaos_error_response(
    status_code: u16,
    message: &str,
    correlation_id: CorrelationId,
) -> Response {
    let status = StatusCode::from_u16(status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = (status, Json(ChaosErrorBody::new(message, correlation_id))).into_response();
    tag_chaos_id(&mut response, correlation_id);
    response
}

/// Mark a response as intervened
pub fn tag_chaos_id(response: &mut Response, correlation_id: CorrelationId) {
    if let Ok(value) = HeaderValue::from_str(&correlation_id.to_string()) {
        response.headers_mut().insert(CHAOS_ID_HEADER, value);
    }
}

#[cfg(test)]
mod tests {
    use domain::ConfigurationError;
    use uuid::Uuid;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 4096)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn api_error_messages() {
        assert_eq!(
            ApiError::BadRequest("invalid input".to_string()).to_string(),
            "Bad request: invalid input"
        );
        assert_eq!(
            ApiError::NotFound("order".to_string()).to_string(),
            "Not found: order"
        );
    }

    #[test]
    fn bad_request_status() {
        let response = ApiError::BadRequest("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn internal_error_hides_details() {
        let response = ApiError::Internal("db at /var/lib".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "An internal error occurred");
        assert_eq!(body["code"], "internal_error");
    }

    #[test]
    fn configuration_error_maps_to_bad_request() {
        let err = ApplicationError::from(ConfigurationError::InvalidProbability(1.5));
        assert!(matches!(ApiError::from(err), ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn chaos_error_body_is_camel_case() {
        let id = CorrelationId::from_uuid(Uuid::nil());
        let response = chaos_error_response(503, "Service Unavailable", id);

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            response.headers()[CHAOS_ID_HEADER],
            "00000000-0000-0000-0000-000000000000"
        );

        let body = body_json(response).await;
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], "Service Unavailable");
        assert_eq!(body["correlationId"], "00000000-0000-0000-0000-000000000000");
        assert!(body["timestamp"].is_string());
    }

    #[test]
    fn unrepresentable_code_falls_back_to_500() {
        let id = CorrelationId::new();
        let response = chaos_error_response(1000, "odd", id);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
