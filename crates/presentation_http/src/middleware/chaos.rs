//! Chaos middleware
//!
//! Translates engine outcomes into HTTP effects. Each request is described
//! to the current engine; the outcome decides whether the inner service is
//! called and what the client receives.

use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use application::ChaosEngine;
use axum::{
    body::Body,
    extract::{Query, Request},
    http::{
        StatusCode,
        header::{CONTENT_LENGTH, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use domain::{BodyTransform, CustomPayload, Outcome, RequestDescriptor};
use tower::{Layer, Service};
use tracing::{Instrument, debug, warn};

use crate::{
    config_reload::ReloadableChaos,
    error::{ApiError, chaos_error_response, tag_chaos_id},
};

/// Layer that puts the chaos engine in front of a service
#[derive(Debug, Clone)]
pub struct ChaosLayer {
    chaos: ReloadableChaos,
}

impl ChaosLayer {
    /// Create a layer that always asks the current engine of `chaos`
    #[must_use]
    pub const fn new(chaos: ReloadableChaos) -> Self {
        Self { chaos }
    }
}

impl<S> Layer<S> for ChaosLayer {
    type Service = ChaosService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ChaosService {
            inner,
            chaos: self.chaos.clone(),
        }
    }
}

/// Service that applies the engine's decision to each request
#[derive(Debug, Clone)]
pub struct ChaosService<S> {
    inner: S,
    chaos: ReloadableChaos,
}

impl<S> Service<Request<Body>> for ChaosService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let runtime = self.chaos.load();
        let mut inner = self.inner.clone();

        if !runtime.config.chaos.enabled {
            return Box::pin(async move { inner.call(request).await });
        }

        let engine = Arc::clone(&runtime.engine);
        let capture_limit = runtime
            .config
            .server
            .capture_body
            .then_some(runtime.config.server.max_capture_bytes);
        let span = tracing::debug_span!(
            "chaos",
            method = %request.method(),
            path = %request.uri().path(),
        );

        Box::pin(
            async move {
                let (descriptor, request) = match describe(request, capture_limit).await {
                    Ok(described) => described,
                    Err(err) => return Ok(err.into_response()),
                };

                let outcome = engine.decide(&descriptor).await;
                debug!(outcome = outcome.label(), "Chaos decision applied");

                match outcome {
                    Outcome::None => inner.call(request).await,
                    Outcome::Delay { correlation_id, .. }
                    | Outcome::Custom {
                        correlation_id,
                        payload: CustomPayload::Note { .. },
                        ..
                    } => {
                        let mut response = inner.call(request).await?;
                        tag_chaos_id(&mut response, correlation_id);
                        Ok(response)
                    },
                    Outcome::Error {
                        correlation_id,
                        status_code,
                        message,
                    }
                    | Outcome::Custom {
                        correlation_id,
                        payload:
                            CustomPayload::Fail {
                                status_code,
                                message,
                            },
                        ..
                    } => Ok(chaos_error_response(status_code, &message, correlation_id)),
                    Outcome::Gibberish {
                        correlation_id,
                        format,
                        body,
                    } => {
                        let mut response =
                            (StatusCode::OK, [(CONTENT_TYPE, format.content_type())], body)
                                .into_response();
                        tag_chaos_id(&mut response, correlation_id);
                        Ok(response)
                    },
                    Outcome::Custom {
                        correlation_id,
                        payload: CustomPayload::Transform { transform, .. },
                        ..
                    } => {
                        let response = inner.call(request).await?;
                        let mut response = rewrite_body(&engine, response, transform).await;
                        tag_chaos_id(&mut response, correlation_id);
                        Ok(response)
                    },
                }
            }
            .instrument(span),
        )
    }
}

/// Snapshot a request for the engine
///
/// The body is only read when `capture_limit` is set and the declared
/// Content-Length fits within it; the request is rebuilt from the buffered
/// bytes so the handler still sees it.
async fn describe(
    request: Request<Body>,
    capture_limit: Option<usize>,
) -> Result<(RequestDescriptor, Request<Body>), ApiError> {
    let mut descriptor = RequestDescriptor::new(request.method().as_str(), request.uri().path());

    for (name, value) in request.headers() {
        if let Ok(value) = value.to_str() {
            descriptor = descriptor.with_header(name.as_str(), value);
        }
    }

    if let Ok(Query(params)) = Query::<HashMap<String, String>>::try_from_uri(request.uri()) {
        for (key, value) in params {
            descriptor = descriptor.with_query(key, value);
        }
    }

    let Some(limit) = capture_limit else {
        return Ok((descriptor, request));
    };
    let declared = request
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<usize>().ok());
    match declared {
        Some(length) if length > 0 && length <= limit => {},
        _ => return Ok((descriptor, request)),
    }

    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, limit)
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read request body: {e}")))?;
    descriptor = descriptor.with_body(String::from_utf8_lossy(&bytes));

    Ok((descriptor, Request::from_parts(parts, Body::from(bytes))))
}

/// Apply a body transform to a handler's response
async fn rewrite_body(engine: &ChaosEngine, response: Response, transform: BodyTransform) -> Response {
    let (mut parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "Failed to buffer response body for transform");
            return ApiError::Internal(e.to_string()).into_response();
        },
    };

    let rewritten = engine.transform_body(&bytes, transform);
    parts.headers.remove(CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(rewritten))
}
