//! HTTP middleware shared by both services.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::Level;

use crate::error::AppError;

/// Header carrying the shared API key
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// API key policy for a service.
///
/// In the default mode every failure reads `unauthorized`. Detailed mode
/// tells a missing header apart from a wrong key.
#[derive(Clone)]
pub struct ApiKeyAuth {
    expected: Arc<str>,
    detailed: bool,
}

impl ApiKeyAuth {
    pub fn new(expected: impl Into<Arc<str>>) -> Self {
        Self {
            expected: expected.into(),
            detailed: false,
        }
    }

    /// Report missing and invalid keys with distinct messages.
    pub fn detailed(mut self) -> Self {
        self.detailed = true;
        self
    }

    /// Check a presented header value against the configured key.
    pub fn check(&self, presented: Option<&str>) -> Result<(), AppError> {
        match presented {
            Some(key) if !key.is_empty() && key == &*self.expected => Ok(()),
            _ if !self.detailed => Err(AppError::unauthorized("unauthorized")),
            None | Some("") => Err(AppError::unauthorized(format!(
                "missing {} header",
                API_KEY_HEADER
            ))),
            Some(_) => Err(AppError::unauthorized(format!("invalid {}", API_KEY_HEADER))),
        }
    }
}

impl std::fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuth")
            .field("expected", &"[REDACTED]")
            .field("detailed", &self.detailed)
            .finish()
    }
}

/// API key middleware.
///
/// Runs before any handler; a rejected request never reaches the store.
pub async fn require_api_key(
    State(auth): State<ApiKeyAuth>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok());

    auth.check(presented)?;

    Ok(next.run(request).await)
}

/// Per-request log line: method, path, status and latency.
pub fn request_trace_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    DefaultMakeSpan,
    DefaultOnRequest,
    DefaultOnResponse,
> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
