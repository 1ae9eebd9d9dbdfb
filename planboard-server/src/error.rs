//! Error types for the HTTP API
//!
//! Every failure while handling a request is reported as
//! `422 Unprocessable Entity` with a `{"detail": "..."}` body. The readiness
//! probe is the only exception and answers `503` with the same body shape.

use crate::form::FormError;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use planboard_core::PlanboardError;
use serde::Serialize;
use std::fmt;
use tracing::warn;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    /// Service unavailable (readiness probe only)
    ServiceUnavailable(String),

    /// Registry error
    Core(PlanboardError),

    /// Request body was not the expected JSON
    InvalidJson(JsonRejection),

    /// Query string could not be decoded
    InvalidQuery(QueryRejection),

    /// Multipart form was malformed or incomplete
    InvalidForm(FormError),
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    detail: String,
}

impl ApiError {
    /// Short label used in logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::ServiceUnavailable(_) => "service_unavailable",
            ApiError::Core(_) => "registry",
            ApiError::InvalidJson(_) => "invalid_json",
            ApiError::InvalidQuery(_) => "invalid_query",
            ApiError::InvalidForm(_) => "invalid_form",
        }
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::ServiceUnavailable(msg) => f.write_str(msg),
            ApiError::Core(e) => write!(f, "{}", e),
            ApiError::InvalidJson(e) => f.write_str(&e.body_text()),
            ApiError::InvalidQuery(e) => f.write_str(&e.body_text()),
            ApiError::InvalidForm(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<PlanboardError> for ApiError {
    fn from(err: PlanboardError) -> Self {
        ApiError::Core(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidJson(rejection)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQuery(rejection)
    }
}

impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        ApiError::InvalidForm(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();
        let detail = self.to_string();

        warn!(kind, status = status.as_u16(), "Request failed: {}", detail);
        crate::metrics::record_error(kind);
        crate::tracing::record_error(&detail);

        (status, Json(ErrorResponse { detail })).into_response()
    }
}
