//! JSON error responses for the HTTP API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chef_core::ChefError;
use serde_json::json;

/// Caller-facing text for any completion failure. The underlying error is
/// only logged.
pub const UPSTREAM_DETAIL: &str = "AI service error";

/// API error with status code and message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, code: "bad_request", message: msg.into() }
    }
    pub fn too_many_requests(msg: impl Into<String>) -> Self {
        Self { status: StatusCode::TOO_MANY_REQUESTS, code: "rate_limited", message: msg.into() }
    }
    pub fn upstream() -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, code: "upstream_error", message: UPSTREAM_DETAIL.into() }
    }
    pub fn internal(msg: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, code: "internal_error", message: msg.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "detail": self.message,
            "error": {
                "code": self.code,
                "message": self.message,
            }
        });
        (self.status, Json(body)).into_response()
    }
}

impl From<ChefError> for ApiError {
    fn from(err: ChefError) -> Self {
        match err {
            ChefError::EmptyMessage => ApiError::bad_request(err.to_string()),
            ChefError::RateLimitExceeded { .. } => ApiError::too_many_requests("Too many requests"),
            ChefError::Upstream(_) => ApiError::upstream(),
            ChefError::Config(_) => ApiError::internal("Server misconfigured"),
        }
    }
}
