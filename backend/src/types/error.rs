//! Universal error handling for the API

use aide::OperationOutput;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use schemars::JsonSchema;
use serde::Serialize;

use crate::photo_storage::StorageError;

/// API error response envelope
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Whether the client should retry the request
    pub allow_retry: bool,
    /// Error details
    error: ErrorBody,
}

/// Error body containing code and message
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    /// Machine-readable error code
    pub code: &'static str,
    /// Human-readable error message
    pub message: &'static str,
}

/// Application error type that wraps the API error response
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    inner: ApiErrorResponse,
    /// Raw upstream message sent as `text/plain` instead of the envelope
    detail: Option<String>,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub const fn new(
        status: StatusCode,
        code: &'static str,
        msg: &'static str,
        retry: bool,
    ) -> Self {
        Self {
            status,
            inner: ApiErrorResponse {
                allow_retry: retry,
                error: ErrorBody { code, message: msg },
            },
            detail: None,
        }
    }

    /// Maps a storage error, optionally exposing the store's own message as the body
    #[must_use]
    pub fn from_storage(err: &StorageError, expose_detail: bool) -> Self {
        let app_error = Self::from(err);
        if expose_detail {
            Self {
                detail: Some(err.detail().to_string()),
                ..app_error
            }
        } else {
            app_error
        }
    }

    /// HTTP status of the response
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.status.as_u16() {
            400..=499 => tracing::warn!(
                "Client error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            500..=599 => tracing::error!(
                "Server error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            _ => {}
        }

        match self.detail {
            Some(detail) => (
                self.status,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                detail,
            )
                .into_response(),
            None => (self.status, Json(self.inner)).into_response(),
        }
    }
}

/// Convert storage errors to application errors
///
/// Every store failure is a 500; the handler logs the detail.
impl From<&StorageError> for AppError {
    fn from(err: &StorageError) -> Self {
        match err {
            StorageError::UpstreamError(_) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "upstream_error",
                "Storage service temporarily unavailable",
                true,
            ),
            StorageError::ListFailed(_) | StorageError::PresignFailed { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error",
                true,
            ),
            StorageError::ConfigError(_) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error",
                false,
            ),
        }
    }
}

impl OperationOutput for AppError {
    type Inner = ApiErrorResponse;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<ApiErrorResponse>::operation_response(ctx, operation)
    }
}
