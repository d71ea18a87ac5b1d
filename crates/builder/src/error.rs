//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-class errors to
//! Sentry before responding. All route handlers return
//! `Result<T, AppError>`; the response body is always JSON
//! `{code, message}` so the editor UI can branch on the code.
//!
//! Validation and template errors never mutate state; resolver and migrator
//! paths never reach this type at all - they degrade to defaults instead of
//! erroring.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use vitrine_core::merge::MergeError;
use vitrine_core::switch::SwitchError;

use crate::store::StorageError;

/// Application-level error type for the builder.
#[derive(Debug, Error)]
pub enum AppError {
    /// A scalar field failed its type/length rule; nothing was applied.
    #[error("validation failed: {0}")]
    Validation(#[from] MergeError),

    /// Switch target is not enabled and not the tenant's current template.
    #[error("template not allowed: {0}")]
    TemplateNotAllowed(String),

    /// The template-switch payload could not be parsed.
    #[error("invalid switch directive: {0}")]
    InvalidDirective(String),

    /// Bad request from client.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Storage operation failed (after retries, for transient faults).
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<SwitchError> for AppError {
    fn from(err: SwitchError) -> Self {
        match err {
            SwitchError::TemplateNotAllowed { template } => Self::TemplateNotAllowed(template),
            SwitchError::InvalidDirective(reason) => Self::InvalidDirective(reason),
        }
    }
}

impl AppError {
    /// Stable machine-readable code returned to clients.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::TemplateNotAllowed(_) => "template_not_allowed",
            Self::InvalidDirective(_) => "invalid_directive",
            Self::BadRequest(_) => "bad_request",
            Self::NotFound(_) => "not_found",
            Self::Storage(_) => "storage_error",
            Self::Internal(_) => "internal_error",
        }
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::TemplateNotAllowed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidDirective(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Storage(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Storage(_) | Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        let body = Json(json!({
            "code": self.code(),
            "message": message,
        }));
        (self.status(), body).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
