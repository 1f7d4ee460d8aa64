//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps domain errors from placard-core, placard-resolve, and the change
//! store to HTTP status codes. Returns JSON error bodies with a machine
//! code and a message. Never exposes internal error details in responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured JSON error response body.
///
/// All error responses use this format for consistency across the API
/// surface.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// The error payload.
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
///
/// Internal error details are logged but never returned to clients.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Request body could not be used (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Authentication failure, missing or invalid token (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authorization failure, caller lacks admin access (403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Internal server error (500). Message is logged but not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if matches!(&self, Self::Internal(_)) {
            tracing::error!(error = %self, "internal server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Convert placard-core validation errors to API errors.
impl From<placard_core::ValidationError> for AppError {
    fn from(err: placard_core::ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Convert placard-core configuration errors to API errors.
impl From<placard_core::ConfigError> for AppError {
    fn from(err: placard_core::ConfigError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Convert catalog backend failures to API errors.
impl From<placard_resolve::CatalogError> for AppError {
    fn from(err: placard_resolve::CatalogError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Convert change store backend failures to API errors.
impl From<crate::changes::ChangeStoreError> for AppError {
    fn from(err: crate::changes::ChangeStoreError) -> Self {
        Self::Internal(err.to_string())
    }
}
