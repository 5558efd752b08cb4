//! API Error Handling
//!
//! Maps domain errors onto HTTP status codes and a structured body that
//! always carries the request id.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{error, warn};
use crate::utils::errors::{ErrorKind, ErrorSeverity, GameBotError};
use super::middleware::RequestId;

/// Top-level API error response with request tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub request_id: String,
    pub error: ErrorBody,
}

/// Error body with structured information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable error code (VALIDATION_ERROR, NOT_FOUND, CONFLICT, ...)
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

/// API error with request tracking
#[derive(Debug)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    pub request_id: String,
}

impl ApiError {
    /// Wrap a domain error, keeping only its public message
    pub fn from_domain(request_id: &RequestId, err: GameBotError) -> Self {
        let kind = err.kind();
        match err.severity() {
            ErrorSeverity::Critical | ErrorSeverity::Error => error!(
                request_id = %request_id.0,
                severity = %err.severity(),
                recoverable = err.is_recoverable(),
                error = %err,
                "Request failed"
            ),
            ErrorSeverity::Warning => {
                warn!(request_id = %request_id.0, recoverable = err.is_recoverable(), error = %err, "Request rejected")
            }
            ErrorSeverity::Info => {}
        }

        Self {
            kind,
            message: err.public_message(),
            request_id: request_id.0.clone(),
        }
    }

    pub fn validation(request_id: &RequestId, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: message.into(),
            request_id: request_id.0.clone(),
        }
    }

    pub fn unauthorized(request_id: &RequestId) -> Self {
        Self {
            kind: ErrorKind::Unauthorized,
            message: "Unauthorized".to_string(),
            request_id: request_id.0.clone(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::TransientStore => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::IdGeneration | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.request_id, self.kind.code(), self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            request_id: self.request_id,
            error: ErrorBody {
                code: self.kind.code().to_string(),
                message: self.message,
            },
        });

        (status, body).into_response()
    }
}

/// Attach the request id to fallible domain calls
pub trait ResultExt<T> {
    fn with_request_id(self, request_id: &RequestId) -> Result<T, ApiError>;
}

impl<T> ResultExt<T> for Result<T, GameBotError> {
    fn with_request_id(self, request_id: &RequestId) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::from_domain(request_id, e))
    }
}

impl<T> ResultExt<T> for Result<T, JsonRejection> {
    fn with_request_id(self, request_id: &RequestId) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::validation(request_id, e.body_text()))
    }
}

impl<T> ResultExt<T> for Result<T, PathRejection> {
    fn with_request_id(self, request_id: &RequestId) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::validation(request_id, e.body_text()))
    }
}

impl<T> ResultExt<T> for Result<T, QueryRejection> {
    fn with_request_id(self, request_id: &RequestId) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::validation(request_id, e.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_id() -> RequestId {
        RequestId("req-1".to_string())
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (GameBotError::InvalidInput("bad".to_string()), StatusCode::BAD_REQUEST),
            (GameBotError::GameNotFound { game_id: "x".to_string() }, StatusCode::NOT_FOUND),
            (GameBotError::DuplicatePending { user_id: 1 }, StatusCode::CONFLICT),
            (GameBotError::Unauthorized("no".to_string()), StatusCode::UNAUTHORIZED),
            (GameBotError::PermissionDenied("no".to_string()), StatusCode::FORBIDDEN),
            (GameBotError::TransientStore("pool".to_string()), StatusCode::SERVICE_UNAVAILABLE),
            (GameBotError::IdGenerationFailed { attempts: 5 }, StatusCode::INTERNAL_SERVER_ERROR),
            (GameBotError::Config("x".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from_domain(&request_id(), err).status(), status);
        }
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = ApiError::from_domain(&request_id(), sqlx::Error::RowNotFound.into());
        assert_eq!(err.message, "Internal server error");
        assert_eq!(err.kind.code(), "INTERNAL_ERROR");
        assert_eq!(err.request_id, "req-1");
    }
}
