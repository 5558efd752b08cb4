//! Bearer token authentication for privileged routes.
//!
//! An empty configured secret rejects every request.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use super::errors::ApiError;
use super::middleware::RequestId;

/// Expected bearer credential
#[derive(Clone)]
pub struct BearerAuth {
    token: String,
}

impl BearerAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    /// Check an `Authorization` header value
    pub fn accepts(&self, header: Option<&str>) -> bool {
        if self.token.is_empty() {
            return false;
        }

        header
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|token| token == self.token)
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerAuth")
            .field("token", &"[redacted]")
            .finish()
    }
}

/// Reject requests without the configured bearer token
pub async fn bearer_auth_middleware(
    State(auth): State<BearerAuth>,
    request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    if auth.accepts(header) {
        return next.run(request).await;
    }

    let request_id = request
        .extensions()
        .get::<RequestId>()
        .cloned()
        .unwrap_or_else(|| RequestId(String::new()));

    tracing::debug!(request_id = %request_id.0, path = %request.uri().path(), "Rejected request without valid bearer token");
    ApiError::unauthorized(&request_id).into_response()
}
