//! Error types for the Portal API service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use nexus_auth_core::AuthError;
use nexus_dashboard_core::DashboardError;

/// API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("authentication required")]
    Unauthorized,

    #[error("role not allowed for this resource")]
    Forbidden { redirect_to: &'static str },

    #[error("session state is still resolving")]
    SessionLoading,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Dashboard(#[from] DashboardError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::SessionLoading => StatusCode::SERVICE_UNAVAILABLE,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Auth(err) => match err {
                AuthError::EmailAlreadyInUse => StatusCode::CONFLICT,
                AuthError::WeakCredential(_) => StatusCode::BAD_REQUEST,
                AuthError::EmailNotVerified => StatusCode::FORBIDDEN,
                AuthError::ProfileNotFound => StatusCode::NOT_FOUND,
                AuthError::Unknown(_) => StatusCode::UNAUTHORIZED,
            },
            Self::Dashboard(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::SessionLoading => "SESSION_LOADING",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Auth(err) => err.error_code(),
            Self::Dashboard(err) => err.error_code(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Forbidden { redirect_to } => {
                Some(serde_json::json!({ "redirect_to": redirect_to }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if matches!(self, Self::Dashboard(_)) {
            tracing::error!(error = ?self, "provider-backed request failed");
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
                details: self.details(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
