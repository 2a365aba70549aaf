//! Authentication handlers (register, login, logout, verification resend)

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use nexus_auth_core::{guard, Enrollment, RegisterRequest};
use nexus_types::{Role, SessionState};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub roll_number: Option<String>,
    #[serde(default)]
    pub batch: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub role: Role,
    pub redirect_to: &'static str,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub success: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// Student accounts must carry their cohort fields; staff accounts carry
/// none.
fn enrollment_from(body: &RegisterBody) -> Result<Enrollment, ApiError> {
    fn required(field: &Option<String>, message: &str) -> Result<String, ApiError> {
        field
            .clone()
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ApiError::BadRequest(message.to_string()))
    }

    match body.role {
        Role::Student => Ok(Enrollment::Student {
            roll_number: required(&body.roll_number, "roll_number is required for students")?,
            batch: required(&body.batch, "batch is required for students")?,
            phone: required(&body.phone, "phone is required for students")?,
        }),
        Role::Staff => Ok(Enrollment::Staff),
    }
}

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> ApiResult<impl IntoResponse> {
    let enrollment = enrollment_from(&body)?;
    state
        .gateway
        .register(RegisterRequest {
            name: body.name,
            email: body.email,
            password: body.password,
            enrollment,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Account created. Check your email for a verification link before logging in.",
        }),
    ))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> ApiResult<Json<LoginResponse>> {
    let role = state.gateway.login(&body.email, &body.password).await?;
    Ok(Json(LoginResponse {
        role,
        redirect_to: guard::dashboard_path(role),
    }))
}

/// POST /api/v1/auth/logout
pub async fn logout(State(state): State<AppState>) -> ApiResult<Json<OkResponse>> {
    state.gateway.logout().await?;
    Ok(Json(OkResponse { success: true }))
}

/// POST /api/v1/auth/resend-verification
pub async fn resend_verification(State(state): State<AppState>) -> ApiResult<Json<OkResponse>> {
    state.gateway.resend_verification().await?;
    Ok(Json(OkResponse { success: true }))
}

/// GET /api/v1/auth/session
pub async fn session(State(state): State<AppState>) -> Json<SessionState> {
    Json(state.store.current())
}
