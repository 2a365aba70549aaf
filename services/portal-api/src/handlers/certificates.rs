//! Student certificate handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use tokio::sync::mpsc;

use nexus_auth_core::guard::Access;
use nexus_dashboard_core::UploadProgress;
use nexus_types::{CertificateRecord, Role};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

use super::authorize;

const STUDENT_ONLY: &[Role] = &[Role::Student];

#[derive(Debug, Deserialize)]
pub struct UploadBody {
    pub file_name: String,
    /// File bytes, base64-encoded
    pub content: String,
}

/// GET /api/v1/certificates
///
/// The signed-in student's own certificates, newest first.
pub async fn list_certificates(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CertificateRecord>>> {
    let profile = authorize(&state, Access::Roles(STUDENT_ONLY))?;
    let records = state.certificates.list_own(profile.uid()).await?;
    Ok(Json(records))
}

/// POST /api/v1/certificates
pub async fn upload_certificate(
    State(state): State<AppState>,
    Json(body): Json<UploadBody>,
) -> ApiResult<impl IntoResponse> {
    let profile = authorize(&state, Access::Roles(STUDENT_ONLY))?;
    let owner = profile
        .as_student()
        .cloned()
        .ok_or(ApiError::Unauthorized)?;

    if body.file_name.is_empty() {
        return Err(ApiError::BadRequest("file_name must not be empty".to_string()));
    }

    let bytes = STANDARD
        .decode(body.content.as_bytes())
        .map_err(|_| ApiError::BadRequest("content is not valid base64".to_string()))?;

    if bytes.len() > state.config.max_upload_bytes {
        return Err(ApiError::BadRequest(format!(
            "file exceeds the {} byte upload limit",
            state.config.max_upload_bytes
        )));
    }

    // Progress side channel, logged the way the UI would drive a progress
    // bar.
    let (tx, mut rx) = mpsc::channel::<UploadProgress>(16);
    let file_name = body.file_name.clone();
    tokio::spawn(async move {
        while let Some(progress) = rx.recv().await {
            tracing::debug!(
                file_name = %file_name,
                percent = (progress.fraction * 100.0) as u32,
                "upload progress"
            );
        }
    });

    let record = state
        .certificates
        .upload(&owner, &body.file_name, bytes, Some(tx))
        .await?;

    Ok((StatusCode::CREATED, Json(record)))
}
