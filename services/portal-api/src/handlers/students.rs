//! Staff dashboard handlers

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use nexus_auth_core::guard::Access;
use nexus_dashboard_core::{batches, in_batch};
use nexus_types::{CertificateRecord, Role, StudentProfile, Uid};

use crate::error::ApiResult;
use crate::state::AppState;

use super::authorize;

const STAFF_ONLY: &[Role] = &[Role::Staff];

#[derive(Debug, Deserialize)]
pub struct RosterQuery {
    #[serde(default)]
    pub batch: Option<String>,
}

/// GET /api/v1/students[?batch=2024]
pub async fn list_students(
    State(state): State<AppState>,
    Query(query): Query<RosterQuery>,
) -> ApiResult<Json<Vec<StudentProfile>>> {
    authorize(&state, Access::Roles(STAFF_ONLY))?;

    let students = state.directory.list_students().await?;
    let students = match query.batch {
        Some(batch) => in_batch(&students, &batch).into_iter().cloned().collect(),
        None => students,
    };
    Ok(Json(students))
}

/// GET /api/v1/students/batches
pub async fn list_batches(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    authorize(&state, Access::Roles(STAFF_ONLY))?;

    let students = state.directory.list_students().await?;
    Ok(Json(batches(&students)))
}

/// GET /api/v1/students/{uid}/certificates
pub async fn student_certificates(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> ApiResult<Json<Vec<CertificateRecord>>> {
    authorize(&state, Access::Roles(STAFF_ONLY))?;

    let records = state.certificates.list_for_staff(&Uid::from(uid)).await?;
    Ok(Json(records))
}
