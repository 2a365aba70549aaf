//! HTTP handlers

mod auth;
mod certificates;
mod health;
mod routing;
mod students;

pub use auth::{login, logout, register, resend_verification, session};
pub use certificates::{list_certificates, upload_certificate};
pub use health::{health, ready};
pub use routing::route_decision;
pub use students::{list_batches, list_students, student_certificates};

use nexus_auth_core::guard::{self, Access, RouteDecision};
use nexus_types::Profile;

use crate::error::ApiError;
use crate::state::AppState;

/// Gate a handler on the route guard and return the caller's profile.
///
/// Maps guard outcomes onto HTTP: still-loading sessions are retryable,
/// missing sessions are unauthorized, and role mismatches are forbidden with
/// the caller's own dashboard in the error details.
pub(crate) fn authorize(state: &AppState, access: Access) -> Result<Profile, ApiError> {
    let session = state.store.current();
    match guard::decide(&session, access) {
        RouteDecision::Wait => Err(ApiError::SessionLoading),
        RouteDecision::RedirectToLogin => Err(ApiError::Unauthorized),
        RouteDecision::Redirect(path) => Err(ApiError::Forbidden { redirect_to: path }),
        RouteDecision::Render => session.profile().cloned().ok_or(ApiError::Unauthorized),
    }
}
