//! Route guard endpoint

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use nexus_auth_core::guard::{self, RouteDecision};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<&'static str>,
}

/// GET /api/v1/route?path=/student-dashboard
///
/// Evaluate the route guard for a navigation attempt. Unknown paths fall
/// back to home.
pub async fn route_decision(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Json<RouteResponse> {
    let decision = match guard::required_access(&query.path) {
        None => RouteDecision::Redirect(guard::HOME_PATH),
        Some(access) => guard::decide(&state.store.current(), access),
    };

    let response = match decision {
        RouteDecision::Wait => RouteResponse {
            action: "wait",
            to: None,
        },
        RouteDecision::Render => RouteResponse {
            action: "render",
            to: None,
        },
        RouteDecision::RedirectToLogin => RouteResponse {
            action: "redirect",
            to: Some(guard::LOGIN_PATH),
        },
        RouteDecision::Redirect(path) => RouteResponse {
            action: "redirect",
            to: Some(path),
        },
    };

    Json(response)
}
