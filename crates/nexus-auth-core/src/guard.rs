//! Route guard
//!
//! Pure decision function mapping (session state, required access) to a
//! routing outcome, plus the application route table.

use nexus_types::{Role, SessionState};

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const STUDENT_DASHBOARD_PATH: &str = "/student-dashboard";
pub const STAFF_DASHBOARD_PATH: &str = "/staff-dashboard";
pub const PROFILE_PATH: &str = "/profile";

/// Access requirement a path declares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Renders for everyone
    Public,
    /// Requires a verified session of any role
    Authenticated,
    /// Requires a verified session whose role is in the set
    Roles(&'static [Role]),
}

/// Outcome of a navigation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session state is still resolving; make no decision yet
    Wait,
    Render,
    RedirectToLogin,
    /// Wrong role for the path: send the user to their own dashboard
    Redirect(&'static str),
}

/// Access requirement for a known application path; `None` for unknown
/// paths, which fall back to home.
pub fn required_access(path: &str) -> Option<Access> {
    match path {
        HOME_PATH | LOGIN_PATH | REGISTER_PATH => Some(Access::Public),
        STUDENT_DASHBOARD_PATH => Some(Access::Roles(&[Role::Student])),
        STAFF_DASHBOARD_PATH => Some(Access::Roles(&[Role::Staff])),
        PROFILE_PATH => Some(Access::Authenticated),
        _ => None,
    }
}

/// The dashboard a role lands on
pub fn dashboard_path(role: Role) -> &'static str {
    match role {
        Role::Student => STUDENT_DASHBOARD_PATH,
        Role::Staff => STAFF_DASHBOARD_PATH,
    }
}

/// Decide a navigation attempt.
///
/// A role-set mismatch always redirects to the user's own dashboard, never
/// to login: "wrong role" is not "no session". Unverified sessions and
/// dangling principals (no profile record) go to login, where the
/// verification affordance lives.
pub fn decide(state: &SessionState, access: Access) -> RouteDecision {
    if access == Access::Public {
        return RouteDecision::Render;
    }

    match state {
        SessionState::Loading => RouteDecision::Wait,
        SessionState::SignedOut
        | SessionState::Unverified { .. }
        | SessionState::ProfileMissing { .. } => RouteDecision::RedirectToLogin,
        SessionState::Authenticated { profile, .. } => match access {
            Access::Roles(allowed) if !allowed.contains(&profile.role()) => {
                RouteDecision::Redirect(dashboard_path(profile.role()))
            }
            _ => RouteDecision::Render,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use nexus_types::{Principal, Profile, StaffProfile, StudentProfile, Uid};

    fn principal(verified: bool) -> Principal {
        Principal {
            uid: Uid::from("u-1"),
            email: "u@college.edu".to_string(),
            email_verified: verified,
        }
    }

    fn authenticated(role: Role) -> SessionState {
        let profile = match role {
            Role::Student => Profile::Student(StudentProfile {
                uid: Uid::from("u-1"),
                name: "Asha".to_string(),
                email: "u@college.edu".to_string(),
                roll_number: "IT-01".to_string(),
                batch: "2024".to_string(),
                phone: "5550100".to_string(),
                created_at: Utc::now(),
            }),
            Role::Staff => Profile::Staff(StaffProfile {
                uid: Uid::from("u-1"),
                name: "Dr. Mehta".to_string(),
                email: "u@college.edu".to_string(),
                created_at: Utc::now(),
            }),
        };
        SessionState::Authenticated {
            principal: principal(true),
            profile,
        }
    }

    #[test]
    fn test_matching_role_renders() {
        for role in [Role::Student, Role::Staff] {
            let state = authenticated(role);
            let access = required_access(dashboard_path(role)).unwrap();
            assert_eq!(decide(&state, access), RouteDecision::Render);
        }
    }

    #[test]
    fn test_wrong_role_redirects_to_own_dashboard() {
        let student = authenticated(Role::Student);
        assert_eq!(
            decide(&student, Access::Roles(&[Role::Staff])),
            RouteDecision::Redirect(STUDENT_DASHBOARD_PATH)
        );

        let staff = authenticated(Role::Staff);
        assert_eq!(
            decide(&staff, Access::Roles(&[Role::Student])),
            RouteDecision::Redirect(STAFF_DASHBOARD_PATH)
        );
    }

    #[test]
    fn test_unauthenticated_redirects_to_login_for_every_protected_path() {
        for path in [STUDENT_DASHBOARD_PATH, STAFF_DASHBOARD_PATH, PROFILE_PATH] {
            let access = required_access(path).unwrap();
            assert_eq!(
                decide(&SessionState::SignedOut, access),
                RouteDecision::RedirectToLogin
            );
        }
    }

    #[test]
    fn test_unverified_redirects_to_login() {
        let state = SessionState::Unverified {
            principal: principal(false),
        };
        assert_eq!(
            decide(&state, Access::Roles(&[Role::Student])),
            RouteDecision::RedirectToLogin
        );
        assert_eq!(
            decide(&state, Access::Authenticated),
            RouteDecision::RedirectToLogin
        );
    }

    #[test]
    fn test_dangling_principal_redirects_to_login() {
        let state = SessionState::ProfileMissing {
            principal: principal(true),
        };
        assert_eq!(
            decide(&state, Access::Roles(&[Role::Staff])),
            RouteDecision::RedirectToLogin
        );
    }

    #[test]
    fn test_loading_waits_on_protected_paths_only() {
        assert_eq!(
            decide(&SessionState::Loading, Access::Authenticated),
            RouteDecision::Wait
        );
        assert_eq!(
            decide(&SessionState::Loading, Access::Public),
            RouteDecision::Render
        );
    }

    #[test]
    fn test_profile_path_allows_any_authenticated_role() {
        for role in [Role::Student, Role::Staff] {
            assert_eq!(
                decide(&authenticated(role), Access::Authenticated),
                RouteDecision::Render
            );
        }
    }

    #[test]
    fn test_unknown_path_has_no_rule() {
        assert_eq!(required_access("/admin"), None);
        assert_eq!(required_access(""), None);
    }
}
