//! Session state

use serde::Serialize;

use crate::{Principal, Profile, Role};

/// Current client session, as observed by every routing decision.
///
/// The state starts at `Loading` and leaves it exactly once per process
/// lifetime, when the identity provider's initial-state check completes.
/// `ProfileMissing` is the dangling-principal case: a verified principal
/// whose profile record was never created (registration failed after
/// sign-up succeeded).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    Loading,
    SignedOut,
    Unverified {
        principal: Principal,
    },
    ProfileMissing {
        principal: Principal,
    },
    Authenticated {
        principal: Principal,
        profile: Profile,
    },
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Self::Loading | Self::SignedOut => None,
            Self::Unverified { principal }
            | Self::ProfileMissing { principal }
            | Self::Authenticated { principal, .. } => Some(principal),
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        match self {
            Self::Authenticated { profile, .. } => Some(profile),
            _ => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.profile().map(Profile::role)
    }
}
