//! Profile resolution

use std::sync::Arc;

use nexus_providers::ProfileRepository;
use nexus_types::{Profile, Uid};

/// Resolves a verified principal to its profile record.
///
/// A single point read by primary key on every call; nothing is cached.
pub struct ProfileResolver<P> {
    profiles: Arc<P>,
}

impl<P: ProfileRepository> ProfileResolver<P> {
    pub fn new(profiles: Arc<P>) -> Self {
        Self { profiles }
    }

    /// Look up the profile for `uid`.
    ///
    /// A backend failure is logged and surfaces as absent; callers cannot
    /// distinguish it from a genuinely missing profile.
    pub async fn resolve(&self, uid: &Uid) -> Option<Profile> {
        match self.profiles.get(uid).await {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!(%uid, error = %err, "profile lookup failed");
                None
            }
        }
    }
}

impl<P> Clone for ProfileResolver<P> {
    fn clone(&self) -> Self {
        Self {
            profiles: Arc::clone(&self.profiles),
        }
    }
}

impl<P> std::fmt::Debug for ProfileResolver<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileResolver").finish()
    }
}
