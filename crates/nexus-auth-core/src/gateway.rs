//! Auth gateway
//!
//! Wraps sign-in, sign-up, sign-out, and verification-resend against the
//! identity provider and normalizes provider errors into the portal's
//! [`AuthError`] taxonomy.

use std::sync::Arc;

use chrono::Utc;
use nexus_providers::{IdentityProvider, ProfileRepository};
use nexus_types::{Profile, Role, StaffProfile, StudentProfile, Uid};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::resolver::ProfileResolver;
use crate::store::SessionStore;

/// Role-specific fields collected at registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Enrollment {
    Student {
        roll_number: String,
        batch: String,
        phone: String,
    },
    Staff,
}

impl Enrollment {
    fn into_profile(self, uid: Uid, name: String, email: String) -> Profile {
        let created_at = Utc::now();
        match self {
            Self::Student {
                roll_number,
                batch,
                phone,
            } => Profile::Student(StudentProfile {
                uid,
                name,
                email,
                roll_number,
                batch,
                phone,
                created_at,
            }),
            Self::Staff => Profile::Staff(StaffProfile {
                uid,
                name,
                email,
                created_at,
            }),
        }
    }
}

/// Registration input
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub enrollment: Enrollment,
}

/// Authentication gateway.
///
/// Requires a session listener bound to the same store (see
/// [`spawn_session_listener`](crate::spawn_session_listener)): `login` and
/// `logout` wait for the listener to apply the resulting sign-out before
/// returning.
pub struct AuthGateway<I, P> {
    identity: Arc<I>,
    resolver: ProfileResolver<P>,
    profiles: Arc<P>,
    store: SessionStore,
}

impl<I: IdentityProvider, P: ProfileRepository> AuthGateway<I, P> {
    pub fn new(identity: Arc<I>, profiles: Arc<P>, store: SessionStore) -> Self {
        Self {
            identity,
            resolver: ProfileResolver::new(Arc::clone(&profiles)),
            profiles,
            store,
        }
    }

    /// Create a principal, send the verification email, then create the
    /// profile record keyed by the new principal's uid.
    ///
    /// The three steps are not atomic: a profile-insert failure after
    /// sign-up succeeded leaves a principal without a profile, which this
    /// layer does not repair.
    pub async fn register(&self, request: RegisterRequest) -> Result<(), AuthError> {
        let principal = self
            .identity
            .sign_up(&request.email, &request.password)
            .await?;

        self.identity
            .send_verification_email(&principal.uid)
            .await?;

        let profile =
            request
                .enrollment
                .into_profile(principal.uid.clone(), request.name, request.email);

        self.profiles.insert(profile).await.map_err(|err| {
            tracing::error!(
                uid = %principal.uid,
                error = %err,
                "profile creation failed after sign-up, principal left without profile"
            );
            AuthError::from(err)
        })?;

        tracing::info!(uid = %principal.uid, "account registered, verification pending");
        Ok(())
    }

    /// Authenticate and resolve the caller's role.
    ///
    /// An unverified principal is signed out again before this returns: the
    /// session store shows `SignedOut`, never an unverified session, by the
    /// time the caller sees `EmailNotVerified`.
    pub async fn login(&self, email: &str, password: &str) -> Result<Role, AuthError> {
        let since = self.store.revision();
        let principal = self.identity.sign_in(email, password).await?;

        if !principal.email_verified {
            self.identity.sign_out().await?;
            self.store.wait_for_signed_out(since).await;
            return Err(AuthError::EmailNotVerified);
        }

        let profile = self
            .resolver
            .resolve(&principal.uid)
            .await
            .ok_or(AuthError::ProfileNotFound)?;

        Ok(profile.role())
    }

    /// Clear the provider session and wait until the store observes it, so
    /// the caller never navigates on a stale session.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let since = self.store.revision();
        self.identity.sign_out().await?;
        self.store.wait_for_signed_out(since).await;
        Ok(())
    }

    /// Re-send the verification email for the currently signed-in principal.
    pub async fn resend_verification(&self) -> Result<(), AuthError> {
        let principal = self
            .identity
            .current()
            .await
            .ok_or_else(|| AuthError::Unknown("no signed-in user".to_string()))?;
        self.identity
            .send_verification_email(&principal.uid)
            .await?;
        Ok(())
    }
}

impl<I, P> std::fmt::Debug for AuthGateway<I, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGateway").finish()
    }
}
