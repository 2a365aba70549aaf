//! Identity provider contract

use async_trait::async_trait;
use nexus_types::{Principal, Uid};
use tokio::sync::broadcast;

use crate::error::ProviderResult;

/// Session transition reported by the identity provider.
///
/// Fired on every sign-in and sign-out, including the provider's initial
/// state resolution.
#[derive(Debug, Clone)]
pub enum AuthStateEvent {
    SignedIn(Principal),
    SignedOut,
}

/// External identity provider.
///
/// Sign-up and sign-in both leave the new principal signed in, mirroring the
/// managed provider's behavior. Email verification completes out of band
/// (the user clicks an emailed link); the flipped flag is only visible on the
/// next sign-in.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create a new account and sign it in. The returned principal starts
    /// unverified.
    async fn sign_up(&self, email: &str, password: &str) -> ProviderResult<Principal>;

    /// Authenticate an existing account and sign it in.
    async fn sign_in(&self, email: &str, password: &str) -> ProviderResult<Principal>;

    /// Send (or re-send) the verification email for an account.
    async fn send_verification_email(&self, uid: &Uid) -> ProviderResult<()>;

    /// Clear the provider session.
    async fn sign_out(&self) -> ProviderResult<()>;

    /// The currently signed-in principal, if any. Used for initial session
    /// resolution at process start.
    async fn current(&self) -> Option<Principal>;

    /// Subscribe to session transitions.
    fn subscribe(&self) -> broadcast::Receiver<AuthStateEvent>;
}
