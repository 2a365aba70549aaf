//! Session store
//!
//! A process-wide state container observed by every routing decision. The
//! store has exactly one writer path: the session listener spawned by
//! [`spawn_session_listener`], which applies identity-provider state-change
//! events in order. Readers always see the latest value synchronously.

use std::sync::Arc;

use nexus_providers::{AuthStateEvent, IdentityProvider, ProfileRepository};
use nexus_types::{Principal, SessionState};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::resolver::ProfileResolver;

/// Versioned view of the session state.
///
/// The revision increases on every applied transition, letting callers wait
/// for a transition that happened after a point they observed.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub revision: u64,
    pub state: SessionState,
}

/// Injectable session-state container with a subscribe/publish contract.
#[derive(Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<SessionSnapshot>>,
}

impl SessionStore {
    /// Create a store in the initial `Loading` state.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(SessionSnapshot {
            revision: 0,
            state: SessionState::Loading,
        });
        Self { tx: Arc::new(tx) }
    }

    /// The latest session state. Never stale: the watch channel hands out
    /// the current value synchronously.
    pub fn current(&self) -> SessionState {
        self.tx.borrow().state.clone()
    }

    /// Revision of the latest applied transition.
    pub fn revision(&self) -> u64 {
        self.tx.borrow().revision
    }

    /// Subscribe to session transitions.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.tx.subscribe()
    }

    /// Wait until a sign-out applied after revision `since` is observable.
    pub async fn wait_for_signed_out(&self, since: u64) {
        let mut rx = self.tx.subscribe();
        // Infallible: the store itself keeps the sender alive.
        let _ = rx
            .wait_for(|snap| {
                snap.revision > since && matches!(snap.state, SessionState::SignedOut)
            })
            .await;
    }

    pub(crate) fn set(&self, state: SessionState) {
        self.tx.send_modify(|snap| {
            snap.revision += 1;
            snap.state = state;
        });
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &self.tx.borrow().state)
            .finish()
    }
}

/// Resolve a principal (or its absence) into a session state.
async fn state_for<P: ProfileRepository>(
    principal: Option<Principal>,
    resolver: &ProfileResolver<P>,
) -> SessionState {
    match principal {
        None => SessionState::SignedOut,
        Some(principal) if !principal.email_verified => SessionState::Unverified { principal },
        Some(principal) => match resolver.resolve(&principal.uid).await {
            Some(profile) => SessionState::Authenticated { principal, profile },
            None => SessionState::ProfileMissing { principal },
        },
    }
}

/// Bind a store to an identity provider.
///
/// Performs the initial state resolution (the store leaves `Loading` exactly
/// once), then keeps applying provider state-change events for the lifetime
/// of the process. The profile is re-fetched on every sign-in; nothing is
/// cached.
pub async fn spawn_session_listener<I, P>(
    store: SessionStore,
    identity: Arc<I>,
    resolver: ProfileResolver<P>,
) -> JoinHandle<()>
where
    I: IdentityProvider + 'static,
    P: ProfileRepository + 'static,
{
    // Subscribe before the initial read so no transition can slip between.
    let mut events = identity.subscribe();
    let initial = identity.current().await;
    store.set(state_for(initial, &resolver).await);

    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(AuthStateEvent::SignedIn(principal)) => {
                    store.set(state_for(Some(principal), &resolver).await);
                }
                Ok(AuthStateEvent::SignedOut) => {
                    store.set(SessionState::SignedOut);
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "session listener lagged, resynchronizing");
                    let current = identity.current().await;
                    store.set(state_for(current, &resolver).await);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
