//! Application state

use std::sync::Arc;

use nexus_auth_core::{spawn_session_listener, AuthGateway, ProfileResolver, SessionStore};
use nexus_dashboard_core::{CertificateService, StudentDirectory};
use nexus_providers::{MemoryBlobs, MemoryCertificates, MemoryIdentity, MemoryProfiles};

use crate::config::Config;

/// Type aliases binding the core services to the embedded backend
pub type Gateway = AuthGateway<MemoryIdentity, MemoryProfiles>;
pub type Directory = StudentDirectory<MemoryProfiles>;
pub type Certificates = CertificateService<MemoryCertificates, MemoryBlobs>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Auth gateway for register/login/logout
    pub gateway: Arc<Gateway>,
    /// Session-state container observed by every routing decision
    pub store: SessionStore,
    /// Staff roster queries
    pub directory: Arc<Directory>,
    /// Certificate reads and uploads
    pub certificates: Arc<Certificates>,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create application state over the embedded backend and bind the
    /// session listener.
    pub async fn new(config: Config) -> Self {
        let identity = Arc::new(MemoryIdentity::new());
        let profiles = Arc::new(MemoryProfiles::new());
        let certificate_repo = Arc::new(MemoryCertificates::new());
        let blobs = Arc::new(MemoryBlobs::new());
        let store = SessionStore::new();

        // Detach the listener: it lives as long as the process.
        let _ = spawn_session_listener(
            store.clone(),
            Arc::clone(&identity),
            ProfileResolver::new(Arc::clone(&profiles)),
        )
        .await;

        Self {
            gateway: Arc::new(AuthGateway::new(
                identity,
                Arc::clone(&profiles),
                store.clone(),
            )),
            store,
            directory: Arc::new(StudentDirectory::new(profiles)),
            certificates: Arc::new(CertificateService::new(certificate_repo, blobs)),
            config: Arc::new(config),
        }
    }
}
