//! Embedded reference backend
//!
//! In-memory implementations of the provider contracts, used by the service
//! binary and the test suite. Credential storage uses argon2 password
//! hashing; everything else is DashMap- and channel-backed.

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{broadcast, mpsc};

use nexus_types::{CertificateId, CertificateRecord, Principal, Profile, Role, Uid};

use crate::blobs::{BlobStore, UploadEvent};
use crate::documents::{CertificateRepository, NewCertificate, ProfileRepository};
use crate::error::{ProviderError, ProviderResult};
use crate::identity::{AuthStateEvent, IdentityProvider};

/// Minimum password length accepted at sign-up, matching the managed
/// provider's policy.
const MIN_PASSWORD_LEN: usize = 6;

/// Progress granularity for simulated resumable uploads.
const UPLOAD_CHUNK_BYTES: u64 = 256 * 1024;

#[derive(Debug, Clone)]
struct Account {
    uid: Uid,
    email: String,
    password_hash: String,
    email_verified: bool,
}

impl Account {
    fn principal(&self) -> Principal {
        Principal {
            uid: self.uid.clone(),
            email: self.email.clone(),
            email_verified: self.email_verified,
        }
    }
}

/// In-memory identity provider
pub struct MemoryIdentity {
    accounts: DashMap<String, Account>,
    email_by_uid: DashMap<String, String>,
    current: Mutex<Option<Principal>>,
    events: broadcast::Sender<AuthStateEvent>,
}

impl MemoryIdentity {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            accounts: DashMap::new(),
            email_by_uid: DashMap::new(),
            current: Mutex::new(None),
            events,
        }
    }

    /// Out-of-band verification action: the user clicked the emailed link.
    ///
    /// Flips the account's verified flag. The change is visible on the next
    /// sign-in; no state-change event fires, matching the managed provider.
    pub fn complete_email_verification(&self, uid: &Uid) -> ProviderResult<()> {
        let email = self
            .email_by_uid
            .get(uid.as_str())
            .map(|e| e.value().clone())
            .ok_or(ProviderError::NotFound)?;
        let mut account = self.accounts.get_mut(&email).ok_or(ProviderError::NotFound)?;
        account.email_verified = true;
        Ok(())
    }

    fn set_current(&self, principal: Option<Principal>) {
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *current = principal;
    }

    fn hash_password(password: &str) -> ProviderResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| ProviderError::Unavailable(e.to_string()))
    }

    fn verify_password(password: &str, stored: &str) -> bool {
        PasswordHash::new(stored)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

impl Default for MemoryIdentity {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentity {
    async fn sign_up(&self, email: &str, password: &str) -> ProviderResult<Principal> {
        if password.len() < MIN_PASSWORD_LEN {
            return Err(ProviderError::WeakPassword(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        if self.accounts.contains_key(email) {
            return Err(ProviderError::EmailTaken);
        }

        let account = Account {
            uid: Uid::generate(),
            email: email.to_string(),
            password_hash: Self::hash_password(password)?,
            email_verified: false,
        };
        let principal = account.principal();

        self.email_by_uid
            .insert(account.uid.as_str().to_string(), account.email.clone());
        self.accounts.insert(account.email.clone(), account);

        self.set_current(Some(principal.clone()));
        let _ = self.events.send(AuthStateEvent::SignedIn(principal.clone()));
        Ok(principal)
    }

    async fn sign_in(&self, email: &str, password: &str) -> ProviderResult<Principal> {
        let account = self
            .accounts
            .get(email)
            .map(|a| a.value().clone())
            .ok_or(ProviderError::InvalidCredentials)?;

        if !Self::verify_password(password, &account.password_hash) {
            return Err(ProviderError::InvalidCredentials);
        }

        let principal = account.principal();
        self.set_current(Some(principal.clone()));
        let _ = self.events.send(AuthStateEvent::SignedIn(principal.clone()));
        Ok(principal)
    }

    async fn send_verification_email(&self, uid: &Uid) -> ProviderResult<()> {
        if !self.email_by_uid.contains_key(uid.as_str()) {
            return Err(ProviderError::NotFound);
        }
        tracing::debug!(%uid, "verification email queued");
        Ok(())
    }

    async fn sign_out(&self) -> ProviderResult<()> {
        self.set_current(None);
        let _ = self.events.send(AuthStateEvent::SignedOut);
        Ok(())
    }

    async fn current(&self) -> Option<Principal> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthStateEvent> {
        self.events.subscribe()
    }
}

/// In-memory profile collection
#[derive(Default)]
pub struct MemoryProfiles {
    profiles: DashMap<String, Profile>,
}

impl MemoryProfiles {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for MemoryProfiles {
    async fn get(&self, uid: &Uid) -> ProviderResult<Option<Profile>> {
        Ok(self.profiles.get(uid.as_str()).map(|p| p.value().clone()))
    }

    async fn insert(&self, profile: Profile) -> ProviderResult<()> {
        self.profiles
            .insert(profile.uid().as_str().to_string(), profile);
        Ok(())
    }

    async fn list_by_role(&self, role: Role) -> ProviderResult<Vec<Profile>> {
        Ok(self
            .profiles
            .iter()
            .filter(|p| p.value().role() == role)
            .map(|p| p.value().clone())
            .collect())
    }
}

/// In-memory certificate metadata collection.
///
/// Backed by a Vec so "storage order" is insertion order.
#[derive(Default)]
pub struct MemoryCertificates {
    records: Mutex<Vec<CertificateRecord>>,
}

impl MemoryCertificates {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CertificateRepository for MemoryCertificates {
    async fn insert(&self, certificate: NewCertificate) -> ProviderResult<CertificateRecord> {
        let record = CertificateRecord {
            id: CertificateId::generate(),
            uid: certificate.uid,
            file_name: certificate.file_name,
            file_url: certificate.file_url,
            uploaded_at: Some(Utc::now()),
            snapshot: certificate.snapshot,
        };
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(record)
    }

    async fn list_by_owner(&self, uid: &Uid) -> ProviderResult<Vec<CertificateRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| &r.uid == uid)
            .cloned()
            .collect())
    }
}

/// In-memory blob store with simulated chunked progress.
pub struct MemoryBlobs {
    objects: Arc<DashMap<String, Vec<u8>>>,
    fail_reason: Mutex<Option<String>>,
}

impl MemoryBlobs {
    pub fn new() -> Self {
        Self {
            objects: Arc::new(DashMap::new()),
            fail_reason: Mutex::new(None),
        }
    }

    /// Make every subsequent upload fail after its bytes are written,
    /// modeling a terminal transport error that leaves the blob orphaned.
    pub fn fail_uploads(&self, reason: &str) {
        let mut fail = self
            .fail_reason
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *fail = Some(reason.to_string());
    }

    pub fn contains(&self, path: &str) -> bool {
        self.objects.contains_key(path)
    }

    /// Number of stored blobs, orphaned ones included.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for MemoryBlobs {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobStore for MemoryBlobs {
    fn upload_resumable(&self, path: &str, bytes: Vec<u8>) -> mpsc::Receiver<UploadEvent> {
        let (tx, rx) = mpsc::channel(16);
        let objects = Arc::clone(&self.objects);
        let fail = self
            .fail_reason
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let path = path.to_string();

        tokio::spawn(async move {
            let total_bytes = bytes.len() as u64;
            let mut sent = 0u64;
            loop {
                sent = (sent + UPLOAD_CHUNK_BYTES).min(total_bytes);
                let _ = tx
                    .send(UploadEvent::Progress {
                        bytes_transferred: sent,
                        total_bytes,
                    })
                    .await;
                if sent >= total_bytes {
                    break;
                }
            }

            // The bytes land before the terminal event either way: a failed
            // upload leaves an orphaned blob behind.
            objects.insert(path.clone(), bytes);

            let terminal = match fail {
                Some(reason) => UploadEvent::Failed { reason },
                None => UploadEvent::Completed {
                    download_url: format!("memory://{path}"),
                },
            };
            let _ = tx.send(terminal).await;
        });

        rx
    }
}
