//! Document store contracts
//!
//! Typed repository interfaces over the external document database. Queries
//! are limited to point reads by key and server-side equality filters, which
//! is all the backing store offers.

use async_trait::async_trait;
use nexus_types::{CertificateRecord, Profile, ProfileSnapshot, Role, Uid};

use crate::error::ProviderResult;

/// Profile collection
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Point read by uid
    async fn get(&self, uid: &Uid) -> ProviderResult<Option<Profile>>;

    /// Write a profile keyed by its uid, overwriting any existing record at
    /// that key
    async fn insert(&self, profile: Profile) -> ProviderResult<()>;

    /// Server-side equality filter on role
    async fn list_by_role(&self, role: Role) -> ProviderResult<Vec<Profile>>;
}

/// Certificate metadata to persist after a blob upload completes.
///
/// The store assigns the record id and the upload timestamp.
#[derive(Debug, Clone)]
pub struct NewCertificate {
    pub uid: Uid,
    pub file_name: String,
    pub file_url: String,
    pub snapshot: ProfileSnapshot,
}

/// Certificate metadata collection
#[async_trait]
pub trait CertificateRepository: Send + Sync {
    /// Persist a new record with a server-assigned id and timestamp
    async fn insert(&self, certificate: NewCertificate) -> ProviderResult<CertificateRecord>;

    /// Server-side equality filter on the owner uid; storage order
    async fn list_by_owner(&self, uid: &Uid) -> ProviderResult<Vec<CertificateRecord>>;
}
