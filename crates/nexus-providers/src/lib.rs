//! Nexus Providers - Backend-as-a-service contracts
//!
//! Abstract interfaces for the three external collaborators the portal
//! delegates to:
//! - identity provider (credential verification, email verification, session
//!   state changes)
//! - document store (profiles and certificate metadata)
//! - blob store (resumable certificate uploads)
//!
//! The [`memory`] module provides an embedded reference backend used by the
//! service binary and the test suite.

pub mod blobs;
pub mod documents;
pub mod error;
pub mod identity;
pub mod memory;

pub use blobs::{BlobStore, UploadEvent};
pub use documents::{CertificateRepository, NewCertificate, ProfileRepository};
pub use error::{ProviderError, ProviderResult};
pub use identity::{AuthStateEvent, IdentityProvider};
pub use memory::{MemoryBlobs, MemoryCertificates, MemoryIdentity, MemoryProfiles};
