//! Certificate metadata records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Uid;

/// Unique certificate record identifier, assigned by the document store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CertificateId(pub String);

impl CertificateId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CertificateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owner-profile fields denormalized onto each certificate record at upload
/// time, so the staff view can render without a second profile read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub student_name: String,
    pub roll_number: String,
    pub batch: String,
}

/// Metadata for one uploaded certificate file.
///
/// Records are created once and never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateRecord {
    pub id: CertificateId,
    /// Owning student's uid
    pub uid: Uid,
    pub file_name: String,
    pub file_url: String,
    /// Server-assigned upload timestamp; `None` when the server has not yet
    /// resolved it
    pub uploaded_at: Option<DateTime<Utc>>,
    pub snapshot: ProfileSnapshot,
}

impl CertificateRecord {
    /// Ordering key for newest-first views. Unresolved timestamps count as
    /// epoch zero so they sort behind every resolved record.
    pub fn sort_key(&self) -> DateTime<Utc> {
        self.uploaded_at.unwrap_or(DateTime::UNIX_EPOCH)
    }
}
