//! Certificate listing and upload

use std::sync::Arc;

use chrono::Utc;
use nexus_providers::{BlobStore, CertificateRepository, NewCertificate, UploadEvent};
use nexus_types::{CertificateRecord, ProfileSnapshot, StudentProfile, Uid};
use tokio::sync::mpsc;

use crate::error::DashboardError;

/// Fractional upload progress forwarded to the caller's side channel.
#[derive(Debug, Clone, Copy)]
pub struct UploadProgress {
    pub fraction: f64,
    pub bytes_transferred: u64,
    pub total_bytes: u64,
}

/// Certificate reads and uploads.
pub struct CertificateService<C, B> {
    certificates: Arc<C>,
    blobs: Arc<B>,
}

impl<C: CertificateRepository, B: BlobStore> CertificateService<C, B> {
    pub fn new(certificates: Arc<C>, blobs: Arc<B>) -> Self {
        Self {
            certificates,
            blobs,
        }
    }

    /// A student's own certificates, newest first. Records without a
    /// resolved timestamp sort last.
    pub async fn list_own(&self, uid: &Uid) -> Result<Vec<CertificateRecord>, DashboardError> {
        let mut records = self.fetch(uid).await?;
        sort_newest_first(&mut records);
        Ok(records)
    }

    /// Certificates for the staff detail view: storage order, no client
    /// sort.
    pub async fn list_for_staff(
        &self,
        uid: &Uid,
    ) -> Result<Vec<CertificateRecord>, DashboardError> {
        self.fetch(uid).await
    }

    /// Upload a certificate blob, then record its metadata.
    ///
    /// The blob lands under a path namespaced by the owner uid with a
    /// collision-avoiding name. The metadata record is only written after
    /// the blob upload reports completion; a failed upload surfaces as
    /// `UploadFailed` and any partially written blob is left in place.
    /// Progress events are forwarded to `progress` on a best-effort basis;
    /// a slow or dropped receiver never affects the upload.
    pub async fn upload(
        &self,
        owner: &StudentProfile,
        file_name: &str,
        bytes: Vec<u8>,
        progress: Option<mpsc::Sender<UploadProgress>>,
    ) -> Result<CertificateRecord, DashboardError> {
        let path = format!(
            "students/{}/certificates/{}_{}",
            owner.uid,
            Utc::now().timestamp_millis(),
            file_name
        );

        let mut events = self.blobs.upload_resumable(&path, bytes);
        let mut download_url = None;

        while let Some(event) = events.recv().await {
            match event {
                UploadEvent::Progress {
                    bytes_transferred,
                    total_bytes,
                } => {
                    if let Some(tx) = &progress {
                        let fraction = if total_bytes == 0 {
                            1.0
                        } else {
                            bytes_transferred as f64 / total_bytes as f64
                        };
                        let _ = tx.try_send(UploadProgress {
                            fraction,
                            bytes_transferred,
                            total_bytes,
                        });
                    }
                }
                UploadEvent::Completed { download_url: url } => {
                    download_url = Some(url);
                    break;
                }
                UploadEvent::Failed { reason } => {
                    tracing::error!(path = %path, reason = %reason, "certificate upload failed");
                    return Err(DashboardError::UploadFailed(reason));
                }
            }
        }

        let file_url = download_url.ok_or_else(|| {
            DashboardError::UploadFailed("upload ended without a terminal event".to_string())
        })?;

        self.certificates
            .insert(NewCertificate {
                uid: owner.uid.clone(),
                file_name: file_name.to_string(),
                file_url,
                snapshot: ProfileSnapshot {
                    student_name: owner.name.clone(),
                    roll_number: owner.roll_number.clone(),
                    batch: owner.batch.clone(),
                },
            })
            .await
            .map_err(|err| {
                tracing::error!(
                    path = %path,
                    error = %err,
                    "metadata write failed after blob upload"
                );
                DashboardError::UploadFailed(err.to_string())
            })
    }

    async fn fetch(&self, uid: &Uid) -> Result<Vec<CertificateRecord>, DashboardError> {
        self.certificates.list_by_owner(uid).await.map_err(|err| {
            tracing::error!(%uid, error = %err, "certificate query failed");
            DashboardError::QueryFailed(err.to_string())
        })
    }
}

/// Order records newest first. Unresolved timestamps count as epoch zero and
/// land at the end; the sort is stable, so ties keep storage order.
pub fn sort_newest_first(records: &mut [CertificateRecord]) {
    records.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
}

impl<C, B> std::fmt::Debug for CertificateService<C, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CertificateService").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::sort_newest_first;
    use chrono::{DateTime, Duration, Utc};
    use nexus_types::{CertificateId, CertificateRecord, ProfileSnapshot, Uid};

    fn record(file_name: &str, uploaded_at: Option<DateTime<Utc>>) -> CertificateRecord {
        CertificateRecord {
            id: CertificateId::generate(),
            uid: Uid::from("s-1"),
            file_name: file_name.to_string(),
            file_url: format!("memory://{file_name}"),
            uploaded_at,
            snapshot: ProfileSnapshot {
                student_name: "Asha".to_string(),
                roll_number: "IT-042".to_string(),
                batch: "2024".to_string(),
            },
        }
    }

    #[test]
    fn test_newest_first_with_unresolved_timestamps_last() {
        let base = Utc::now();
        let t1 = base - Duration::hours(3);
        let t2 = base - Duration::hours(2);
        let t3 = base - Duration::hours(1);

        // Storage order T2, T1, T3 plus one unresolved timestamp.
        let mut records = vec![
            record("t2.pdf", Some(t2)),
            record("t1.pdf", Some(t1)),
            record("t3.pdf", Some(t3)),
            record("pending.pdf", None),
        ];
        sort_newest_first(&mut records);

        let order: Vec<&str> = records.iter().map(|r| r.file_name.as_str()).collect();
        assert_eq!(order, vec!["t3.pdf", "t2.pdf", "t1.pdf", "pending.pdf"]);
    }
}
