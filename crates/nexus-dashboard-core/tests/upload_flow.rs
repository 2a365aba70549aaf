//! Upload round-trip flows against the in-memory backend

use std::sync::Arc;

use chrono::Utc;
use nexus_dashboard_core::{CertificateService, DashboardError, UploadProgress};
use nexus_providers::{MemoryBlobs, MemoryCertificates};
use nexus_types::Uid;
use tokio::sync::mpsc;

fn owner() -> nexus_types::StudentProfile {
    nexus_types::StudentProfile {
        uid: Uid::from("s-1"),
        name: "Asha Rao".to_string(),
        email: "asha@college.edu".to_string(),
        roll_number: "IT-042".to_string(),
        batch: "2024".to_string(),
        phone: "5550100".to_string(),
        created_at: Utc::now(),
    }
}

fn service() -> (
    CertificateService<MemoryCertificates, MemoryBlobs>,
    Arc<MemoryBlobs>,
) {
    let blobs = Arc::new(MemoryBlobs::new());
    let service = CertificateService::new(Arc::new(MemoryCertificates::new()), Arc::clone(&blobs));
    (service, blobs)
}

#[tokio::test]
async fn test_upload_then_list_round_trip() {
    let (service, _) = service();
    let owner = owner();

    let uploaded = service
        .upload(&owner, "degree.pdf", vec![9u8; 1024], None)
        .await
        .unwrap();
    assert_eq!(uploaded.file_name, "degree.pdf");
    assert_eq!(uploaded.uid, owner.uid);
    assert!(uploaded.uploaded_at.is_some());
    assert_eq!(uploaded.snapshot.roll_number, "IT-042");

    let listed = service.list_own(&owner.uid).await.unwrap();
    let matching: Vec<_> = listed
        .iter()
        .filter(|r| r.file_name == "degree.pdf" && r.uid == owner.uid)
        .collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].id, uploaded.id);
}

#[tokio::test]
async fn test_upload_reports_monotonic_progress() {
    let (service, _) = service();
    let owner = owner();
    let (tx, mut rx) = mpsc::channel::<UploadProgress>(64);

    service
        .upload(&owner, "marksheet.pdf", vec![3u8; 700_000], Some(tx))
        .await
        .unwrap();

    let mut fractions = Vec::new();
    while let Ok(progress) = rx.try_recv() {
        assert!(progress.fraction <= 1.0);
        fractions.push(progress.fraction);
    }
    assert!(!fractions.is_empty());
    assert!(fractions.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(*fractions.last().unwrap(), 1.0);
}

#[tokio::test]
async fn test_failed_upload_writes_no_metadata_and_orphans_blob() {
    let (service, blobs) = service();
    let owner = owner();
    blobs.fail_uploads("connection reset");

    let err = service
        .upload(&owner, "degree.pdf", vec![9u8; 64], None)
        .await
        .unwrap_err();
    assert!(matches!(err, DashboardError::UploadFailed(_)));

    // No metadata record was created, but the partially written blob is
    // left behind.
    assert!(service.list_own(&owner.uid).await.unwrap().is_empty());
    assert_eq!(blobs.len(), 1);
}

#[tokio::test]
async fn test_student_view_sorted_staff_view_storage_order() {
    let (service, _) = service();
    let owner = owner();

    for name in ["first.pdf", "second.pdf", "third.pdf"] {
        service
            .upload(&owner, name, vec![1u8; 16], None)
            .await
            .unwrap();
    }

    let staff_view = service.list_for_staff(&owner.uid).await.unwrap();
    let staff_order: Vec<&str> = staff_view.iter().map(|r| r.file_name.as_str()).collect();
    assert_eq!(staff_order, vec!["first.pdf", "second.pdf", "third.pdf"]);

    let own_view = service.list_own(&owner.uid).await.unwrap();
    assert_eq!(own_view.len(), 3);
    // Newest first: timestamps are non-decreasing in upload order, so the
    // sorted view never places an earlier upload before a later one.
    assert!(own_view
        .windows(2)
        .all(|w| w[0].sort_key() >= w[1].sort_key()));
}
