//! Blob store contract

use tokio::sync::mpsc;

/// Event emitted by a resumable upload.
///
/// A stream yields zero or more `Progress` events followed by exactly one
/// terminal `Completed` or `Failed` event.
#[derive(Debug, Clone)]
pub enum UploadEvent {
    Progress {
        bytes_transferred: u64,
        total_bytes: u64,
    },
    Completed {
        download_url: String,
    },
    Failed {
        reason: String,
    },
}

/// External blob store.
///
/// Uploads are fire-and-forget once started: there is no cancellation token
/// and no timeout, and a failed upload leaves any partially written blob in
/// place.
pub trait BlobStore: Send + Sync {
    /// Start a resumable upload and return its event stream.
    fn upload_resumable(&self, path: &str, bytes: Vec<u8>) -> mpsc::Receiver<UploadEvent>;
}
