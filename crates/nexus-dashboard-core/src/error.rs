//! Dashboard errors

use thiserror::Error;

/// Errors surfaced by the dashboard query layer
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A collection query against the document store failed
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// A certificate upload failed, carrying the transport reason
    #[error("upload failed: {0}")]
    UploadFailed(String),
}

impl DashboardError {
    /// Stable error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::QueryFailed(_) => "QUERY_FAILED",
            Self::UploadFailed(_) => "UPLOAD_FAILED",
        }
    }
}
