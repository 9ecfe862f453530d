//! Error types for the scan pipeline

use thiserror::Error;

/// Result type alias using `ScanError`
pub type Result<T> = std::result::Result<T, ScanError>;

/// Errors that abort a scan
///
/// Per-file failures (unreadable entries, mid-read I/O errors, malformed
/// tags) never surface here; the reconciler records them as skipped or
/// degraded and keeps going. These variants are the fatal cases.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan root does not exist or is not a directory: {0}")]
    InvalidRoot(String),

    #[error("Store error: {0}")]
    Store(#[from] shellac_store::StoreError),

    #[error("scan cancelled")]
    Cancelled,

    #[error("worker task failed: {0}")]
    Worker(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
