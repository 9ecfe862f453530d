/// Store-specific errors
use thiserror::Error;

/// Result type alias using `StoreError`
pub(crate) type Result<T> = std::result::Result<T, StoreError>;

/// Store error types
#[derive(Error, Debug)]
pub enum StoreError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind (e.g. "Scan")
        entity: String,
        /// Identifier that missed
        id: String,
    },

    /// Scan name already used by a completed, immutable scan
    #[error("scan name already used by a completed scan: {0}")]
    NameTaken(String),

    /// Diff requested over a scan that never completed
    #[error("scan is not complete and cannot be diffed: {0}")]
    ScanIncomplete(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}
