//! File identity types
//!
//! A `FileRecord` is the persisted identity of one file path: its content
//! hash plus extracted tags. The hash is the dedup key, not the path; two
//! records sharing a hash under different paths are duplicate content.

use crate::types::{AudioTags, ScanId};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File record identifier (database rowid)
pub type FileRecordId = i64;

/// One row per distinct file path observed in at least one scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Unique ID
    pub id: FileRecordId,

    /// Absolute file path
    pub path: String,

    /// File name component of the path
    pub file_name: String,

    /// Lowercased extension, if any
    pub extension: Option<String>,

    /// Hex SHA-256 digest of the file contents
    pub content_hash: String,

    /// File size in bytes
    pub file_size: i64,

    /// Filesystem modification time (Unix epoch seconds)
    pub modified_at: i64,

    /// Whether the container yielded any tags
    pub tagged: bool,

    /// Extracted tags
    pub tags: AudioTags,

    /// Scan that first observed this path
    pub first_seen_scan_id: ScanId,

    /// Most recent scan that observed this path
    pub last_seen_scan_id: ScanId,
}

/// Payload for inserting or refreshing a file record
///
/// First/last-seen bookkeeping is filled in by the store from the scan the
/// observation belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFileRecord {
    /// Absolute file path
    pub path: String,

    /// File name component of the path
    pub file_name: String,

    /// Lowercased extension, if any
    pub extension: Option<String>,

    /// Hex SHA-256 digest of the file contents
    pub content_hash: String,

    /// File size in bytes
    pub file_size: i64,

    /// Filesystem modification time (Unix epoch seconds)
    pub modified_at: i64,

    /// Extracted tags
    pub tags: AudioTags,
}

impl NewFileRecord {
    /// Build an observation from a path plus what the pipeline computed
    pub fn new(
        path: &Path,
        content_hash: String,
        file_size: i64,
        modified_at: i64,
        tags: AudioTags,
    ) -> Self {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        Self {
            path: path.display().to_string(),
            file_name,
            extension,
            content_hash,
            file_size,
            modified_at,
            tags,
        }
    }

    /// Whether the container yielded any tags
    #[must_use]
    pub fn tagged(&self) -> bool {
        !self.tags.is_empty()
    }

    /// Whether `existing` already reflects this observation byte for byte
    #[must_use]
    pub fn matches(&self, existing: &FileRecord) -> bool {
        existing.content_hash == self.content_hash
            && existing.file_size == self.file_size
            && existing.modified_at == self.modified_at
            && existing.tags == self.tags
    }
}
