//! Scan membership storage
//!
//! The `scan_files` table links each scan to the set of file records
//! observed during it, supporting "in scan A but not scan B" queries.
//! Membership rows are written while a scan runs and are final once the
//! scan completes.

use crate::error::Result;
use crate::file_records::record_from_row;
use shellac_core::{FileRecord, FileRecordId, ScanId};
use sqlx::{Row, SqlitePool};

/// Record that a scan observed a file record
///
/// Idempotent: re-observing the same record within one scan (e.g. after a
/// resumed run) inserts nothing.
pub async fn add(pool: &SqlitePool, scan_id: ScanId, file_record_id: FileRecordId) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO scan_files (scan_id, file_record_id) VALUES (?, ?)")
        .bind(scan_id)
        .bind(file_record_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Whether a scan observed a file record
pub async fn contains(
    pool: &SqlitePool,
    scan_id: ScanId,
    file_record_id: FileRecordId,
) -> Result<bool> {
    let row = sqlx::query(
        "SELECT 1 AS present FROM scan_files WHERE scan_id = ? AND file_record_id = ?",
    )
    .bind(scan_id)
    .bind(file_record_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.is_some())
}

/// Number of file records observed by a scan
pub async fn count_for_scan(pool: &SqlitePool, scan_id: ScanId) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS n FROM scan_files WHERE scan_id = ?")
        .bind(scan_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get("n"))
}

/// All file records observed by a scan, ordered by path
pub async fn file_records_for_scan(pool: &SqlitePool, scan_id: ScanId) -> Result<Vec<FileRecord>> {
    let rows = sqlx::query(
        "SELECT fr.id, fr.path, fr.file_name, fr.extension, fr.content_hash, fr.file_size,
                fr.modified_at, fr.tagged, fr.title, fr.artist, fr.album, fr.album_artist,
                fr.genre, fr.year, fr.track_number, fr.duration_seconds, fr.bitrate,
                fr.sample_rate, fr.first_seen_scan_id, fr.last_seen_scan_id
         FROM file_records fr
         INNER JOIN scan_files sf ON sf.file_record_id = fr.id
         WHERE sf.scan_id = ?
         ORDER BY fr.path",
    )
    .bind(scan_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(record_from_row).collect())
}
