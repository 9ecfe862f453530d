//! File record storage
//!
//! One row per distinct path; the content hash is the dedup key. Records
//! sharing a hash under different paths are duplicate content and are all
//! retained — duplicate detection is a query concern, never a deletion
//! concern.

use crate::error::Result;
use shellac_core::{AudioTags, FileRecord, FileRecordId, NewFileRecord, ScanId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

pub(crate) fn record_from_row(row: &SqliteRow) -> FileRecord {
    FileRecord {
        id: row.get("id"),
        path: row.get("path"),
        file_name: row.get("file_name"),
        extension: row.get("extension"),
        content_hash: row.get("content_hash"),
        file_size: row.get("file_size"),
        modified_at: row.get("modified_at"),
        tagged: row.get("tagged"),
        tags: AudioTags {
            title: row.get("title"),
            artist: row.get("artist"),
            album: row.get("album"),
            album_artist: row.get("album_artist"),
            genre: row.get("genre"),
            year: row.get::<Option<i64>, _>("year").map(|y| y as i32),
            track_number: row.get::<Option<i64>, _>("track_number").map(|n| n as u32),
            duration_seconds: row.get("duration_seconds"),
            bitrate: row.get::<Option<i64>, _>("bitrate").map(|b| b as u32),
            sample_rate: row.get::<Option<i64>, _>("sample_rate").map(|s| s as u32),
        },
        first_seen_scan_id: row.get("first_seen_scan_id"),
        last_seen_scan_id: row.get("last_seen_scan_id"),
    }
}

/// Get a file record by ID
pub async fn get_by_id(pool: &SqlitePool, id: FileRecordId) -> Result<Option<FileRecord>> {
    let row = sqlx::query(
        "SELECT id, path, file_name, extension, content_hash, file_size, modified_at, tagged,
                title, artist, album, album_artist, genre, year, track_number, duration_seconds,
                bitrate, sample_rate, first_seen_scan_id, last_seen_scan_id
         FROM file_records WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(record_from_row))
}

/// Find the record for an exact path, if one exists
pub async fn find_by_path(pool: &SqlitePool, path: &str) -> Result<Option<FileRecord>> {
    let row = sqlx::query(
        "SELECT id, path, file_name, extension, content_hash, file_size, modified_at, tagged,
                title, artist, album, album_artist, genre, year, track_number, duration_seconds,
                bitrate, sample_rate, first_seen_scan_id, last_seen_scan_id
         FROM file_records WHERE path = ?",
    )
    .bind(path)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(record_from_row))
}

/// Find every record sharing a content hash, ordered by path
///
/// More than one result means duplicate content (or a rename whose old path
/// is still cataloged).
pub async fn find_by_hash(pool: &SqlitePool, content_hash: &str) -> Result<Vec<FileRecord>> {
    let rows = sqlx::query(
        "SELECT id, path, file_name, extension, content_hash, file_size, modified_at, tagged,
                title, artist, album, album_artist, genre, year, track_number, duration_seconds,
                bitrate, sample_rate, first_seen_scan_id, last_seen_scan_id
         FROM file_records WHERE content_hash = ? ORDER BY path",
    )
    .bind(content_hash)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(record_from_row).collect())
}

/// Insert a new record and its membership row in one transaction
///
/// A record must never exist without at least one membership, so the pair
/// is atomic: either both rows land or neither does.
pub async fn insert_with_membership(
    pool: &SqlitePool,
    new: &NewFileRecord,
    scan_id: ScanId,
) -> Result<FileRecord> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "INSERT INTO file_records
             (path, file_name, extension, content_hash, file_size, modified_at, tagged,
              title, artist, album, album_artist, genre, year, track_number, duration_seconds,
              bitrate, sample_rate, first_seen_scan_id, last_seen_scan_id)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&new.path)
    .bind(&new.file_name)
    .bind(&new.extension)
    .bind(&new.content_hash)
    .bind(new.file_size)
    .bind(new.modified_at)
    .bind(new.tagged())
    .bind(&new.tags.title)
    .bind(&new.tags.artist)
    .bind(&new.tags.album)
    .bind(&new.tags.album_artist)
    .bind(&new.tags.genre)
    .bind(new.tags.year)
    .bind(new.tags.track_number)
    .bind(new.tags.duration_seconds)
    .bind(new.tags.bitrate)
    .bind(new.tags.sample_rate)
    .bind(scan_id)
    .bind(scan_id)
    .execute(&mut *tx)
    .await?;

    let id = result.last_insert_rowid();

    sqlx::query("INSERT INTO scan_files (scan_id, file_record_id) VALUES (?, ?)")
        .bind(scan_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(FileRecord {
        id,
        path: new.path.clone(),
        file_name: new.file_name.clone(),
        extension: new.extension.clone(),
        content_hash: new.content_hash.clone(),
        file_size: new.file_size,
        modified_at: new.modified_at,
        tagged: new.tagged(),
        tags: new.tags.clone(),
        first_seen_scan_id: scan_id,
        last_seen_scan_id: scan_id,
    })
}

/// Refresh an existing record after its path was observed with changed
/// content, mtime, or tags
pub async fn update_observed(
    pool: &SqlitePool,
    id: FileRecordId,
    new: &NewFileRecord,
    scan_id: ScanId,
) -> Result<()> {
    sqlx::query(
        "UPDATE file_records
         SET content_hash = ?, file_size = ?, modified_at = ?, tagged = ?,
             title = ?, artist = ?, album = ?, album_artist = ?, genre = ?, year = ?,
             track_number = ?, duration_seconds = ?, bitrate = ?, sample_rate = ?,
             last_seen_scan_id = ?
         WHERE id = ?",
    )
    .bind(&new.content_hash)
    .bind(new.file_size)
    .bind(new.modified_at)
    .bind(new.tagged())
    .bind(&new.tags.title)
    .bind(&new.tags.artist)
    .bind(&new.tags.album)
    .bind(&new.tags.album_artist)
    .bind(&new.tags.genre)
    .bind(new.tags.year)
    .bind(new.tags.track_number)
    .bind(new.tags.duration_seconds)
    .bind(new.tags.bitrate)
    .bind(new.tags.sample_rate)
    .bind(scan_id)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Bump the last-seen scan without touching content or tags
///
/// No-op when the record was already last seen by this scan, so rescanning
/// an unchanged tree under the same name mutates nothing.
pub async fn touch_last_seen(pool: &SqlitePool, id: FileRecordId, scan_id: ScanId) -> Result<()> {
    sqlx::query(
        "UPDATE file_records SET last_seen_scan_id = ? WHERE id = ? AND last_seen_scan_id <> ?",
    )
    .bind(scan_id)
    .bind(id)
    .bind(scan_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// A set of records sharing one content hash
#[derive(Debug, Clone)]
pub struct DuplicateGroup {
    /// The shared hex digest
    pub content_hash: String,
    /// Records sharing it, ordered by path
    pub records: Vec<FileRecord>,
}

/// Group records whose content hash appears under more than one path
pub async fn duplicate_groups(pool: &SqlitePool) -> Result<Vec<DuplicateGroup>> {
    let rows = sqlx::query(
        "SELECT id, path, file_name, extension, content_hash, file_size, modified_at, tagged,
                title, artist, album, album_artist, genre, year, track_number, duration_seconds,
                bitrate, sample_rate, first_seen_scan_id, last_seen_scan_id
         FROM file_records
         WHERE content_hash IN (
             SELECT content_hash FROM file_records GROUP BY content_hash HAVING COUNT(*) > 1
         )
         ORDER BY content_hash, path",
    )
    .fetch_all(pool)
    .await?;

    let mut groups: Vec<DuplicateGroup> = Vec::new();
    for record in rows.iter().map(record_from_row) {
        match groups.last_mut() {
            Some(group) if group.content_hash == record.content_hash => {
                group.records.push(record);
            }
            _ => groups.push(DuplicateGroup {
                content_hash: record.content_hash.clone(),
                records: vec![record],
            }),
        }
    }

    Ok(groups)
}
