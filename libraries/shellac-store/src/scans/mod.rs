//! Scan lifecycle storage
//!
//! A scan is created `running`, then marked `complete` exactly once, or
//! `incomplete` on abort. Completed scans are immutable: their name cannot
//! be reused and their membership set is final.
//!
//! # Example
//!
//! ```rust,no_run
//! use shellac_core::ScanCounters;
//! use shellac_store::scans;
//!
//! # async fn example(pool: &sqlx::SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
//! let scan = scans::create(pool, "august-library").await?;
//! // ... pipeline runs ...
//! scans::complete(pool, scan.id, &ScanCounters { num_files: 120, num_tagged: 117, num_errors: 3 }).await?;
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use crate::file_records::record_from_row;
use crate::StoreError;
use shellac_core::{FileRecord, Scan, ScanCounters, ScanId, ScanStatus};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn scan_from_row(row: &SqliteRow) -> Scan {
    let status_str = row.get::<String, _>("status");
    Scan {
        id: row.get("id"),
        name: row.get("name"),
        started_at: row.get("started_at"),
        completed_at: row.get("completed_at"),
        status: ScanStatus::from_str(&status_str).unwrap_or(ScanStatus::Incomplete),
        counters: ScanCounters {
            num_files: row.get("num_files"),
            num_tagged: row.get("num_tagged"),
            num_errors: row.get("num_errors"),
        },
    }
}

/// Get a scan by ID
pub async fn get_by_id(pool: &SqlitePool, id: ScanId) -> Result<Option<Scan>> {
    let row = sqlx::query(
        "SELECT id, name, started_at, completed_at, status, num_files, num_tagged, num_errors
         FROM scans WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(scan_from_row))
}

/// Get a scan by name
pub async fn get_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Scan>> {
    let row = sqlx::query(
        "SELECT id, name, started_at, completed_at, status, num_files, num_tagged, num_errors
         FROM scans WHERE name = ?",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(scan_from_row))
}

/// List all scans, most recent first
pub async fn list(pool: &SqlitePool) -> Result<Vec<Scan>> {
    let rows = sqlx::query(
        "SELECT id, name, started_at, completed_at, status, num_files, num_tagged, num_errors
         FROM scans ORDER BY started_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(scan_from_row).collect())
}

/// Open a scan under the given name
///
/// A fresh name creates a new `running` scan. The name of an interrupted
/// (`running`/`incomplete`) scan resumes that scan, appending to its
/// membership. The name of a `complete` scan is refused: completed scans
/// are immutable.
pub async fn create(pool: &SqlitePool, name: &str) -> Result<Scan> {
    if let Some(existing) = get_by_name(pool, name).await? {
        if existing.status == ScanStatus::Complete {
            return Err(StoreError::NameTaken(name.to_string()));
        }

        sqlx::query("UPDATE scans SET status = 'running', completed_at = NULL WHERE id = ?")
            .bind(existing.id)
            .execute(pool)
            .await?;

        return Ok(Scan {
            status: ScanStatus::Running,
            completed_at: None,
            ..existing
        });
    }

    let now = chrono::Utc::now().timestamp();
    let result = sqlx::query("INSERT INTO scans (name, started_at, status) VALUES (?, ?, 'running')")
        .bind(name)
        .bind(now)
        .execute(pool)
        .await?;

    Ok(Scan {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        started_at: now,
        completed_at: None,
        status: ScanStatus::Running,
        counters: ScanCounters::default(),
    })
}

/// Mark a scan complete, recording its summary counters
///
/// Completion is the barrier after which the scan's membership set is
/// authoritative for diff queries.
pub async fn complete(pool: &SqlitePool, id: ScanId, counters: &ScanCounters) -> Result<()> {
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        "UPDATE scans
         SET status = 'complete', completed_at = ?, num_files = ?, num_tagged = ?, num_errors = ?
         WHERE id = ?",
    )
    .bind(now)
    .bind(counters.num_files)
    .bind(counters.num_tagged)
    .bind(counters.num_errors)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Mark a scan incomplete after an abort or fatal store failure
///
/// Already-persisted file records stay valid; only the membership and
/// completion bookkeeping is partial.
pub async fn mark_incomplete(pool: &SqlitePool, id: ScanId) -> Result<()> {
    let now = chrono::Utc::now().timestamp();

    sqlx::query("UPDATE scans SET status = 'incomplete', completed_at = ? WHERE id = ?")
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

/// File records present in scan `from_name` whose content is absent from
/// scan `to_name` (compared by hash, so renames do not count as diffs)
///
/// Both scans must be `complete`; an incomplete scan is never authoritative.
pub async fn diff(pool: &SqlitePool, from_name: &str, to_name: &str) -> Result<Vec<FileRecord>> {
    let from = get_by_name(pool, from_name)
        .await?
        .ok_or_else(|| StoreError::not_found("Scan", from_name))?;
    let to = get_by_name(pool, to_name)
        .await?
        .ok_or_else(|| StoreError::not_found("Scan", to_name))?;

    for scan in [&from, &to] {
        if !scan.is_authoritative() {
            return Err(StoreError::ScanIncomplete(scan.name.clone()));
        }
    }

    let rows = sqlx::query(
        "SELECT fr.id, fr.path, fr.file_name, fr.extension, fr.content_hash, fr.file_size,
                fr.modified_at, fr.tagged, fr.title, fr.artist, fr.album, fr.album_artist,
                fr.genre, fr.year, fr.track_number, fr.duration_seconds, fr.bitrate,
                fr.sample_rate, fr.first_seen_scan_id, fr.last_seen_scan_id
         FROM file_records fr
         INNER JOIN scan_files sf ON sf.file_record_id = fr.id AND sf.scan_id = ?
         WHERE fr.content_hash NOT IN (
             SELECT fr2.content_hash
             FROM file_records fr2
             INNER JOIN scan_files sf2 ON sf2.file_record_id = fr2.id AND sf2.scan_id = ?
         )
         ORDER BY fr.path",
    )
    .bind(from.id)
    .bind(to.id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(record_from_row).collect())
}
