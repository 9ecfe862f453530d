//! Scan reconciliation
//!
//! Drives the full pipeline for one named scan: walk the root, hash and
//! tag each candidate on a bounded worker pool, then classify the
//! observation against the store and persist it together with its scan
//! membership. Per-file failures are recorded as skipped; only store
//! failures and cancellation abort the run, leaving the scan `incomplete`.

use crate::error::{Result, ScanError};
use crate::hasher::hash_file;
use crate::walker::{WalkEntry, Walker};
use shellac_core::{NewFileRecord, ScanCounters, ScanId};
use shellac_metadata::read_tags_or_empty;
use shellac_store::{file_records, memberships, scans};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// What the reconciler decided for one persisted file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Path and content both unseen before; record inserted
    New,
    /// Path known; content, mtime, or tags changed; record refreshed
    Updated,
    /// Path known and identical to the stored record
    Unchanged,
    /// Path unseen but content hash already cataloged under other path(s);
    /// a second record now shares the hash
    Duplicate,
}

/// Per-scan accounting
///
/// Every discovered path lands in exactly one bucket: one of the persisted
/// outcomes, or skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanSummary {
    /// Candidate paths the walker produced (including unreadable ones)
    pub discovered: u64,

    /// Files persisted for the first time
    pub new_files: u64,

    /// Files whose record was refreshed
    pub updated: u64,

    /// Files identical to their stored record
    pub unchanged: u64,

    /// Files persisted as duplicate content of another path
    pub duplicates: u64,

    /// Files skipped on read or hash failure
    pub skipped: u64,

    /// Persisted files whose container yielded tags
    pub tagged: u64,
}

impl ScanSummary {
    /// Files that reached the store in any outcome
    #[must_use]
    pub fn persisted(&self) -> u64 {
        self.new_files + self.updated + self.unchanged + self.duplicates
    }

    fn record(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::New => self.new_files += 1,
            FileOutcome::Updated => self.updated += 1,
            FileOutcome::Unchanged => self.unchanged += 1,
            FileOutcome::Duplicate => self.duplicates += 1,
        }
    }

    fn counters(&self) -> ScanCounters {
        ScanCounters {
            num_files: self.persisted() as i64,
            num_tagged: self.tagged as i64,
            num_errors: self.skipped as i64,
        }
    }
}

/// Orchestrator for one scan run
pub struct ScanReconciler {
    pool: SqlitePool,
    workers: usize,
    follow_links: bool,
    cancelled: Arc<AtomicBool>,
}

impl ScanReconciler {
    /// Create a reconciler writing through the given pool
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            workers: num_cpus::get(),
            follow_links: false,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Set the hashing/tagging worker count (default: num_cpus)
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Set whether the walker follows symbolic links
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Flag that aborts the run when set (e.g. from a ctrl-c handler)
    ///
    /// An aborted scan is marked `incomplete`; records persisted before the
    /// abort remain valid.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Run a full scan of `root` under the given scan name
    ///
    /// # Errors
    /// Fatal cases only: invalid root, store failure, cancellation. All of
    /// them leave the scan record non-`complete`.
    pub async fn run(&self, root: &Path, scan_name: &str) -> Result<ScanSummary> {
        let start_time = Instant::now();

        // Root validation happens before any scan row is written
        let entries = Walker::new().follow_links(self.follow_links).walk(root)?;

        let scan = scans::create(&self.pool, scan_name).await?;
        info!(
            "scan '{}' (#{}) started over {}",
            scan.name,
            scan.id,
            root.display()
        );

        let mut summary = ScanSummary::default();
        match self.drive(scan.id, entries, &mut summary).await {
            Ok(()) => {
                // Completion is a barrier: every discovered path has been
                // persisted or skipped by this point.
                scans::complete(&self.pool, scan.id, &summary.counters()).await?;
                info!(
                    "scan '{}' complete in {:.1?}: {} discovered, {} new, {} updated, {} unchanged, {} duplicate, {} skipped",
                    scan.name,
                    start_time.elapsed(),
                    summary.discovered,
                    summary.new_files,
                    summary.updated,
                    summary.unchanged,
                    summary.duplicates,
                    summary.skipped
                );
                Ok(summary)
            }
            Err(err) => {
                if let Err(mark_err) = scans::mark_incomplete(&self.pool, scan.id).await {
                    warn!(
                        "could not mark scan '{}' incomplete: {}",
                        scan.name, mark_err
                    );
                }
                info!("scan '{}' left incomplete: {}", scan.name, err);
                Err(err)
            }
        }
    }

    /// Pump walker entries through the worker pool and into the store
    async fn drive(
        &self,
        scan_id: ScanId,
        entries: crate::walker::AudioFiles,
        summary: &mut ScanSummary,
    ) -> Result<()> {
        let (tx, mut rx) = mpsc::channel::<WalkEntry>(self.workers * 2);

        // The walker blocks on directory I/O, so it runs off the async
        // runtime as the single producer.
        let producer = tokio::task::spawn_blocking(move || {
            for entry in entries {
                if tx.blocking_send(entry).is_err() {
                    break;
                }
            }
        });

        let mut tasks: JoinSet<(PathBuf, std::io::Result<NewFileRecord>)> = JoinSet::new();
        let mut result = Ok(());

        while let Some(entry) = rx.recv().await {
            if self.cancelled.load(Ordering::SeqCst) {
                result = Err(ScanError::Cancelled);
                break;
            }

            match entry {
                WalkEntry::Audio(path) => {
                    summary.discovered += 1;

                    // Bounded in-flight window; store writes stay on this
                    // task, serialized
                    while tasks.len() >= self.workers {
                        if let Some(joined) = tasks.join_next().await {
                            if let Err(err) =
                                self.reconcile_observation(scan_id, joined, summary).await
                            {
                                result = Err(err);
                                break;
                            }
                        }
                    }
                    if result.is_err() {
                        break;
                    }

                    tasks.spawn_blocking(move || {
                        let observed = observe(&path);
                        (path, observed)
                    });
                }
                WalkEntry::Skipped { path, error } => {
                    summary.discovered += 1;
                    summary.skipped += 1;
                    match path {
                        Some(path) => warn!("skipping {}: {}", path.display(), error),
                        None => warn!("skipping unreadable entry: {}", error),
                    }
                }
            }
        }

        drop(rx);
        producer.abort();

        if result.is_ok() {
            while let Some(joined) = tasks.join_next().await {
                if let Err(err) = self.reconcile_observation(scan_id, joined, summary).await {
                    result = Err(err);
                    break;
                }
            }
        }

        if result.is_err() {
            tasks.shutdown().await;
        }

        result
    }

    async fn reconcile_observation(
        &self,
        scan_id: ScanId,
        joined: std::result::Result<(PathBuf, std::io::Result<NewFileRecord>), tokio::task::JoinError>,
        summary: &mut ScanSummary,
    ) -> Result<()> {
        let (path, observed) = joined.map_err(|e| ScanError::Worker(e.to_string()))?;

        let observed = match observed {
            Ok(observed) => observed,
            Err(err) => {
                warn!("skipping {}: {}", path.display(), err);
                summary.skipped += 1;
                return Ok(());
            }
        };

        let outcome = self.classify(scan_id, &observed).await?;
        if observed.tagged() {
            summary.tagged += 1;
        }
        summary.record(outcome);
        debug!("{}: {:?}", path.display(), outcome);

        Ok(())
    }

    /// Decide insert / update / leave-untouched for one observation
    async fn classify(&self, scan_id: ScanId, observed: &NewFileRecord) -> Result<FileOutcome> {
        if let Some(existing) = file_records::find_by_path(&self.pool, &observed.path).await? {
            if observed.matches(&existing) {
                file_records::touch_last_seen(&self.pool, existing.id, scan_id).await?;
                memberships::add(&self.pool, scan_id, existing.id).await?;
                return Ok(FileOutcome::Unchanged);
            }

            file_records::update_observed(&self.pool, existing.id, observed, scan_id).await?;
            memberships::add(&self.pool, scan_id, existing.id).await?;
            return Ok(FileOutcome::Updated);
        }

        // New path: same content elsewhere means duplicate or rename. Both
        // paths are retained under the shared hash; nothing is discarded.
        let same_content = file_records::find_by_hash(&self.pool, &observed.content_hash).await?;
        file_records::insert_with_membership(&self.pool, observed, scan_id).await?;

        if same_content.is_empty() {
            Ok(FileOutcome::New)
        } else {
            debug!(
                "{} duplicates content of {} other path(s)",
                observed.path,
                same_content.len()
            );
            Ok(FileOutcome::Duplicate)
        }
    }
}

/// Hash, stat, and tag one file (runs on the blocking pool)
///
/// The hash is always recomputed from the bytes; it is never inferred from
/// the path or mtime.
fn observe(path: &Path) -> std::io::Result<NewFileRecord> {
    let meta = std::fs::metadata(path)?;
    let modified_at = meta
        .modified()
        .map(|t| {
            t.duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs() as i64)
                .unwrap_or(0)
        })
        .unwrap_or(0);

    let content_hash = hash_file(path)?;
    let tags = read_tags_or_empty(path);

    Ok(NewFileRecord::new(
        path,
        content_hash,
        meta.len() as i64,
        modified_at,
        tags,
    ))
}
