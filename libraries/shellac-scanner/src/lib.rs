//! Shellac Scanner
//!
//! The scan pipeline: recursive directory traversal, per-file content
//! hashing, tag extraction, and reconciliation against a named scan record
//! in the store.
//!
//! Data flow: [`Walker`] → path → hash + tags (bounded worker pool) →
//! [`ScanReconciler`] → store.
//!
//! # Example
//!
//! ```rust,no_run
//! use shellac_scanner::ScanReconciler;
//! use std::path::Path;
//!
//! # async fn example(pool: sqlx::SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
//! let reconciler = ScanReconciler::new(pool).workers(4);
//! let summary = reconciler.run(Path::new("/music"), "2026-08-nas").await?;
//! println!("{} files cataloged", summary.persisted());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod error;
mod hasher;
mod reconciler;
mod walker;

pub use error::{Result, ScanError};
pub use hasher::hash_file;
pub use reconciler::{FileOutcome, ScanReconciler, ScanSummary};
pub use walker::{AudioFiles, WalkEntry, Walker};
