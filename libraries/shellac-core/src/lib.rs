//! Shellac Core
//!
//! Domain types shared by the shellac catalog pipeline and storage layer.
//!
//! This crate defines:
//! - **Scan bookkeeping**: [`Scan`], [`ScanStatus`], [`ScanCounters`]
//! - **File identity**: [`FileRecord`], [`NewFileRecord`]
//! - **Extracted tags**: [`AudioTags`]
//!
//! # Example
//!
//! ```rust
//! use shellac_core::{AudioTags, ScanStatus};
//!
//! let tags = AudioTags::default();
//! assert!(tags.is_empty());
//! assert_eq!(ScanStatus::from_str("complete"), Some(ScanStatus::Complete));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod types;

pub use types::{
    AudioTags, FileRecord, FileRecordId, NewFileRecord, Scan, ScanCounters, ScanId, ScanStatus,
};
