//! Scan bookkeeping types
//!
//! A scan is one named traversal run over a directory tree. Scans are never
//! deleted automatically; a scan that never reached `complete` is not
//! authoritative and is refused by diff queries.

use serde::{Deserialize, Serialize};

/// Scan identifier (database rowid)
pub type ScanId = i64;

/// A named, timestamped scan run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scan {
    /// Unique ID
    pub id: ScanId,

    /// Unique scan name chosen by the user (e.g. "2026-08-nas")
    pub name: String,

    /// When the scan started (Unix epoch seconds)
    pub started_at: i64,

    /// When the scan finished, completed or not (Unix epoch seconds)
    pub completed_at: Option<i64>,

    /// Current status
    pub status: ScanStatus,

    /// Summary counters, filled in at completion
    pub counters: ScanCounters,
}

impl Scan {
    /// Whether this scan's membership set may be trusted by diff queries
    #[must_use]
    pub fn is_authoritative(&self) -> bool {
        self.status == ScanStatus::Complete
    }
}

/// Status of a scan run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    /// Scan is in progress
    #[default]
    Running,
    /// Scan finished and its membership set is final
    Complete,
    /// Scan was aborted or failed; membership is partial
    Incomplete,
}

impl ScanStatus {
    /// Convert to string for database storage
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Complete => "complete",
            Self::Incomplete => "incomplete",
        }
    }

    /// Parse from string
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "running" => Some(Self::Running),
            "complete" => Some(Self::Complete),
            "incomplete" => Some(Self::Incomplete),
            _ => None,
        }
    }
}

impl std::fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Summary counters recorded on a scan at completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScanCounters {
    /// Files persisted under this scan
    pub num_files: i64,

    /// Files whose container yielded at least one tag
    pub num_tagged: i64,

    /// Files skipped on read/hash errors
    pub num_errors: i64,
}
