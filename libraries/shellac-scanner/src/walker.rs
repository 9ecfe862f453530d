//! Lazy directory walking
//!
//! The walker yields candidate audio paths one at a time, so the pipeline
//! never holds the whole tree in memory. Unreadable subtrees surface as
//! [`WalkEntry::Skipped`] and the walk continues with their siblings; when
//! symlink following is enabled, `walkdir`'s ancestor loop detection turns
//! cycles into skipped entries as well.

use crate::error::{Result, ScanError};
use shellac_metadata::is_audio_file;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursive walker over a library root
pub struct Walker {
    /// Whether to follow symbolic links
    follow_links: bool,

    /// Maximum depth to traverse (unlimited when unset)
    max_depth: Option<usize>,
}

impl Default for Walker {
    fn default() -> Self {
        Self {
            follow_links: false,
            max_depth: None,
        }
    }
}

impl Walker {
    /// Create a new walker
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to follow symbolic links
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Set maximum directory depth to traverse
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Start a lazy walk under `root`
    ///
    /// The root is canonicalized so every yielded path is absolute. The
    /// walk is finite and not restartable across process runs.
    ///
    /// # Errors
    /// Returns `InvalidRoot` if `root` does not exist or is not a
    /// directory; this is fatal, unlike per-entry failures inside the tree.
    pub fn walk(&self, root: &Path) -> Result<AudioFiles> {
        if !root.is_dir() {
            return Err(ScanError::InvalidRoot(root.display().to_string()));
        }
        let root = std::fs::canonicalize(root)?;

        let mut walker = WalkDir::new(root).follow_links(self.follow_links);
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        Ok(AudioFiles {
            inner: walker.into_iter(),
        })
    }
}

/// One step of a walk
#[derive(Debug)]
pub enum WalkEntry {
    /// A candidate file with a recognized audio extension
    Audio(PathBuf),

    /// An entry that could not be read; the walk continues past it
    Skipped {
        /// The offending path, when known
        path: Option<PathBuf>,
        /// What went wrong
        error: walkdir::Error,
    },
}

/// Lazy iterator of candidate audio files under a root
pub struct AudioFiles {
    inner: walkdir::IntoIter,
}

impl Iterator for AudioFiles {
    type Item = WalkEntry;

    fn next(&mut self) -> Option<WalkEntry> {
        loop {
            match self.inner.next()? {
                Ok(entry) => {
                    if entry.file_type().is_dir() {
                        continue;
                    }
                    let path = entry.into_path();
                    if is_audio_file(&path) {
                        return Some(WalkEntry::Audio(path));
                    }
                }
                Err(error) => {
                    let path = error.path().map(Path::to_path_buf);
                    return Some(WalkEntry::Skipped { path, error });
                }
            }
        }
    }
}
