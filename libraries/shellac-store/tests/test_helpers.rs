//! Test helpers and fixtures for store integration tests
//!
//! These helpers create test databases using real SQLite files (not
//! in-memory) to match production behavior and properly test migrations,
//! constraints, and indexes.

use shellac_core::{AudioTags, NewFileRecord};
use sqlx::SqlitePool;
use std::path::Path;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = shellac_store::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        shellac_store::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    /// Get the pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Test fixture: an untagged observation
pub fn observation(path: &str, hash: &str) -> NewFileRecord {
    NewFileRecord::new(
        Path::new(path),
        hash.to_string(),
        4096,
        1_700_000_000,
        AudioTags::default(),
    )
}

/// Test fixture: an observation carrying tags
pub fn tagged_observation(path: &str, hash: &str, artist: &str, title: &str) -> NewFileRecord {
    let tags = AudioTags {
        title: Some(title.to_string()),
        artist: Some(artist.to_string()),
        album: Some("Test Album".to_string()),
        year: Some(1971),
        track_number: Some(3),
        duration_seconds: Some(212.8),
        bitrate: Some(320),
        sample_rate: Some(44100),
        ..AudioTags::default()
    };

    NewFileRecord::new(Path::new(path), hash.to_string(), 4096, 1_700_000_000, tags)
}
