//! Shared fixtures for scanner integration tests

use sqlx::SqlitePool;
use tempfile::TempDir;

/// Temp-file backed database with migrations applied
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

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

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
