//! Shellac Store
//!
//! `SQLite` persistence layer for the shellac catalog.
//!
//! Scans, file records, and scan membership live in three vertical slices,
//! each owning its own queries. All functions take an explicit
//! [`SqlitePool`] handle; there is no ambient connection state.
//!
//! # Example
//!
//! ```rust,no_run
//! use shellac_store::{create_pool, run_migrations, scans};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://shellac.db").await?;
//! run_migrations(&pool).await?;
//!
//! let scan = scans::create(&pool, "2026-08-nas").await?;
//! println!("scan {} started", scan.name);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod error;

// Vertical slices
pub mod file_records;
pub mod memberships;
pub mod scans;

pub use error::StoreError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into the binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Idempotent; call once at startup (or via `init-db`) to ensure the schema
/// is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StoreError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| StoreError::Migration(e.to_string()))
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `sqlite://shellac.db`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}
