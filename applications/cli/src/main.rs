/// shellac - catalog a music library's files and tags into SQLite
use clap::{Parser, Subcommand};
use shellac_scanner::ScanReconciler;
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

use config::AppConfig;

#[derive(Parser)]
#[command(name = "shellac")]
#[command(about = "Catalog a music library's files and tags into SQLite", long_about = None)]
struct Cli {
    /// Configuration file (default: Shellac.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or update the database schema (idempotent)
    InitDb,
    /// Scan a directory tree under a named scan
    Scan {
        /// Root directory to scan
        #[arg(long)]
        path: PathBuf,
        /// Name for this scan run
        #[arg(long = "scan-name")]
        scan_name: String,
        /// Hashing/tagging worker count (default: CPU count)
        #[arg(long)]
        workers: Option<usize>,
        /// Follow symbolic links while walking
        #[arg(long)]
        follow_links: bool,
    },
    /// List records in one scan whose content is absent from another
    Diff {
        /// Scan providing the records
        #[arg(long)]
        from: String,
        /// Scan to compare against
        #[arg(long)]
        to: String,
    },
    /// List groups of records sharing a content hash
    Dupes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shellac=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    let pool = shellac_store::create_pool(&config.database_url).await?;

    match cli.command {
        Commands::InitDb => {
            shellac_store::run_migrations(&pool).await?;
            println!("Database initialized.");
        }
        Commands::Scan {
            path,
            scan_name,
            workers,
            follow_links,
        } => {
            shellac_store::run_migrations(&pool).await?;
            scan(pool, &config, path, scan_name, workers, follow_links).await?;
        }
        Commands::Diff { from, to } => {
            let records = shellac_store::scans::diff(&pool, &from, &to).await?;
            println!(
                "{} record(s) in '{}' whose content is missing from '{}':",
                records.len(),
                from,
                to
            );
            for record in &records {
                println!("  {}", record.path);
            }
        }
        Commands::Dupes => {
            let groups = shellac_store::file_records::duplicate_groups(&pool).await?;
            println!("{} duplicate group(s):", groups.len());
            for group in &groups {
                println!("{}", group.content_hash);
                for record in &group.records {
                    println!("  {}", record.path);
                }
            }
        }
    }

    Ok(())
}

async fn scan(
    pool: SqlitePool,
    config: &AppConfig,
    path: PathBuf,
    scan_name: String,
    workers: Option<usize>,
    follow_links: bool,
) -> anyhow::Result<()> {
    let mut reconciler =
        ScanReconciler::new(pool).follow_links(follow_links || config.scanner.follow_links);
    if let Some(workers) = workers.or(config.scanner.workers) {
        reconciler = reconciler.workers(workers);
    }

    // ctrl-c aborts the run; the scan is left incomplete, never complete
    let cancel = reconciler.cancel_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("ctrl-c received, stopping scan");
            cancel.store(true, Ordering::SeqCst);
        }
    });

    let summary = reconciler.run(&path, &scan_name).await?;

    println!("Scan '{}' complete.", scan_name);
    println!("  discovered: {}", summary.discovered);
    println!("  persisted:  {}", summary.persisted());
    println!("    new:       {}", summary.new_files);
    println!("    updated:   {}", summary.updated);
    println!("    unchanged: {}", summary.unchanged);
    println!("    duplicate: {}", summary.duplicates);
    println!("  skipped:    {}", summary.skipped);

    Ok(())
}
