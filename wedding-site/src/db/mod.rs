//! Database access layer for wedding-site
//!
//! One table, `rsvps`, with at most one row per guest id.

use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod rsvps;
pub use rsvps::RsvpRecord;

/// Open (creating if needed) the RSVP database and ensure the schema exists
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await
        .context("Failed to open RSVP database")?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // WAL lets the listing endpoint read while a submission writes
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;
    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    create_rsvps_table(&pool).await?;

    Ok(pool)
}

/// Single-connection in-memory database with the schema applied
///
/// Every connection to `sqlite::memory:` is a separate database, so the pool
/// is pinned to one connection that is never recycled.
pub async fn init_memory_database() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect("sqlite::memory:")
        .await
        .context("Failed to open in-memory database")?;

    create_rsvps_table(&pool).await?;

    Ok(pool)
}

async fn create_rsvps_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rsvps (
            uid TEXT PRIMARY KEY,
            guest_id TEXT NOT NULL UNIQUE,
            guest_name TEXT NOT NULL,
            response TEXT NOT NULL CHECK (response IN ('accept', 'decline')),
            guest_count INTEGER NOT NULL DEFAULT 0 CHECK (guest_count >= 0),
            response_date TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create rsvps table")?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_rsvps_response_date ON rsvps(response_date)")
        .execute(pool)
        .await?;

    Ok(())
}
