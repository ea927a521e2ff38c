//! Database connection and schema management.
//!
//! This module provides SQLite database connectivity with:
//! - Connection pool management
//! - WAL mode for file-backed catalogs
//! - Automatic migration execution
//! - Taxonomy column upgrade for catalogs created without `parent_id`/`is_base`
//!
//! # Example
//!
//! ```no_run
//! use recipe_taxonomy::Database;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new(Path::new("recipes.db")).await?;
//! // Use db for queries...
//! # Ok(())
//! # }
//! ```

use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use thiserror::Error;
use tracing::{info, instrument};

/// Default maximum number of connections in the pool.
/// Kept low for SQLite since it uses file-level locking.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// SQLite busy timeout in milliseconds.
/// Connections will wait this long before returning SQLITE_BUSY.
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5000;

/// Columns the taxonomy normalizer needs on `ingredients`, with their DDL.
const TAXONOMY_COLUMNS: [(&str, &str); 2] = [
    ("parent_id", "ALTER TABLE ingredients ADD COLUMN parent_id INTEGER"),
    (
        "is_base",
        "ALTER TABLE ingredients ADD COLUMN is_base INTEGER NOT NULL DEFAULT 0",
    ),
];

/// Database-related errors.
#[derive(Error, Debug)]
pub enum DbError {
    /// Failed to connect to the database.
    #[error("failed to connect to database: {0}")]
    Connection(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("failed to run migrations: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Pool tuning for file-backed databases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatabaseOptions {
    /// Maximum pooled connections.
    pub max_connections: u32,
    /// `PRAGMA busy_timeout` in milliseconds.
    pub busy_timeout_ms: u32,
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

/// Database connection wrapper with connection pool.
///
/// Handles SQLite connection pooling, WAL mode configuration,
/// and automatic migration execution.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (or creates) the catalog database at the specified path with default options.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Connection` if the connection fails,
    /// or `DbError::Migration` if migrations fail.
    pub async fn new(db_path: &Path) -> Result<Self, DbError> {
        Self::with_options(db_path, &DatabaseOptions::default()).await
    }

    /// Opens (or creates) the catalog database with explicit pool options.
    ///
    /// This will:
    /// 1. Create the database file if it doesn't exist
    /// 2. Enable WAL mode
    /// 3. Run any pending migrations
    /// 4. Add `parent_id`/`is_base` to an existing `ingredients` table
    ///    without touching its rows
    ///
    /// # Errors
    ///
    /// Returns `DbError::Connection` if the connection fails,
    /// or `DbError::Migration` if migrations fail.
    #[instrument(skip(db_path), fields(path = %db_path.display()))]
    pub async fn with_options(db_path: &Path, options: &DatabaseOptions) -> Result<Self, DbError> {
        // Busy timeout and WAL go through connect options so that every pooled
        // connection gets them, not just the first one.
        let connect_options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_millis(u64::from(options.busy_timeout_ms)));

        let pool = SqlitePoolOptions::new()
            .max_connections(options.max_connections)
            .connect_with(connect_options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        ensure_taxonomy_columns(&pool).await?;

        Ok(Self { pool })
    }

    /// Creates an in-memory database for testing.
    ///
    /// The database exists only for the lifetime of the single pooled
    /// connection.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Connection` if the connection fails,
    /// or `DbError::Migration` if migrations fail.
    #[instrument]
    pub async fn new_in_memory() -> Result<Self, DbError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        ensure_taxonomy_columns(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Checks if WAL mode is enabled.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Connection` if the query fails.
    #[instrument(skip(self))]
    pub async fn is_wal_enabled(&self) -> Result<bool, DbError> {
        let result: (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0.to_lowercase() == "wal")
    }

    /// Gracefully closes all connections in the pool.
    #[instrument(skip(self))]
    pub async fn close(self) {
        self.pool.close().await;
    }
}

/// Adds `parent_id` and `is_base` to `ingredients` when they are missing.
///
/// Catalogs written before the taxonomy existed, or by other tools, may or may
/// not have these columns, so this checks `PRAGMA table_info` instead of
/// relying on a migration. Existing rows keep their data and come out
/// unmapped (`parent_id` NULL) and non-base (`is_base` 0). `parent_id` is a
/// plain integer; legacy rows may carry `0` for "no parent".
///
/// Returns the names of the columns that were added.
///
/// # Errors
///
/// Returns `DbError::Connection` if inspecting or altering the table fails.
#[instrument(skip(pool))]
pub async fn ensure_taxonomy_columns(pool: &SqlitePool) -> Result<Vec<&'static str>, DbError> {
    let existing: Vec<String> =
        sqlx::query_scalar("SELECT name FROM pragma_table_info('ingredients')")
            .fetch_all(pool)
            .await?;

    let mut added = Vec::new();
    for (column, ddl) in TAXONOMY_COLUMNS {
        if existing.iter().any(|name| name == column) {
            continue;
        }
        sqlx::query(ddl).execute(pool).await?;
        info!(column, "added taxonomy column to ingredients");
        added.push(column);
    }

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_ingredients_parent_id ON ingredients(parent_id)")
        .execute(pool)
        .await?;

    Ok(added)
}
