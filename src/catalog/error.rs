//! Error types for catalog operations.

use std::fmt;

use sqlx::error::{DatabaseError, ErrorKind};
use thiserror::Error;

/// Primary `SQLite` result codes the catalog reacts to.
const SQLITE_BUSY: i64 = 5;
const SQLITE_LOCKED: i64 = 6;

/// What went wrong underneath a catalog call.
///
/// Only the distinctions a caller acts on are kept: link inserts swallow
/// constraint violations, and the CLI turns lock contention into a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogDbErrorKind {
    /// Another connection holds the write lock past the busy timeout.
    BusyOrLocked,
    /// A unique, foreign-key, not-null or check constraint failed.
    ConstraintViolation,
    /// No pooled connection became free in time.
    PoolTimeout,
    Other,
}

impl CatalogDbErrorKind {
    #[must_use]
    pub fn from_sqlx(error: &sqlx::Error) -> Self {
        match error {
            sqlx::Error::PoolTimedOut => Self::PoolTimeout,
            sqlx::Error::Database(database_error) => classify(database_error.as_ref()),
            _ => Self::Other,
        }
    }
}

impl fmt::Display for CatalogDbErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BusyOrLocked => "busy_or_locked",
            Self::ConstraintViolation => "constraint_violation",
            Self::PoolTimeout => "pool_timeout",
            Self::Other => "other",
        })
    }
}

fn classify(database_error: &dyn DatabaseError) -> CatalogDbErrorKind {
    match database_error.kind() {
        ErrorKind::UniqueViolation
        | ErrorKind::ForeignKeyViolation
        | ErrorKind::NotNullViolation
        | ErrorKind::CheckViolation => return CatalogDbErrorKind::ConstraintViolation,
        _ => {}
    }

    // Extended result codes keep the primary code in their low byte.
    let primary = database_error
        .code()
        .and_then(|code| code.parse::<i64>().ok())
        .map(|code| code & 0xff);
    if matches!(primary, Some(SQLITE_BUSY | SQLITE_LOCKED)) {
        CatalogDbErrorKind::BusyOrLocked
    } else {
        CatalogDbErrorKind::Other
    }
}

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// Database operation failed.
    #[error("database error ({kind}): {message}")]
    Database {
        kind: CatalogDbErrorKind,
        message: String,
    },

    /// A name that must be non-empty was blank.
    #[error("{entity} name must not be empty")]
    EmptyName {
        /// Which kind of row was being written (`ingredient`, `dish`).
        entity: &'static str,
    },
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database {
            kind: CatalogDbErrorKind::from_sqlx(&err),
            message: err.to_string(),
        }
    }
}

impl CatalogError {
    /// Returns the database error kind, when this is a database error.
    #[must_use]
    pub fn database_kind(&self) -> Option<CatalogDbErrorKind> {
        match self {
            Self::Database { kind, .. } => Some(*kind),
            Self::EmptyName { .. } => None,
        }
    }

    /// Whether a constraint rejected the write.
    #[must_use]
    pub fn is_constraint_violation(&self) -> bool {
        self.database_kind() == Some(CatalogDbErrorKind::ConstraintViolation)
    }

    /// Whether another writer held the database lock.
    #[must_use]
    pub fn is_busy_or_locked(&self) -> bool {
        self.database_kind() == Some(CatalogDbErrorKind::BusyOrLocked)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::{Database, DatabaseOptions};

    #[test]
    fn test_catalog_error_display_includes_kind() {
        let err = CatalogError::Database {
            kind: CatalogDbErrorKind::PoolTimeout,
            message: "pool timed out while waiting for an open connection".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "database error (pool_timeout): pool timed out while waiting for an open connection"
        );
        assert!(!err.is_constraint_violation());
        assert!(!err.is_busy_or_locked());
    }

    #[test]
    fn test_empty_name_has_no_database_kind() {
        let err = CatalogError::EmptyName { entity: "dish" };
        assert_eq!(err.to_string(), "dish name must not be empty");
        assert_eq!(err.database_kind(), None);
    }

    #[test]
    fn test_non_database_sqlx_errors() {
        assert_eq!(
            CatalogDbErrorKind::from_sqlx(&sqlx::Error::PoolTimedOut),
            CatalogDbErrorKind::PoolTimeout
        );
        assert_eq!(
            CatalogDbErrorKind::from_sqlx(&sqlx::Error::RowNotFound),
            CatalogDbErrorKind::Other
        );
    }

    #[tokio::test]
    async fn test_duplicate_name_is_constraint_violation() {
        let db = Database::new_in_memory().await.unwrap();
        sqlx::query("INSERT INTO ingredients (name) VALUES ('egg')")
            .execute(db.pool())
            .await
            .unwrap();
        let err = sqlx::query("INSERT INTO ingredients (name) VALUES ('egg')")
            .execute(db.pool())
            .await
            .unwrap_err();

        assert!(CatalogError::from(err).is_constraint_violation());
    }

    #[tokio::test]
    async fn test_write_under_foreign_lock_is_busy() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("locked.db");
        let options = DatabaseOptions {
            max_connections: 1,
            busy_timeout_ms: 0,
        };
        let holder = Database::with_options(&path, &options).await.unwrap();
        let writer = Database::with_options(&path, &options).await.unwrap();

        let mut conn = holder.pool().acquire().await.unwrap();
        sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await.unwrap();

        let err = sqlx::query("INSERT INTO ingredients (name) VALUES ('salt')")
            .execute(writer.pool())
            .await
            .unwrap_err();
        let err = CatalogError::from(err);
        assert!(err.is_busy_or_locked(), "unexpected error: {err}");

        sqlx::query("ROLLBACK").execute(&mut *conn).await.unwrap();
    }
}
