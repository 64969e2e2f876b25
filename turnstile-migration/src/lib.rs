//! Schema migrations for attempt stores.
//!
//! A backend lists its migrations (for SQLite, the single `login_attempts` table) and a
//! [`MigrationManager`] applies the ones not yet recorded in `_turnstile_migrations`.
//! Running the manager twice is a no-op, so hosts may migrate on every start.
use async_trait::async_trait;
use sqlx::Database;
use thiserror::Error;
use turnstile_core::error::StorageError;

/// Failure while bringing the attempt schema up to date.
///
/// Surfaces to callers as `StorageError::Migration`, never as `StoreUnavailable`.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Migration failed: {0}")]
    Migration(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<MigrationError> for turnstile_core::Error {
    fn from(error: MigrationError) -> Self {
        turnstile_core::Error::Storage(StorageError::Migration(error.to_string()))
    }
}

pub type Result<T> = std::result::Result<T, MigrationError>;

/// One schema step for an attempt store, e.g. creating `login_attempts`.
#[async_trait]
pub trait Migration<DB: Database>: Send + Sync {
    /// Apply the step. Runs inside the manager's transaction.
    async fn up<'a>(&'a self, conn: &'a mut <DB as Database>::Connection) -> Result<()>;

    /// Undo the step. Dropping `login_attempts` discards every recorded failure.
    async fn down<'a>(&'a self, conn: &'a mut <DB as Database>::Connection) -> Result<()>;

    /// Unique per store; a version is applied at most once.
    fn version(&self) -> i64;

    /// Recorded alongside the version in the tracking table.
    fn name(&self) -> &str;
}

/// Row of `_turnstile_migrations`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MigrationRecord {
    pub version: i64,
    pub name: String,
    /// Unix timestamp, seconds
    pub applied_at: i64,
}

/// Tracks which schema steps an attempt store has applied.
///
/// Backed by `_turnstile_migrations`, kept in the same database as `login_attempts` so the
/// schema and its history move together.
#[async_trait]
pub trait MigrationManager<DB: Database>: Send + Sync {
    fn get_migration_table_name(&self) -> &str {
        "_turnstile_migrations"
    }

    /// Create `_turnstile_migrations` if it does not exist yet.
    async fn initialize(&self) -> Result<()>;

    /// Apply, in list order, every step whose version is not recorded. A failed step rolls
    /// back alone and stops the run, leaving earlier steps applied.
    async fn up(&self, migrations: &[Box<dyn Migration<DB>>]) -> Result<()>;

    /// Undo recorded steps, in the order given.
    async fn down(&self, migrations: &[Box<dyn Migration<DB>>]) -> Result<()>;

    /// Applied steps, oldest version first.
    async fn get_applied_migrations(&self) -> Result<Vec<MigrationRecord>>;

    async fn is_applied(&self, version: i64) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_error_maps_to_storage_error() {
        let error: turnstile_core::Error =
            MigrationError::Migration("table exists".to_string()).into();
        assert!(error.is_storage_error());
        assert!(!error.is_store_unavailable());
        assert_eq!(
            error.to_string(),
            "Storage error: Migration error: Migration failed: table exists"
        );
    }
}
