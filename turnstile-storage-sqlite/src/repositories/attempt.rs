//! SQLite implementation of the attempt repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use turnstile_core::{
    AttemptRecord, Error, Identity, error::StoreResultExt, repositories::AttemptRepository,
};
use turnstile_migration::MigrationManager;

use crate::migrations::{SqliteMigrationManager, migrations};

/// SQLite repository for login attempt records.
///
/// Failures are counted with a single upsert statement, so concurrent failures for the same
/// identity are serialized by SQLite's write lock and none are lost.
#[derive(Debug, Clone)]
pub struct SqliteAttemptRepository {
    pool: SqlitePool,
}

impl SqliteAttemptRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Internal struct for query results
#[derive(Debug, sqlx::FromRow)]
struct SqliteAttemptRecord {
    identity: String,
    failed_attempts: i64,
    last_failed_at: Option<i64>,
}

impl TryFrom<SqliteAttemptRecord> for AttemptRecord {
    type Error = Error;

    fn try_from(row: SqliteAttemptRecord) -> Result<Self, Self::Error> {
        Ok(AttemptRecord {
            identity: Identity::new(row.identity)?,
            failed_attempts: row.failed_attempts.clamp(0, i64::from(u32::MAX)) as u32,
            last_failed_at: row
                .last_failed_at
                .and_then(|ts| DateTime::from_timestamp(ts, 0)),
        })
    }
}

#[async_trait]
impl AttemptRepository for SqliteAttemptRepository {
    async fn fetch(&self, identity: &Identity) -> Result<Option<AttemptRecord>, Error> {
        let row = sqlx::query_as::<_, SqliteAttemptRecord>(
            r#"
            SELECT identity, failed_attempts, last_failed_at
            FROM login_attempts
            WHERE identity = ?
            "#,
        )
        .bind(identity.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_store_err("Failed to fetch login attempts")?;

        row.map(AttemptRecord::try_from).transpose()
    }

    async fn increment_failure(
        &self,
        identity: &Identity,
        at: DateTime<Utc>,
    ) -> Result<AttemptRecord, Error> {
        let at = at.timestamp();
        let now = Utc::now().timestamp();

        // One statement: the increment and the timestamp land together or not at all
        let row = sqlx::query_as::<_, SqliteAttemptRecord>(
            r#"
            INSERT INTO login_attempts (identity, failed_attempts, last_failed_at, created_at, updated_at)
            VALUES (?, 1, ?, ?, ?)
            ON CONFLICT(identity) DO UPDATE SET
                failed_attempts = MIN(login_attempts.failed_attempts + 1, 4294967295),
                last_failed_at = MAX(COALESCE(login_attempts.last_failed_at, excluded.last_failed_at), excluded.last_failed_at),
                updated_at = excluded.updated_at
            RETURNING identity, failed_attempts, last_failed_at
            "#,
        )
        .bind(identity.as_str())
        .bind(at)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_store_err("Failed to record failed login attempt")?;

        row.try_into()
    }

    async fn reset(&self, identity: &Identity) -> Result<bool, Error> {
        let result = sqlx::query(
            r#"
            UPDATE login_attempts
            SET failed_attempts = 0, updated_at = ?
            WHERE identity = ? AND failed_attempts > 0
            "#,
        )
        .bind(Utc::now().timestamp())
        .bind(identity.as_str())
        .execute(&self.pool)
        .await
        .map_store_err("Failed to reset login attempts")?;

        Ok(result.rows_affected() > 0)
    }

    async fn migrate(&self) -> Result<(), Error> {
        let manager = SqliteMigrationManager::new(self.pool.clone());
        manager.initialize().await?;
        manager.up(&migrations()).await?;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), Error> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_store_err("Attempt store health check failed")?;
        Ok(())
    }
}
