//! SQLite storage backend for turnstile
//!
//! ```rust,no_run
//! use turnstile_core::AttemptRepository;
//! use turnstile_storage_sqlite::SqliteStorage;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = SqliteStorage::connect("sqlite://attempts.db").await?;
//! let repository = storage.into_repository();
//! repository.migrate().await?;
//! # Ok(())
//! # }
//! ```
pub mod migrations;
pub mod repositories;

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub use repositories::SqliteAttemptRepository;

#[derive(Debug, thiserror::Error)]
pub enum SqliteStorageError {
    #[error("Invalid SQLite URL: {0}")]
    InvalidUrl(String),
    #[error("Failed to connect to SQLite: {0}")]
    Connection(#[from] sqlx::Error),
}

/// Connection handle for the SQLite backend
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to the database at `url`, creating the file if it does not exist.
    ///
    /// In-memory databases are limited to a single connection so that every query sees the
    /// same database.
    pub async fn connect(url: &str) -> Result<Self, SqliteStorageError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| SqliteStorageError::InvalidUrl(e.to_string()))?
            .create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new();
        if url.contains(":memory:") || url.contains("mode=memory") {
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await?;
        tracing::debug!(url = %url, "Connected to SQLite attempt store");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn into_repository(self) -> SqliteAttemptRepository {
        SqliteAttemptRepository::new(self.pool)
    }
}
