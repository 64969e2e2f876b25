//! Builder pattern for constructing Turnstile instances
//!
//! This module provides a type-safe builder for creating [`Turnstile`] instances with
//! compile-time validation of storage configuration.
//!
//! # Example
//!
//! ```rust,no_run
//! use turnstile::{LockoutConfig, TurnstileBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // SQLite with auto-migration
//!     let turnstile = TurnstileBuilder::new()
//!         .with_sqlite("sqlite::memory:")
//!         .await?
//!         .apply_migrations(true)
//!         .build()
//!         .await?;
//!
//!     // In-memory with a stricter threshold
//!     let turnstile = TurnstileBuilder::new()
//!         .with_memory()
//!         .with_lockout(LockoutConfig::default().with_max_failed_attempts(3))
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use turnstile_core::{AttemptRepository, InMemoryAttemptRepository, LockoutConfig};

use crate::Turnstile;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur when building a Turnstile instance.
#[derive(Debug, thiserror::Error)]
pub enum TurnstileBuilderError {
    /// Failed to connect to storage backend
    #[error("Storage connection failed: {0}")]
    StorageConnection(String),

    /// Failed to run database migrations
    #[error("Migration failed: {0}")]
    Migration(String),
}

// ============================================================================
// Type-State Markers
// ============================================================================

/// Marker type indicating no storage has been configured yet.
///
/// This is the initial state of [`TurnstileBuilder`].
pub struct NoStorage;

/// Marker type indicating storage has been configured.
pub struct WithStorage<R: AttemptRepository> {
    repository: Arc<R>,
}

// ============================================================================
// Builder Implementation
// ============================================================================

/// A type-safe builder for constructing [`Turnstile`] instances.
///
/// # Type States
///
/// - [`NoStorage`]: Initial state, storage must be configured
/// - [`WithStorage<R>`]: Storage configured, ready to build
pub struct TurnstileBuilder<Storage> {
    storage: Storage,
    lockout_config: LockoutConfig,
    apply_migrations: bool,
}

impl Default for TurnstileBuilder<NoStorage> {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnstileBuilder<NoStorage> {
    /// Create a new builder with default configuration.
    ///
    /// # Defaults
    ///
    /// - Lockout: enabled, locked after more than 5 failures, fail closed, no reset on success
    /// - Apply migrations: false
    pub fn new() -> Self {
        Self {
            storage: NoStorage,
            lockout_config: LockoutConfig::default(),
            apply_migrations: false,
        }
    }

    /// Use an existing repository implementation.
    pub fn with_repository<R: AttemptRepository>(
        self,
        repository: Arc<R>,
    ) -> TurnstileBuilder<WithStorage<R>> {
        TurnstileBuilder {
            storage: WithStorage { repository },
            lockout_config: self.lockout_config,
            apply_migrations: self.apply_migrations,
        }
    }

    /// Keep attempt records in process memory.
    pub fn with_memory(self) -> TurnstileBuilder<WithStorage<InMemoryAttemptRepository>> {
        self.with_repository(Arc::new(InMemoryAttemptRepository::new()))
    }
}

// ============================================================================
// Storage Configuration Methods (NoStorage -> WithStorage)
// ============================================================================

#[cfg(feature = "sqlite")]
impl TurnstileBuilder<NoStorage> {
    /// Configure SQLite storage by connecting to the given URL.
    ///
    /// # Arguments
    ///
    /// * `url` - SQLite connection URL (e.g., "sqlite::memory:" or "sqlite://path/to/db.sqlite")
    pub async fn with_sqlite(
        self,
        url: &str,
    ) -> Result<
        TurnstileBuilder<WithStorage<turnstile_storage_sqlite::SqliteAttemptRepository>>,
        TurnstileBuilderError,
    > {
        let storage = turnstile_storage_sqlite::SqliteStorage::connect(url)
            .await
            .map_err(|e| TurnstileBuilderError::StorageConnection(e.to_string()))?;

        Ok(self.with_sqlite_storage(storage))
    }

    /// Configure SQLite storage from an existing connection.
    pub fn with_sqlite_storage(
        self,
        storage: turnstile_storage_sqlite::SqliteStorage,
    ) -> TurnstileBuilder<WithStorage<turnstile_storage_sqlite::SqliteAttemptRepository>> {
        self.with_repository(Arc::new(storage.into_repository()))
    }
}

// ============================================================================
// Configuration Methods (available in any state)
// ============================================================================

impl<S> TurnstileBuilder<S> {
    /// Configure lockout behavior.
    ///
    /// Default: enabled, locked after more than 5 failures
    pub fn with_lockout(mut self, config: LockoutConfig) -> Self {
        self.lockout_config = config;
        self
    }

    /// Set whether to automatically apply storage migrations during build.
    ///
    /// Default: false
    pub fn apply_migrations(mut self, apply: bool) -> Self {
        self.apply_migrations = apply;
        self
    }
}

// ============================================================================
// Build Method (only available with storage configured)
// ============================================================================

impl<R: AttemptRepository> TurnstileBuilder<WithStorage<R>> {
    /// Build the Turnstile instance, running migrations first if requested.
    pub async fn build(self) -> Result<Turnstile<R>, TurnstileBuilderError> {
        if self.apply_migrations {
            self.storage
                .repository
                .migrate()
                .await
                .map_err(|e| TurnstileBuilderError::Migration(e.to_string()))?;
        }

        tracing::debug!(
            enabled = self.lockout_config.enabled,
            max_failed_attempts = self.lockout_config.max_failed_attempts,
            "Built login lockout"
        );

        Ok(Turnstile::with_config(
            self.storage.repository,
            self.lockout_config,
        ))
    }
}
