//! # Turnstile
//!
//! Turnstile tracks failed login attempts per identity and locks identities out once they fail
//! too often. It sits beside your existing authentication code instead of replacing it:
//! credential checks, sessions and user records stay yours.
//!
//! Before verifying credentials, ask [`Turnstile::check_allowed`]. After a failed
//! verification, call [`Turnstile::record_failure`]. Or hand your credential check to
//! [`Turnstile::login_flow`] and let it do both.
//!
//! An identity is locked once its failure count is strictly greater than
//! [`LockoutConfig::max_failed_attempts`] (5 by default). Lockout is recomputed from the counter
//! on every check. Counters are only cleared by [`Turnstile::unlock`] or, if enabled,
//! [`LockoutConfig::reset_on_success`].
//!
//! ## Storage Support
//!
//! - In-memory ([`InMemoryAttemptRepository`]), for single-instance services and tests
//! - SQLite (`sqlite` feature, on by default)
//!
//! ## Example
//!
//! ```rust,no_run
//! use turnstile::TurnstileBuilder;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let turnstile = TurnstileBuilder::new()
//!         .with_sqlite("sqlite://attempts.db")
//!         .await?
//!         .apply_migrations(true)
//!         .build()
//!         .await?;
//!
//!     if turnstile.check_allowed("alice").await?.is_locked() {
//!         // Reject with the same message as a wrong password
//!     }
//!     Ok(())
//! }
//! ```
use std::sync::Arc;

mod builder;

pub use builder::{NoStorage, TurnstileBuilder, TurnstileBuilderError, WithStorage};

/// Re-export core types from turnstile_core
pub use turnstile_core::{
    AttemptRecord, AttemptRepository, Authenticator, DEFAULT_MAX_FAILED_ATTEMPTS, Decision, Error,
    Identity, InMemoryAttemptRepository, LockoutConfig, LoginAttemptGuard, LoginFlow,
    StoreFailurePolicy,
    error::{AuthError, StorageError, ValidationError},
};

/// Re-export storage backends
#[cfg(feature = "sqlite")]
pub use turnstile_storage_sqlite::{SqliteAttemptRepository, SqliteStorage};

/// Login lockout bound to an attempt store.
///
/// Cloning is cheap; clones share the same repository.
pub struct Turnstile<R: AttemptRepository> {
    repository: Arc<R>,
    guard: LoginAttemptGuard<R>,
}

impl<R: AttemptRepository> Clone for Turnstile<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            guard: self.guard.clone(),
        }
    }
}

impl<R: AttemptRepository> Turnstile<R> {
    /// Create a Turnstile with the default lockout configuration.
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_config(repository, LockoutConfig::default())
    }

    pub fn with_config(repository: Arc<R>, config: LockoutConfig) -> Self {
        let guard = LoginAttemptGuard::new(Arc::clone(&repository), config);
        Self { repository, guard }
    }

    pub fn config(&self) -> &LockoutConfig {
        self.guard.config()
    }

    pub fn guard(&self) -> &LoginAttemptGuard<R> {
        &self.guard
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Decide whether a login attempt for `identity` may proceed.
    ///
    /// See [`LoginAttemptGuard::check_allowed`].
    pub async fn check_allowed(&self, identity: &str) -> Result<Decision, Error> {
        self.guard.check_allowed(identity).await
    }

    /// Record one failed login attempt for `identity`.
    ///
    /// See [`LoginAttemptGuard::record_failure`].
    pub async fn record_failure(&self, identity: &str) -> Result<AttemptRecord, Error> {
        self.guard.record_failure(identity).await
    }

    /// Current attempt record for `identity`, if any failure was ever recorded.
    pub async fn attempts(&self, identity: &str) -> Result<Option<AttemptRecord>, Error> {
        let identity = Identity::new(identity)?;
        self.repository.fetch(&identity).await
    }

    /// Clear the failure counter for `identity` (admin action).
    ///
    /// # Returns
    ///
    /// `true` if the identity had recorded failures.
    pub async fn unlock(&self, identity: &str) -> Result<bool, Error> {
        let identity = Identity::new(identity)?;
        let had_failures = self.repository.reset(&identity).await?;
        if had_failures {
            tracing::info!(identity = %identity, "Cleared failed login attempts");
        }
        Ok(had_failures)
    }

    /// Compose the guard with an authenticator into a [`LoginFlow`].
    pub fn login_flow<A: Authenticator>(&self, authenticator: Arc<A>) -> LoginFlow<R, A> {
        LoginFlow::new(Arc::clone(&self.repository), self.guard.clone(), authenticator)
    }

    /// Apply storage migrations.
    pub async fn migrate(&self) -> Result<(), Error> {
        self.repository.migrate().await
    }

    pub async fn health_check(&self) -> Result<(), Error> {
        self.repository.health_check().await
    }
}

impl Turnstile<InMemoryAttemptRepository> {
    /// A Turnstile over a fresh in-memory store.
    pub fn in_memory(config: LockoutConfig) -> Self {
        Self::with_config(Arc::new(InMemoryAttemptRepository::new()), config)
    }
}
