//! Login attempt guard.
//!
//! The guard gates login attempts on the number of recorded failures for an identity and records
//! each new failure. Lockout is never stored: it is recomputed from the counter on every check.
//!
//! # Example
//!
//! ```rust,ignore
//! use turnstile_core::services::LoginAttemptGuard;
//! use turnstile_core::LockoutConfig;
//!
//! let guard = LoginAttemptGuard::new(repository, LockoutConfig::default());
//!
//! // Before verifying credentials
//! if guard.check_allowed("alice").await?.is_locked() {
//!     // Reject without checking the password
//! }
//!
//! // After verification fails
//! guard.record_failure("alice").await?;
//! ```

use std::sync::Arc;

use chrono::Utc;

use crate::{
    AttemptRecord, Decision, Error, Identity, LockoutConfig, repositories::AttemptRepository,
};

/// Service deciding whether an identity may attempt to log in.
///
/// # Thread Safety
///
/// The guard holds no mutable state of its own and can be shared across tasks. Per-identity
/// atomicity of failure counting is provided by the repository.
pub struct LoginAttemptGuard<R: AttemptRepository> {
    repository: Arc<R>,
    config: LockoutConfig,
}

impl<R: AttemptRepository> Clone for LoginAttemptGuard<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            config: self.config.clone(),
        }
    }
}

impl<R: AttemptRepository> LoginAttemptGuard<R> {
    pub fn new(repository: Arc<R>, config: LockoutConfig) -> Self {
        Self { repository, config }
    }

    pub fn config(&self) -> &LockoutConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Failures an identity may accumulate before it is locked.
    pub fn threshold(&self) -> u32 {
        self.config.max_failed_attempts
    }

    /// Decide whether a login attempt for `identity` may proceed.
    ///
    /// An identity with no record is always allowed; whether it exists is left to the
    /// authenticator. An identity is locked once its failure count is strictly greater than
    /// the threshold.
    ///
    /// # Errors
    ///
    /// - `InvalidIdentity` before the store is touched.
    /// - `StoreUnavailable` from the repository, unchanged.
    pub async fn check_allowed(&self, identity: &str) -> Result<Decision, Error> {
        let identity = Identity::new(identity)?;
        self.check(&identity).await
    }

    /// Same as [`check_allowed`](Self::check_allowed) for an already validated identity.
    pub async fn check(&self, identity: &Identity) -> Result<Decision, Error> {
        if !self.config.enabled {
            return Ok(Decision::Allowed);
        }

        let decision = match self.repository.fetch(identity).await? {
            Some(record) if record.exceeds(self.threshold()) => Decision::Locked,
            _ => Decision::Allowed,
        };

        tracing::debug!(identity = %identity, ?decision, "Checked login attempt");
        Ok(decision)
    }

    /// Record one failed login attempt for `identity`.
    ///
    /// The count goes up by exactly one and `last_failed_at` is set to now, in a single write.
    /// If protection is disabled the store is not touched and an empty record is returned.
    ///
    /// # Returns
    ///
    /// The record after this failure.
    pub async fn record_failure(&self, identity: &str) -> Result<AttemptRecord, Error> {
        let identity = Identity::new(identity)?;
        self.record(&identity).await
    }

    /// Same as [`record_failure`](Self::record_failure) for an already validated identity.
    pub async fn record(&self, identity: &Identity) -> Result<AttemptRecord, Error> {
        if !self.config.enabled {
            return Ok(AttemptRecord::empty(identity.clone()));
        }

        let record = self
            .repository
            .increment_failure(identity, Utc::now())
            .await?;

        if record.failed_attempts == self.threshold().saturating_add(1) {
            tracing::warn!(
                identity = %identity,
                failed_attempts = record.failed_attempts,
                "Login locked after too many failed attempts"
            );
        } else {
            tracing::debug!(
                identity = %identity,
                failed_attempts = record.failed_attempts,
                "Recorded failed login attempt"
            );
        }

        Ok(record)
    }
}
