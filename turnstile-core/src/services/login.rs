//! Login flow composing the guard with an external credential check.
//!
//! The flow runs the guard before verification and records a failure after any unsuccessful
//! verification. Every rejection reaches the caller as [`AuthError::InvalidCredentials`]:
//! a locked identity, a wrong secret, and a fail-closed store outage look the same from outside.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    Decision, Error, Identity, StoreFailurePolicy, error::AuthError,
    repositories::AttemptRepository, services::LoginAttemptGuard,
};

/// Verifies credentials for an identity.
///
/// Implemented by the host application on top of its own user store and password hashing.
#[async_trait]
pub trait Authenticator: Send + Sync + 'static {
    /// What a successful verification yields, e.g. the host's user type.
    type Principal: Send;

    /// Returns `Ok(None)` when the identity is unknown or the secret does not match.
    async fn verify(
        &self,
        identity: &Identity,
        secret: &str,
    ) -> Result<Option<Self::Principal>, Error>;
}

pub struct LoginFlow<R: AttemptRepository, A: Authenticator> {
    guard: LoginAttemptGuard<R>,
    repository: Arc<R>,
    authenticator: Arc<A>,
}

impl<R: AttemptRepository, A: Authenticator> LoginFlow<R, A> {
    pub fn new(repository: Arc<R>, guard: LoginAttemptGuard<R>, authenticator: Arc<A>) -> Self {
        Self {
            guard,
            repository,
            authenticator,
        }
    }

    pub fn guard(&self) -> &LoginAttemptGuard<R> {
        &self.guard
    }

    /// Attempt a login.
    ///
    /// 1. Locked identities are rejected without calling the authenticator.
    /// 2. A failed or erroring verification records one failure. If recording fails the
    ///    error is logged and the login is still rejected with the generic error.
    /// 3. On success the counter is cleared only when `reset_on_success` is configured.
    ///
    /// # Errors
    ///
    /// `InvalidIdentity` for an empty identity, otherwise only
    /// [`AuthError::InvalidCredentials`]. Any other check error, such as a corrupt stored
    /// record, is logged and denies the login regardless of the store failure policy.
    pub async fn login(&self, identity: &str, secret: &str) -> Result<A::Principal, Error> {
        let identity = Identity::new(identity)?;
        let config = self.guard.config();

        match self.guard.check(&identity).await {
            Ok(Decision::Allowed) => {}
            Ok(Decision::Locked) => {
                tracing::info!(identity = %identity, "Rejected login for locked identity");
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) if e.is_store_unavailable() => match config.store_failure_policy {
                StoreFailurePolicy::FailClosed => {
                    tracing::error!(
                        identity = %identity,
                        error = %e,
                        "Attempt store unavailable, denying login"
                    );
                    return Err(AuthError::InvalidCredentials.into());
                }
                StoreFailurePolicy::FailOpen => {
                    tracing::warn!(
                        identity = %identity,
                        error = %e,
                        "Attempt store unavailable, allowing login to proceed"
                    );
                }
            },
            Err(e) => {
                tracing::error!(
                    identity = %identity,
                    error = %e,
                    "Failed to check login attempts, denying login"
                );
                return Err(AuthError::InvalidCredentials.into());
            }
        }

        let principal = match self.authenticator.verify(&identity, secret).await {
            Ok(Some(principal)) => principal,
            Ok(None) => {
                self.record_failure(&identity).await;
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => {
                tracing::warn!(identity = %identity, error = %e, "Credential verification failed");
                self.record_failure(&identity).await;
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if config.enabled && config.reset_on_success {
            if let Err(e) = self.repository.reset(&identity).await {
                tracing::warn!(
                    identity = %identity,
                    error = %e,
                    "Failed to reset login attempts after successful login"
                );
            }
        }

        Ok(principal)
    }

    async fn record_failure(&self, identity: &Identity) {
        if let Err(e) = self.guard.record(identity).await {
            tracing::error!(
                identity = %identity,
                error = %e,
                "Failed to record failed login attempt"
            );
        }
    }
}
