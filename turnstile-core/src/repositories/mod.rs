//! Repository traits for the attempt store
//!
//! The guard never owns attempt records. It reads and advances them through
//! [`AttemptRepository`], which storage backends implement. Implementations must make
//! [`AttemptRepository::increment_failure`] atomic per identity: concurrent failures for the same
//! identity must each add exactly one, and a cancelled call must leave no partial write.

pub mod memory;

pub use memory::InMemoryAttemptRepository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{AttemptRecord, Error, Identity};

/// Repository for per-identity failed login attempts.
#[async_trait]
pub trait AttemptRepository: Send + Sync + 'static {
    /// Fetch the record for an identity.
    ///
    /// Returns `None` if no failure was ever recorded. Must not create a record.
    async fn fetch(&self, identity: &Identity) -> Result<Option<AttemptRecord>, Error>;

    /// Atomically add one failure at `at`.
    ///
    /// Creates the record with a count of 1 if it does not exist. The stored `last_failed_at`
    /// becomes the later of its current value and `at`.
    ///
    /// # Returns
    ///
    /// The record as it is after this failure.
    async fn increment_failure(
        &self,
        identity: &Identity,
        at: DateTime<Utc>,
    ) -> Result<AttemptRecord, Error>;

    /// Zero the failure counter for an identity.
    ///
    /// This is the only way a counter decreases. `last_failed_at` is kept.
    ///
    /// # Returns
    ///
    /// `true` if the identity had one or more recorded failures.
    async fn reset(&self, identity: &Identity) -> Result<bool, Error>;

    /// Prepare the backing schema.
    async fn migrate(&self) -> Result<(), Error> {
        Ok(())
    }

    /// Check that the store is reachable.
    async fn health_check(&self) -> Result<(), Error> {
        Ok(())
    }
}
