//! In-process attempt repository backed by [`DashMap`].
//!
//! Suited to single-instance deployments and tests. Every mutation happens while the entry's
//! shard lock is held, with no await point inside, so increments for one identity are
//! serialized while other identities proceed in parallel.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::{AttemptRecord, Error, Identity, repositories::AttemptRepository};

#[derive(Debug, Default)]
pub struct InMemoryAttemptRepository {
    records: DashMap<Identity, AttemptRecord>,
}

impl InMemoryAttemptRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of identities with a record.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl AttemptRepository for InMemoryAttemptRepository {
    async fn fetch(&self, identity: &Identity) -> Result<Option<AttemptRecord>, Error> {
        Ok(self.records.get(identity).map(|record| record.clone()))
    }

    async fn increment_failure(
        &self,
        identity: &Identity,
        at: DateTime<Utc>,
    ) -> Result<AttemptRecord, Error> {
        let mut record = self
            .records
            .entry(identity.clone())
            .or_insert_with(|| AttemptRecord::empty(identity.clone()));
        record.register_failure(at);
        Ok(record.clone())
    }

    async fn reset(&self, identity: &Identity) -> Result<bool, Error> {
        Ok(match self.records.get_mut(identity) {
            Some(mut record) => {
                let had_failures = record.failed_attempts > 0;
                record.failed_attempts = 0;
                had_failures
            }
            None => false,
        })
    }
}
