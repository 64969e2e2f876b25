//! Failed login attempt records and lockout decisions
//!
//! | Field            | Type               | Description                                   |
//! | ---------------- | ------------------ | --------------------------------------------- |
//! | `identity`       | `Identity`         | The identity the attempts are scoped to.      |
//! | `failed_attempts`| `u32`              | Failures recorded since the last reset.       |
//! | `last_failed_at` | `Option<DateTime>` | When the most recent failure was recorded.    |
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Identity;

/// Failed-attempt state for a single identity.
///
/// Both counters are only ever moved forward together by
/// [`AttemptRepository::increment_failure`](crate::repositories::AttemptRepository::increment_failure).
/// An external reset zeroes `failed_attempts` but keeps `last_failed_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub identity: Identity,
    pub failed_attempts: u32,
    pub last_failed_at: Option<DateTime<Utc>>,
}

impl AttemptRecord {
    /// A record with no failures, as seen for an identity that has never failed.
    pub fn empty(identity: Identity) -> Self {
        Self {
            identity,
            failed_attempts: 0,
            last_failed_at: None,
        }
    }

    /// Apply one failure at `at`.
    ///
    /// The timestamp never moves backwards, so a failure reported by a host with a lagging
    /// clock keeps the later stored value.
    pub fn register_failure(&mut self, at: DateTime<Utc>) {
        self.failed_attempts = self.failed_attempts.saturating_add(1);
        self.last_failed_at = Some(match self.last_failed_at {
            Some(previous) if previous > at => previous,
            _ => at,
        });
    }

    /// Whether this record exceeds the given threshold.
    pub fn exceeds(&self, threshold: u32) -> bool {
        self.failed_attempts > threshold
    }
}

/// Outcome of a lockout check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Allowed,
    Locked,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, Decision::Locked)
    }
}
