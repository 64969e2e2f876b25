//! Lockout configuration
use serde::{Deserialize, Serialize};

/// Default number of failures an identity may accumulate and still be allowed to try again.
pub const DEFAULT_MAX_FAILED_ATTEMPTS: u32 = 5;

/// What the login flow does when the attempt store cannot be read before verification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreFailurePolicy {
    /// Deny the attempt with a generic authentication error.
    #[default]
    FailClosed,
    /// Continue to credential verification as if the identity were allowed.
    FailOpen,
}

/// Configuration for login lockout.
///
/// An identity is locked once its failure count is strictly greater than
/// `max_failed_attempts`; reaching the value exactly still allows another attempt.
///
/// All fields default, so a partial config file only needs the values it changes:
///
/// ```rust
/// use turnstile_core::LockoutConfig;
///
/// let config: LockoutConfig = serde_json::from_str(r#"{ "max_failed_attempts": 3 }"#).unwrap();
/// assert!(config.enabled);
/// assert_eq!(config.max_failed_attempts, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockoutConfig {
    /// When false, every check is allowed and failures are not recorded.
    pub enabled: bool,
    pub max_failed_attempts: u32,
    pub store_failure_policy: StoreFailurePolicy,
    /// Clear the failure counter after a successful login.
    ///
    /// Off by default: once the threshold is crossed the identity stays locked until an
    /// explicit unlock.
    pub reset_on_success: bool,
}

impl Default for LockoutConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_failed_attempts: DEFAULT_MAX_FAILED_ATTEMPTS,
            store_failure_policy: StoreFailurePolicy::FailClosed,
            reset_on_success: false,
        }
    }
}

impl LockoutConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn with_max_failed_attempts(mut self, max_failed_attempts: u32) -> Self {
        self.max_failed_attempts = max_failed_attempts;
        self
    }

    pub fn with_store_failure_policy(mut self, policy: StoreFailurePolicy) -> Self {
        self.store_failure_policy = policy;
        self
    }

    pub fn with_reset_on_success(mut self, reset_on_success: bool) -> Self {
        self.reset_on_success = reset_on_success;
        self
    }
}
