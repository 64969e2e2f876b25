//! Core functionality for the turnstile project
//!
//! This crate contains the login-attempt guard and the types it is built from: validated
//! identities, attempt records, lockout configuration, and the error taxonomy.
//!
//! Storage is abstracted behind [`AttemptRepository`]; an in-memory implementation lives in
//! [`repositories::memory`] and a SQLite one in the `turnstile-storage-sqlite` crate.
//!
//! See [`LoginAttemptGuard`] for the lockout decision and [`LoginFlow`] for composing it with an
//! external [`Authenticator`].
pub mod attempt;
pub mod config;
pub mod error;
pub mod identity;
pub mod repositories;
pub mod services;

pub use attempt::{AttemptRecord, Decision};
pub use config::{DEFAULT_MAX_FAILED_ATTEMPTS, LockoutConfig, StoreFailurePolicy};
pub use error::Error;
pub use identity::Identity;
pub use repositories::{AttemptRepository, InMemoryAttemptRepository};
pub use services::{Authenticator, LoginAttemptGuard, LoginFlow};
