use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Errors surfaced to end users by the login flow.
///
/// A locked account and a wrong password both map to [`AuthError::InvalidCredentials`],
/// so the message never reveals lockout state or whether an account exists.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
}

#[derive(Debug, Error)]
pub enum StorageError {
    /// The attempt store could not be reached or rejected the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Migration error: {0}")]
    Migration(String),
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),
}

impl Error {
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Auth(_))
    }

    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    pub fn is_storage_error(&self) -> bool {
        matches!(self, Error::Storage(_))
    }

    /// True for transient backend failures the caller must decide to fail open or closed on.
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, Error::Storage(StorageError::Unavailable(_)))
    }
}

/// Extension trait for mapping backend results into [`StorageError::Unavailable`].
///
/// The underlying cause is logged; callers only see the fixed `context` message.
///
/// ```rust
/// use turnstile_core::error::StoreResultExt;
///
/// let result: Result<(), std::io::Error> =
///     Err(std::io::Error::other("connection refused"));
/// let err = result.map_store_err("Failed to fetch attempt record").unwrap_err();
/// assert!(err.is_store_unavailable());
/// ```
pub trait StoreResultExt<T> {
    fn map_store_err(self, context: &str) -> Result<T, Error>;
}

impl<T, E: std::fmt::Display> StoreResultExt<T> for Result<T, E> {
    fn map_store_err(self, context: &str) -> Result<T, Error> {
        self.map_err(|e| {
            tracing::error!(error = %e, "{context}");
            Error::Storage(StorageError::Unavailable(context.to_string()))
        })
    }
}
