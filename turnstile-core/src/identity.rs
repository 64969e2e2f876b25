//! Login identities
//!
//! An [`Identity`] is the key a login attempt is scoped to, usually a username or email address.
//! Identities are compared exactly as given: no trimming, no case folding. Normalization, if any,
//! belongs to the caller so that every store sees the same key.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A validated, non-empty login identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(String);

impl Identity {
    /// Validate and wrap an identity.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidIdentity`] if the identity is empty. Any other string,
    /// including whitespace, is accepted as given.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use turnstile_core::Identity;
    ///
    /// assert!(Identity::new("alice").is_ok());
    /// assert!(Identity::new("").is_err());
    /// assert!(Identity::new(" ").is_ok());
    /// ```
    pub fn new(identity: impl Into<String>) -> Result<Self, ValidationError> {
        let identity = identity.into();
        validate_identity(&identity)?;
        Ok(Self(identity))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Identity {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Identity {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Identity> for String {
    fn from(identity: Identity) -> Self {
        identity.0
    }
}

/// Validates a raw identity string without allocating
pub fn validate_identity(identity: &str) -> Result<(), ValidationError> {
    if identity.is_empty() {
        return Err(ValidationError::InvalidIdentity(
            "Identity is required".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identities() {
        assert!(Identity::new("alice").is_ok());
        assert!(Identity::new("alice@example.com").is_ok());
        assert!(Identity::new(" padded ").is_ok());
        assert!(Identity::new("пользователь").is_ok());
        assert!(Identity::new("   ").is_ok());
        assert!(Identity::new("\t").is_ok());
        assert!(Identity::new("a".repeat(300)).is_ok());
        assert!(Identity::new("a".repeat(4096)).is_ok());
    }

    #[test]
    fn test_invalid_identities() {
        let err = Identity::new("").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidIdentity(_)));
    }

    #[test]
    fn test_identity_is_not_normalized() {
        let padded = Identity::new(" alice").unwrap();
        let plain = Identity::new("alice").unwrap();
        assert_ne!(padded, plain);
        assert_eq!(padded.as_str(), " alice");

        let upper = Identity::new("Alice").unwrap();
        assert_ne!(upper, plain);
    }

    #[test]
    fn test_identity_serde_validates() {
        let identity: Identity = serde_json::from_str("\"bob\"").unwrap();
        assert_eq!(identity.as_str(), "bob");
        assert_eq!(serde_json::to_string(&identity).unwrap(), "\"bob\"");

        assert!(serde_json::from_str::<Identity>("\"\"").is_err());
    }
}
