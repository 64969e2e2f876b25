use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use turnstile::{
    AuthError, Authenticator, Error, Identity, LockoutConfig, StoreFailurePolicy, Turnstile,
};

#[derive(Debug, Clone, PartialEq)]
struct User {
    username: String,
}

/// Stand-in for the host application's user store and password check
struct UserTable {
    passwords: HashMap<String, String>,
}

impl UserTable {
    fn new() -> Self {
        let mut passwords = HashMap::new();
        passwords.insert("alice".to_string(), "correct horse".to_string());
        passwords.insert("bob".to_string(), "battery staple".to_string());
        Self { passwords }
    }
}

#[async_trait]
impl Authenticator for UserTable {
    type Principal = User;

    async fn verify(&self, identity: &Identity, secret: &str) -> Result<Option<User>, Error> {
        Ok(match self.passwords.get(identity.as_str()) {
            Some(password) if password == secret => Some(User {
                username: identity.to_string(),
            }),
            _ => None,
        })
    }
}

#[tokio::test]
async fn test_lockout_and_admin_unlock() {
    let turnstile = Turnstile::in_memory(LockoutConfig::default());
    let flow = turnstile.login_flow(Arc::new(UserTable::new()));

    let user = flow.login("alice", "correct horse").await.unwrap();
    assert_eq!(user.username, "alice");

    for _ in 0..6 {
        let err = flow.login("alice", "guess").await.unwrap_err();
        assert!(matches!(err, Error::Auth(AuthError::InvalidCredentials)));
    }

    // Locked: the correct password gives the same generic error
    let err = flow.login("alice", "correct horse").await.unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::InvalidCredentials)));
    assert!(turnstile.check_allowed("alice").await.unwrap().is_locked());

    // Other identities are unaffected
    assert!(flow.login("bob", "battery staple").await.is_ok());

    assert!(turnstile.unlock("alice").await.unwrap());
    assert!(flow.login("alice", "correct horse").await.is_ok());
}

#[tokio::test]
async fn test_reset_on_success_keeps_occasional_typos_from_locking() {
    let turnstile = Turnstile::in_memory(LockoutConfig::default().with_reset_on_success(true));
    let flow = turnstile.login_flow(Arc::new(UserTable::new()));

    for _ in 0..10 {
        assert!(flow.login("alice", "typo").await.is_err());
        assert!(flow.login("alice", "correct horse").await.is_ok());
    }
    assert_eq!(
        turnstile.attempts("alice").await.unwrap().unwrap().failed_attempts,
        0
    );
}

#[tokio::test]
async fn test_unknown_users_are_tracked() {
    let turnstile = Turnstile::in_memory(LockoutConfig::default());
    let flow = turnstile.login_flow(Arc::new(UserTable::new()));

    for _ in 0..6 {
        assert!(flow.login("mallory", "x").await.is_err());
    }
    assert!(turnstile.check_allowed("mallory").await.unwrap().is_locked());
}

#[tokio::test]
async fn test_disabled_lockout_never_locks() {
    let turnstile = Turnstile::in_memory(LockoutConfig::disabled());
    let flow = turnstile.login_flow(Arc::new(UserTable::new()));

    for _ in 0..20 {
        assert!(flow.login("alice", "guess").await.is_err());
    }
    assert!(flow.login("alice", "correct horse").await.is_ok());
    assert!(turnstile.attempts("alice").await.unwrap().is_none());
}

#[tokio::test]
async fn test_config_loaded_from_json() {
    let config: LockoutConfig = serde_json::from_str(
        r#"{ "max_failed_attempts": 2, "store_failure_policy": "fail_open" }"#,
    )
    .unwrap();
    assert_eq!(config.store_failure_policy, StoreFailurePolicy::FailOpen);

    let turnstile = Turnstile::in_memory(config);
    let flow = turnstile.login_flow(Arc::new(UserTable::new()));

    for _ in 0..3 {
        assert!(flow.login("bob", "nope").await.is_err());
    }
    assert!(flow.login("bob", "battery staple").await.is_err());
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_login_flow_with_sqlite() {
    let turnstile = turnstile::TurnstileBuilder::new()
        .with_sqlite("sqlite::memory:")
        .await
        .unwrap()
        .apply_migrations(true)
        .build()
        .await
        .unwrap();
    let flow = turnstile.login_flow(Arc::new(UserTable::new()));

    for _ in 0..5 {
        assert!(flow.login("alice", "guess").await.is_err());
    }
    assert!(flow.login("alice", "correct horse").await.is_ok());

    assert!(flow.login("alice", "guess").await.is_err());
    assert!(flow.login("alice", "correct horse").await.is_err());
    assert_eq!(
        turnstile.attempts("alice").await.unwrap().unwrap().failed_attempts,
        6
    );
}
