//! Tests for the Turnstile builder pattern

use turnstile::{LockoutConfig, TurnstileBuilder};

#[tokio::test]
async fn test_builder_with_memory() {
    let turnstile = TurnstileBuilder::new()
        .with_memory()
        .build()
        .await
        .expect("Failed to build Turnstile");

    turnstile.health_check().await.expect("Health check failed");
    assert_eq!(turnstile.config(), &LockoutConfig::default());
}

#[tokio::test]
async fn test_builder_lockout_config_before_storage() {
    let turnstile = TurnstileBuilder::new()
        .with_lockout(LockoutConfig::default().with_max_failed_attempts(1))
        .with_memory()
        .build()
        .await
        .unwrap();

    turnstile.record_failure("alice").await.unwrap();
    assert!(turnstile.check_allowed("alice").await.unwrap().is_allowed());
    turnstile.record_failure("alice").await.unwrap();
    assert!(turnstile.check_allowed("alice").await.unwrap().is_locked());
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_builder_with_sqlite() {
    let turnstile = TurnstileBuilder::new()
        .with_sqlite("sqlite::memory:")
        .await
        .expect("Failed to connect to SQLite")
        .apply_migrations(true)
        .build()
        .await
        .expect("Failed to build Turnstile");

    turnstile.health_check().await.expect("Health check failed");
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_manual_migration() {
    let turnstile = TurnstileBuilder::new()
        .with_sqlite("sqlite::memory:")
        .await
        .unwrap()
        .build()
        .await
        .unwrap();

    // Schema is not there yet
    assert!(
        turnstile
            .record_failure("alice")
            .await
            .unwrap_err()
            .is_store_unavailable()
    );

    turnstile.migrate().await.expect("Failed to migrate");
    // Running again is a no-op
    turnstile.migrate().await.expect("Failed to migrate twice");

    assert_eq!(
        turnstile
            .record_failure("alice")
            .await
            .unwrap()
            .failed_attempts,
        1
    );
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_builder_invalid_sqlite_url() {
    let result = TurnstileBuilder::new()
        .with_sqlite("sqlite://attempts.db?mode=bogus")
        .await;
    assert!(matches!(
        result,
        Err(turnstile::TurnstileBuilderError::StorageConnection(_))
    ));
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_builder_with_sqlite_file() {
    let path = std::env::temp_dir().join(format!(
        "turnstile-builder-{}-{}.db",
        std::process::id(),
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ));
    let _ = std::fs::remove_file(&path);
    let url = format!("sqlite://{}", path.display());

    {
        let turnstile = TurnstileBuilder::new()
            .with_sqlite(&url)
            .await
            .unwrap()
            .apply_migrations(true)
            .build()
            .await
            .unwrap();
        turnstile.record_failure("alice").await.unwrap();
    }

    // Records survive reconnecting
    let turnstile = TurnstileBuilder::new()
        .with_sqlite(&url)
        .await
        .unwrap()
        .apply_migrations(true)
        .build()
        .await
        .unwrap();
    assert_eq!(
        turnstile.attempts("alice").await.unwrap().unwrap().failed_attempts,
        1
    );

    let _ = std::fs::remove_file(&path);
}
