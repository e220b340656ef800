#![allow(dead_code)]
/// Shared helpers for integration tests: an in-memory SQLite pool with
/// migrations applied, and signers over a fixed test key.
use authgate::{db, AuthService, TokenSigner};
use chrono::Duration;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub const TEST_SECRET: &str = "0123456789abcdef0123456789abcdef";
pub const OTHER_SECRET: &str = "fedcba9876543210fedcba9876543210";
pub const TEST_ISSUER: &str = "authgate";
pub const TEST_AUDIENCE: &str = "api-clients";

pub const TEST_USERNAME: &str = "alice";
pub const TEST_PASSWORD: &str = "pw1";

/// A single-connection pool so every query in a test observes the same
/// in-memory database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");

    db::migrate(&pool).await.expect("migrations");
    pool
}

pub fn test_signer() -> TokenSigner {
    signer_with_ttl(Duration::hours(2))
}

pub fn signer_with_ttl(ttl: Duration) -> TokenSigner {
    TokenSigner::new(TEST_SECRET, TEST_ISSUER, TEST_AUDIENCE, ttl).expect("signer")
}

pub async fn test_service() -> (AuthService, SqlitePool) {
    let pool = test_pool().await;
    (AuthService::new(pool.clone(), test_signer()), pool)
}
