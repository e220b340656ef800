/// Revocation ledger tests: idempotency, membership, pruning.
mod common;

use authgate::db::revocations;
use authgate::AuthError;
use chrono::{Duration, Utc};
use common::test_pool;
use sqlx::SqlitePool;
use uuid::Uuid;

async fn ledger_rows(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM revoked_tokens")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn revoke_is_idempotent() {
    let pool = test_pool().await;
    let jti = Uuid::new_v4().to_string();
    let expires_at = Utc::now() + Duration::hours(2);

    revocations::revoke(&pool, &jti, expires_at).await.unwrap();
    let first = revocations::find(&pool, &jti).await.unwrap().unwrap();

    revocations::revoke(&pool, &jti, expires_at).await.unwrap();
    let second = revocations::find(&pool, &jti).await.unwrap().unwrap();

    assert!(revocations::is_revoked(&pool, &jti).await.unwrap());
    assert_eq!(ledger_rows(&pool).await, 1);
    // The earliest revocation stands; nothing ever rewrites it.
    assert_eq!(first.revoked_at, second.revoked_at);
    assert_eq!(first.id, second.id);
}

#[tokio::test]
async fn never_issued_jti_is_not_revoked() {
    let pool = test_pool().await;
    let jti = Uuid::new_v4().to_string();

    assert!(!revocations::is_revoked(&pool, &jti).await.unwrap());
}

#[tokio::test]
async fn malformed_jti_is_rejected_without_a_write() {
    let pool = test_pool().await;
    let expires_at = Utc::now() + Duration::hours(2);

    for bad in ["", "not-a-uuid", "12345"] {
        let result = revocations::revoke(&pool, bad, expires_at).await;
        assert!(matches!(result, Err(AuthError::InvalidTokenId)));
    }

    assert_eq!(ledger_rows(&pool).await, 0);
}

#[tokio::test]
async fn prune_removes_only_expired_records() {
    let pool = test_pool().await;

    let dead_jti = Uuid::new_v4().to_string();
    let live_jti = Uuid::new_v4().to_string();

    revocations::revoke(&pool, &dead_jti, Utc::now() - Duration::hours(1))
        .await
        .unwrap();
    revocations::revoke(&pool, &live_jti, Utc::now() + Duration::hours(1))
        .await
        .unwrap();

    assert_eq!(revocations::count_active(&pool).await.unwrap(), 1);

    let pruned = revocations::prune_expired(&pool).await.unwrap();
    assert_eq!(pruned, 1);

    // The record guarding a live token must survive pruning.
    assert!(revocations::is_revoked(&pool, &live_jti).await.unwrap());
    assert_eq!(ledger_rows(&pool).await, 1);
}
