/// Revocation ledger operations
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{AuthError, Result};
use crate::models::RevokedToken;

/// Record a token ID as revoked.
///
/// Idempotent: a jti already in the ledger is left untouched, so the earliest
/// `revoked_at` stands and revocation stays monotonic. An empty or non-UUID
/// jti is rejected before touching the store.
pub async fn revoke(pool: &SqlitePool, jti: &str, token_expires_at: DateTime<Utc>) -> Result<()> {
    if jti.is_empty() || Uuid::parse_str(jti).is_err() {
        return Err(AuthError::InvalidTokenId);
    }

    sqlx::query(
        r#"
        INSERT INTO revoked_tokens (id, jti, revoked_at, token_expires_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (jti) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(jti)
    .bind(Utc::now())
    .bind(token_expires_at)
    .execute(pool)
    .await?;

    tracing::info!(jti, "token revoked");
    Ok(())
}

/// Point-in-time membership check.
///
/// Always a fresh lookup against the authoritative store. Any revoke that
/// completed before this check began is visible; there is no cache that
/// could serve a stale "not revoked".
pub async fn is_revoked(pool: &SqlitePool, jti: &str) -> Result<bool> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE jti = $1)")
            .bind(jti)
            .fetch_one(pool)
            .await?;

    Ok(exists)
}

/// Fetch the ledger record for a jti, if present.
pub async fn find(pool: &SqlitePool, jti: &str) -> Result<Option<RevokedToken>> {
    let record = sqlx::query_as::<_, RevokedToken>("SELECT * FROM revoked_tokens WHERE jti = $1")
        .bind(jti)
        .fetch_optional(pool)
        .await?;

    Ok(record)
}

/// Delete ledger entries whose token has expired anyway (maintenance
/// operation, never on the request path). Returns the number of rows removed.
pub async fn prune_expired(pool: &SqlitePool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM revoked_tokens WHERE token_expires_at < $1")
        .bind(Utc::now())
        .execute(pool)
        .await?;

    let pruned = result.rows_affected();
    if pruned > 0 {
        tracing::info!(pruned, "pruned expired revocation records");
    }
    Ok(pruned)
}

/// Number of ledger entries still blocking live tokens.
pub async fn count_active(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM revoked_tokens WHERE token_expires_at > $1",
    )
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(count)
}
