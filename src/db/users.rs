/// User database operations
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{AuthError, Result};
use crate::models::User;

/// Create a new user.
///
/// Uniqueness rides on the UNIQUE constraint on `username`, never on an
/// application-level existence check: of any set of concurrent registrations
/// for the same name, exactly one insert wins and the rest map to
/// `AlreadyExists`.
pub async fn create(pool: &SqlitePool, username: &str, password_hash: &str) -> Result<User> {
    let user = User {
        id: Uuid::new_v4(),
        username: username.to_string(),
        password_hash: password_hash.to_string(),
        created_at: Utc::now(),
    };

    sqlx::query("INSERT INTO users (id, username, password_hash, created_at) VALUES ($1, $2, $3, $4)")
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::AlreadyExists,
            _ => AuthError::Store(e.to_string()),
        })?;

    Ok(user)
}

/// Find user by username (case-sensitive, matching the unique constraint).
pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Find user by ID.
pub async fn find_by_id(pool: &SqlitePool, user_id: Uuid) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}
