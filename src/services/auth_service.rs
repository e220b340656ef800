use chrono::DateTime;
use sqlx::SqlitePool;

use crate::db;
use crate::error::{AuthError, Result};
use crate::models::User;
use crate::security::jwt::{Claims, TokenResponse, TokenSigner};
use crate::security::password;

/// The operations exposed to the hosting transport layer: `register`,
/// `login`, `logout`, and the `authenticate` gate for protected endpoints.
///
/// Holds the connection pool and the signer; no other mutable state, so the
/// service is safe to share across concurrent requests.
pub struct AuthService {
    db: SqlitePool,
    signer: TokenSigner,
}

impl AuthService {
    pub fn new(db: SqlitePool, signer: TokenSigner) -> Self {
        Self { db, signer }
    }

    /// Create an account. Of any set of concurrent registrations for the same
    /// username, exactly one succeeds; the rest get `AlreadyExists`.
    pub async fn register(&self, username: &str, password: &str) -> Result<User> {
        let password_hash = password::hash_password(password)?;
        let user = db::users::create(&self.db, username, &password_hash).await?;

        tracing::info!(username, "user registered");
        Ok(user)
    }

    /// Check credentials and issue a signed token.
    ///
    /// An unknown username and a wrong password return the identical error so
    /// a probing client cannot enumerate accounts.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse> {
        let user = db::users::find_by_username(&self.db, username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !password::verify_password(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let response = self.signer.issue_response(&user)?;
        tracing::info!(username, "user logged in");
        Ok(response)
    }

    /// Authentication gate for protected requests.
    ///
    /// Runs the signature/expiry/claims stages, then a fresh revocation
    /// lookup. A ledger hit is `Revoked`; a store failure propagates as
    /// `Store` and is never treated as "not revoked". Never mutates the
    /// ledger.
    pub async fn authenticate(&self, token: &str) -> Result<Claims> {
        let claims = self.signer.verify(token)?;

        if db::revocations::is_revoked(&self.db, &claims.jti).await? {
            return Err(AuthError::Revoked);
        }

        Ok(claims)
    }

    /// Revoke the presented token.
    ///
    /// The token must still authenticate, so a second logout of the same
    /// token observes `Revoked`. On success the token's ID is in the ledger
    /// and every later `authenticate` rejects it.
    pub async fn logout(&self, token: &str) -> Result<()> {
        let claims = self.authenticate(token).await?;

        let expires_at = DateTime::from_timestamp(claims.exp, 0).ok_or(AuthError::Malformed)?;
        db::revocations::revoke(&self.db, &claims.jti, expires_at).await?;

        tracing::info!(username = %claims.username, "user logged out");
        Ok(())
    }
}
