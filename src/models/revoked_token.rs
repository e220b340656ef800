/// Revocation ledger record
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One revoked token ID. Records are append-only; nothing ever un-revokes a
/// jti while its token is still live.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RevokedToken {
    pub id: Uuid,
    pub jti: String,
    pub revoked_at: DateTime<Utc>,
    /// When the revoked token would have expired on its own. Only records
    /// past this point are eligible for pruning.
    pub token_expires_at: DateTime<Utc>,
}

impl RevokedToken {
    pub fn is_prunable(&self) -> bool {
        self.token_expires_at < Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(expires_in: Duration) -> RevokedToken {
        RevokedToken {
            id: Uuid::new_v4(),
            jti: Uuid::new_v4().to_string(),
            revoked_at: Utc::now(),
            token_expires_at: Utc::now() + expires_in,
        }
    }

    #[test]
    fn live_token_record_is_not_prunable() {
        assert!(!record(Duration::hours(1)).is_prunable());
    }

    #[test]
    fn expired_token_record_is_prunable() {
        assert!(record(Duration::hours(-1)).is_prunable());
    }
}
