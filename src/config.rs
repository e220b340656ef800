/// Configuration management
use serde::Deserialize;

use crate::error::{AuthError, Result};

/// HMAC-SHA256 needs a key at least as long as its 256-bit output.
pub const MIN_JWT_SECRET_BYTES: usize = 32;

fn default_token_ttl_secs() -> i64 {
    7200 // 2 hours
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: i64,
}

impl Config {
    /// Load configuration from the environment, reading a `.env` file first
    /// when one is present. Fails when the signing setup is unusable.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        let config: Config =
            envy::from_env().map_err(|e| AuthError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// The system this replaces fell back to a hardcoded signing key when
    /// none was configured. Here a missing or short key refuses to start.
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.len() < MIN_JWT_SECRET_BYTES {
            return Err(AuthError::Configuration(format!(
                "jwt_secret must be at least {MIN_JWT_SECRET_BYTES} bytes"
            )));
        }
        if self.jwt_issuer.is_empty() {
            return Err(AuthError::Configuration("jwt_issuer must be set".to_string()));
        }
        if self.jwt_audience.is_empty() {
            return Err(AuthError::Configuration(
                "jwt_audience must be set".to_string(),
            ));
        }
        if self.token_ttl_secs <= 0 {
            return Err(AuthError::Configuration(
                "token_ttl_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
