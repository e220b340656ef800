/// Signed-token issuance and verification (HS256 JWTs).
///
/// Signing material is loaded once at startup into a [`TokenSigner`] and
/// handed to the service as an explicit dependency; nothing reads key
/// configuration ad hoc, and there is no fallback key.
///
/// Verification runs the cheap checks in a fixed order before anyone touches
/// the revocation ledger: signature, then expiry, then issuer/audience. Each
/// failure maps to a distinct internal error so logs and tests can tell the
/// stages apart, even though clients see a uniform rejection.
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{Config, MIN_JWT_SECRET_BYTES};
use crate::error::{AuthError, Result};
use crate::models::User;

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

/// Claims carried inside every issued token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Username at issuance time
    pub username: String,
    /// Unique token ID; the revocation key
    pub jti: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

/// What a successful login hands back to the client.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    ttl: Duration,
}

impl TokenSigner {
    /// Build a signer from validated configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.jwt_secret,
            &config.jwt_issuer,
            &config.jwt_audience,
            Duration::seconds(config.token_ttl_secs),
        )
    }

    pub fn new(secret: &str, issuer: &str, audience: &str, ttl: Duration) -> Result<Self> {
        if secret.len() < MIN_JWT_SECRET_BYTES {
            return Err(AuthError::Configuration(format!(
                "signing key must be at least {MIN_JWT_SECRET_BYTES} bytes for HMAC-SHA256"
            )));
        }

        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        // No leeway: a token expired by one second is expired.
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            issuer: issuer.to_string(),
            audience: audience.to_string(),
            ttl,
        })
    }

    /// Issue a signed token for `user` with a fresh globally-unique token ID.
    ///
    /// Pure with respect to the stores: issuance never writes anywhere.
    pub fn issue(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))
    }

    /// Issue a token wrapped in the response shape a transport returns.
    pub fn issue_response(&self, user: &User) -> Result<TokenResponse> {
        Ok(TokenResponse {
            access_token: self.issue(user)?,
            token_type: "Bearer".to_string(),
            expires_in: self.ttl.num_seconds(),
        })
    }

    /// Verify signature, expiry, issuer, and audience.
    ///
    /// Does not consult the revocation ledger; that is the service's final
    /// check after these stages pass.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    AuthError::BadSignature
                }
                ErrorKind::InvalidIssuer => AuthError::IssuerMismatch,
                ErrorKind::InvalidAudience => AuthError::AudienceMismatch,
                _ => AuthError::Malformed,
            })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
