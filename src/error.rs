use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Username already exists")]
    AlreadyExists,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Malformed token")]
    Malformed,

    #[error("Bad token signature")]
    BadSignature,

    #[error("Token expired")]
    Expired,

    #[error("Token issuer mismatch")]
    IssuerMismatch,

    #[error("Token audience mismatch")]
    AudienceMismatch,

    #[error("Token has been revoked")]
    Revoked,

    #[error("Invalid token id")]
    InvalidTokenId,

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AuthError>;

/// What the transport layer is allowed to show a client.
///
/// Token-validation failures all collapse to the same unauthorized rejection
/// so a probing client cannot tell which check failed. Store failures keep a
/// distinct 5xx-class code so hosts never treat an outage as "not revoked".
#[derive(Debug, Serialize)]
pub struct Rejection {
    pub status: u16,
    pub code: &'static str,
    pub message: &'static str,
}

impl AuthError {
    /// Stable machine-readable reason code for clients.
    pub fn reason_code(&self) -> &'static str {
        match self {
            AuthError::AlreadyExists => "already_exists",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::Malformed
            | AuthError::BadSignature
            | AuthError::Expired
            | AuthError::IssuerMismatch
            | AuthError::AudienceMismatch
            | AuthError::Revoked => "unauthorized",
            AuthError::InvalidTokenId => "invalid_token_id",
            AuthError::Store(_) => "store_unavailable",
            AuthError::Configuration(_) | AuthError::Internal(_) => "internal_error",
        }
    }

    /// Generic human message; internal detail is never echoed.
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::AlreadyExists => "Username already exists",
            AuthError::InvalidCredentials => "Invalid username or password",
            AuthError::Malformed
            | AuthError::BadSignature
            | AuthError::Expired
            | AuthError::IssuerMismatch
            | AuthError::AudienceMismatch
            | AuthError::Revoked => "Unauthorized",
            AuthError::InvalidTokenId => "Invalid token id",
            AuthError::Store(_) => "Service temporarily unavailable",
            AuthError::Configuration(_) | AuthError::Internal(_) => "Internal server error",
        }
    }

    /// HTTP-equivalent status class for hosting layers.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::AlreadyExists => 409,
            AuthError::InvalidCredentials => 401,
            AuthError::Malformed
            | AuthError::BadSignature
            | AuthError::Expired
            | AuthError::IssuerMismatch
            | AuthError::AudienceMismatch
            | AuthError::Revoked => 401,
            AuthError::InvalidTokenId => 400,
            AuthError::Store(_) => 503,
            AuthError::Configuration(_) | AuthError::Internal(_) => 500,
        }
    }

    pub fn rejection(&self) -> Rejection {
        Rejection {
            status: self.status_code(),
            code: self.reason_code(),
            message: self.public_message(),
        }
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::Store(err.to_string())
    }
}
