// Bearer-token authentication core.
//
// Credential storage, signed-token issuance, and an append-only revocation
// ledger consulted on every validation. The HTTP transport is the caller's
// concern; this crate exposes the operations a transport mounts.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod security;
pub mod services;
pub mod telemetry;

pub use config::Config;
pub use error::{AuthError, Result};
pub use models::{RevokedToken, User};
pub use security::jwt::{Claims, TokenResponse, TokenSigner};
pub use services::AuthService;
