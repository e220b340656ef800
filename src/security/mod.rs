/// Security module for authentication
/// Provides password hashing and signed-token issuance/verification
pub mod jwt;
pub mod password;

pub use jwt::{Claims, TokenResponse, TokenSigner};
pub use password::{hash_password, verify_password};
