pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, Tokens};

/// Credentials supplied when signing in.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Address the account was registered under, matched exactly as stored
    /// (case-sensitive).
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// Credentials supplied when creating an account. The email doubles as the
/// login identifier and must be unique.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    /// At least 6 characters; hashed before it is stored.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Body returned by both register and login: the signed session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}
