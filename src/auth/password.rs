use crate::error::AppError;
use bcrypt::{hash, verify};

/// bcrypt work factor.
const BCRYPT_COST: u32 = 12;

/// Hashes a plaintext password for storage. Each call salts independently,
/// so equal passwords never share a hash.
pub fn hash_password(plain: &str) -> Result<String, AppError> {
    hash(plain, BCRYPT_COST)
        .map_err(|e| AppError::InternalServerError(format!("Password hashing failed: {}", e)))
}

/// Checks a plaintext password against a stored hash.
pub fn verify_password(plain: &str, stored_hash: &str) -> Result<bool, AppError> {
    verify(plain, stored_hash)
        .map_err(|e| AppError::InternalServerError(format!("Password verification failed: {}", e)))
}
