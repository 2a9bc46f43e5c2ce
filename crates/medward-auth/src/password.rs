//! Password hashing and verification.
//!
//! Hashing uses Argon2id (hybrid mode) with default parameters; salts come
//! from `OsRng`, so hashing the same password twice yields two different
//! PHC strings that both verify.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};

use crate::error::{AuthError, AuthResult};

/// Hash a password for storage.
///
/// # Returns
///
/// PHC-formatted hash string suitable for database storage.
///
/// # Example
///
/// ```
/// use medward_auth::password::{hash, verify};
///
/// let hashed = hash("my_secure_password").unwrap();
/// assert!(hashed.starts_with("$argon2id$"));
/// assert!(verify("my_secure_password", &hashed).unwrap());
/// ```
pub fn hash(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hashed = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::hashing(e.to_string()))?;
    Ok(hashed.to_string())
}

/// Verify a password against a stored hash.
///
/// # Returns
///
/// `Ok(true)` if the password matches, `Ok(false)` if it doesn't.
/// Returns `Err(AuthError::MalformedHash)` when the stored string is not
/// a recognized PHC hash, so callers can tell a wrong password from a
/// corrupted record.
pub fn verify(password: &str, hash: &str) -> AuthResult<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::malformed_hash(e.to_string()))?;
    let result = Argon2::default().verify_password(password.as_bytes(), &parsed);
    Ok(result.is_ok())
}
