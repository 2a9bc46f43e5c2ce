//! The credentials capability shared by patient and doctor accounts.
//!
//! Password storage and verification behave identically for both account
//! kinds, so the logic lives here once and is composed into each entity.

use medward_core::{Doctor, Patient};

use crate::error::{AuthError, AuthResult};
use crate::password;

/// An account that carries a stored password hash.
pub trait Credentials {
    /// The stored PHC hash, or `None` when no hash is present.
    fn password_hash(&self) -> Option<&str>;

    /// Verifies a raw password against the stored hash.
    ///
    /// `Ok(false)` means wrong password. An absent hash is
    /// `AuthError::MissingHash` and an unparseable one is
    /// `AuthError::MalformedHash`; neither is reported as a mismatch.
    fn verify_password(&self, raw: &str) -> AuthResult<bool> {
        let hash = self.password_hash().ok_or(AuthError::MissingHash)?;
        password::verify(raw, hash)
    }
}

impl Credentials for Patient {
    fn password_hash(&self) -> Option<&str> {
        if self.password_hash.is_empty() {
            None
        } else {
            Some(&self.password_hash)
        }
    }
}

impl Credentials for Doctor {
    fn password_hash(&self) -> Option<&str> {
        if self.password_hash.is_empty() {
            None
        } else {
            Some(&self.password_hash)
        }
    }
}
