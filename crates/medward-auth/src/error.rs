//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during credential and token operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username unknown or password mismatch. Deliberately carries no
    /// detail about which of the two failed.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The account has no stored password hash.
    ///
    /// This is a data-integrity condition, distinct from a wrong
    /// password.
    #[error("No password hash stored for this account")]
    MissingHash,

    /// The stored password hash is not a recognized PHC string.
    ///
    /// Also a data-integrity condition, never reported as a failed
    /// verification.
    #[error("Malformed password hash: {message}")]
    MalformedHash { message: String },

    /// Password hashing itself failed.
    #[error("Password hashing failed: {message}")]
    Hashing { message: String },

    /// The auth configuration is invalid (e.g. the token secret is
    /// unset). Raised eagerly at construction, before any token is
    /// issued.
    #[error("Auth configuration error: {message}")]
    Configuration { message: String },

    /// Failed to encode a token.
    #[error("Failed to encode token: {message}")]
    TokenEncoding { message: String },
}

impl AuthError {
    /// Creates a new `MalformedHash` error.
    pub fn malformed_hash(message: impl Into<String>) -> Self {
        Self::MalformedHash {
            message: message.into(),
        }
    }

    /// Creates a new `Hashing` error.
    pub fn hashing(message: impl Into<String>) -> Self {
        Self::Hashing {
            message: message.into(),
        }
    }

    /// Creates a new `Configuration` error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new `TokenEncoding` error.
    pub fn token_encoding(message: impl Into<String>) -> Self {
        Self::TokenEncoding {
            message: message.into(),
        }
    }
}

/// Type alias for authentication results.
pub type AuthResult<T> = Result<T, AuthError>;
