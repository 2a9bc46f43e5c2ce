//! Authentication configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{AuthError, AuthResult};

/// Default lifetime of issued access tokens: 90 days.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(90 * 24 * 3600);

/// Token signing configuration.
///
/// The secret is process-wide and must not change during the process
/// lifetime, or previously issued tokens become unverifiable. There is no
/// built-in fallback value: an unset secret is a construction-time error.
///
/// # Example (TOML)
///
/// ```toml
/// [auth]
/// token_secret = "change-me"
/// token_ttl = "90days"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared HMAC secret used to sign tokens.
    pub token_secret: String,

    /// Lifetime of issued tokens.
    #[serde(with = "humantime_serde")]
    pub token_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: String::new(),
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }
}

impl AuthConfig {
    /// Fails fast when the configuration cannot produce secure tokens.
    pub fn validate(&self) -> AuthResult<()> {
        if self.token_secret.trim().is_empty() {
            return Err(AuthError::configuration(
                "auth.token_secret must be set; refusing to issue unsigned tokens",
            ));
        }
        if self.token_ttl.is_zero() {
            return Err(AuthError::configuration("auth.token_ttl must be > 0"));
        }
        Ok(())
    }
}
