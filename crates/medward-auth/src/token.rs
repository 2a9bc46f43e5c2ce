//! Access-token issuance.
//!
//! Tokens are compact three-part JWT strings signed with HMAC-SHA256 over
//! a shared secret. The issuer copies the caller's claims and adds an
//! `exp` timestamp; decoding/verification is left to whatever collaborator
//! holds the same secret.

use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Map, Value};
use std::time::Duration;
use time::OffsetDateTime;

use crate::config::AuthConfig;
use crate::error::{AuthError, AuthResult};

/// The role marker embedded in issued tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Patient,
    Doctor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Doctor => "doctor",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standard claims for an account token: subject identifier plus role.
pub fn subject_claims(subject: i64, role: Role) -> Map<String, Value> {
    let mut claims = Map::new();
    claims.insert("sub".to_string(), Value::from(subject.to_string()));
    claims.insert("role".to_string(), Value::from(role.as_str()));
    claims
}

/// A freshly issued token together with its embedded expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Compact `header.payload.signature` string.
    pub token: String,
    /// The instant written into the `exp` claim, which truncates to
    /// whole seconds.
    pub expires_at: OffsetDateTime,
}

/// Issues HMAC-SHA256 signed access tokens.
///
/// Construction fails when the configured secret is empty, so a
/// misconfigured process stops at startup instead of issuing insecurely
/// signed tokens.
#[derive(Debug)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    default_ttl: Duration,
}

impl TokenIssuer {
    /// Creates an issuer from validated configuration.
    pub fn new(config: &AuthConfig) -> AuthResult<Self> {
        config.validate()?;
        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.token_secret.as_bytes()),
            default_ttl: config.token_ttl,
        })
    }

    /// Issues a token carrying the given claims.
    ///
    /// The claims map is copied as-is and `exp` is set to now + `ttl`
    /// (the configured default when `ttl` is `None`). Claim keys are
    /// opaque to the issuer; by convention callers pass `sub` and `role`
    /// (see [`subject_claims`]).
    pub fn issue(
        &self,
        claims: Map<String, Value>,
        ttl: Option<Duration>,
    ) -> AuthResult<IssuedToken> {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let expires_at = OffsetDateTime::now_utc() + ttl;

        let mut payload = claims;
        payload.insert("exp".to_string(), Value::from(expires_at.unix_timestamp()));

        let token = encode(&Header::default(), &payload, &self.encoding_key)
            .map_err(|e| AuthError::token_encoding(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
    use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

    const SECRET: &str = "unit-test-secret";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(&AuthConfig {
            token_secret: SECRET.to_string(),
            ..AuthConfig::default()
        })
        .unwrap()
    }

    fn decode_payload(token: &str) -> Map<String, Value> {
        let payload = token.split('.').nth(1).expect("three-part token");
        let bytes = URL_SAFE_NO_PAD.decode(payload).unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_empty_secret_is_rejected_at_construction() {
        let err = TokenIssuer::new(&AuthConfig::default()).unwrap_err();
        assert!(matches!(err, AuthError::Configuration { .. }));
    }

    #[test]
    fn test_token_is_compact_three_part_string() {
        let issued = issuer().issue(subject_claims(42, Role::Patient), None).unwrap();
        assert_eq!(issued.token.split('.').count(), 3);
    }

    #[test]
    fn test_claims_round_trip_with_shared_secret() {
        let issued = issuer().issue(subject_claims(42, Role::Patient), None).unwrap();

        let decoded = decode::<Map<String, Value>>(
            &issued.token,
            &DecodingKey::from_secret(SECRET.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap();

        assert_eq!(decoded.claims.get("sub"), Some(&Value::from("42")));
        assert_eq!(decoded.claims.get("role"), Some(&Value::from("patient")));
    }

    #[test]
    fn test_embedded_expiry_is_exactly_issue_time_plus_ttl() {
        let ttl = Duration::from_secs(3600);
        let before = OffsetDateTime::now_utc();
        let issued = issuer()
            .issue(subject_claims(7, Role::Doctor), Some(ttl))
            .unwrap();
        let after = OffsetDateTime::now_utc();

        let payload = decode_payload(&issued.token);
        let exp = payload.get("exp").and_then(Value::as_i64).unwrap();

        // The embedded exp is the instant the issuer reported
        assert_eq!(exp, issued.expires_at.unix_timestamp());
        // and it is issue-time + ttl, bracketed by the call window.
        assert!(exp >= (before + ttl).unix_timestamp() - 1);
        assert!(exp <= (after + ttl).unix_timestamp() + 1);
    }

    #[test]
    fn test_default_ttl_is_90_days() {
        let before = OffsetDateTime::now_utc();
        let issued = issuer().issue(Map::new(), None).unwrap();
        let ninety_days = Duration::from_secs(90 * 24 * 3600);
        let delta = issued.expires_at - before;
        assert!(delta >= time::Duration::seconds(ninety_days.as_secs() as i64 - 2));
        assert!(delta <= time::Duration::seconds(ninety_days.as_secs() as i64 + 2));
    }

    #[test]
    fn test_caller_claims_are_copied_verbatim() {
        let mut claims = Map::new();
        claims.insert("sub".to_string(), Value::from("42"));
        claims.insert("ward".to_string(), Value::from("B2"));
        let issued = issuer().issue(claims, None).unwrap();

        let payload = decode_payload(&issued.token);
        assert_eq!(payload.get("ward"), Some(&Value::from("B2")));
        assert_eq!(payload.get("sub"), Some(&Value::from("42")));
    }

    #[test]
    fn test_expired_token_fails_validation() {
        let issued = issuer()
            .issue(subject_claims(1, Role::Patient), Some(Duration::ZERO))
            .unwrap();

        // Let the embedded expiry fall strictly into the past.
        std::thread::sleep(Duration::from_secs(2));

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let err = decode::<Map<String, Value>>(
            &issued.token,
            &DecodingKey::from_secret(SECRET.as_bytes()),
            &validation,
        )
        .unwrap_err();
        assert_eq!(
            err.kind(),
            &jsonwebtoken::errors::ErrorKind::ExpiredSignature
        );
    }

    #[test]
    fn test_tampered_token_fails_validation() {
        let issued = issuer().issue(subject_claims(1, Role::Patient), None).unwrap();
        let mut parts: Vec<&str> = issued.token.split('.').collect();
        let forged_payload = URL_SAFE_NO_PAD.encode(
            serde_json::to_vec(&serde_json::json!({
                "sub": "999",
                "role": "doctor",
                "exp": issued.expires_at.unix_timestamp(),
            }))
            .unwrap(),
        );
        parts[1] = &forged_payload;
        let forged = parts.join(".");

        assert!(
            decode::<Map<String, Value>>(
                &forged,
                &DecodingKey::from_secret(SECRET.as_bytes()),
                &Validation::new(Algorithm::HS256),
            )
            .is_err()
        );
    }
}
