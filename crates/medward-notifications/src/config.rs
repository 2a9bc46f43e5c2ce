//! Email delivery configuration.
//!
//! Two delivery modes exist: a token-authenticated HTTPS JSON POST to a
//! transactional-mail API, and a direct authenticated SMTP session. The
//! mode is chosen once at startup; each mode requires its own set of
//! settings, and a missing setting for the selected mode is a
//! configuration error rather than a silent no-op.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::NotificationError;

/// Which delivery backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailMode {
    Api,
    #[default]
    Smtp,
}

/// How the SMTP session is encrypted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmtpTls {
    /// STARTTLS upgrade on a plaintext connection (port 587 convention).
    #[default]
    Starttls,
    /// TLS-wrapped from the first byte (port 465 convention).
    Implicit,
}

/// Settings for [`EmailMode::Api`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Send endpoint of the transactional-mail API.
    pub endpoint: String,
    /// Bearer token.
    pub token: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://send.api.mailtrap.io/api/send".to_string(),
            token: None,
        }
    }
}

/// Settings for [`EmailMode::Smtp`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpSettings {
    pub host: Option<String>,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub tls: SmtpTls,
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            host: None,
            port: 587,
            username: None,
            password: None,
            tls: SmtpTls::default(),
        }
    }
}

/// Root email configuration.
///
/// # Example (TOML)
///
/// ```toml
/// [email]
/// mode = "smtp"
/// from = "noreply@medward.example"
///
/// [email.smtp]
/// host = "smtp.medward.example"
/// username = "mailer"
/// password = "secret"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub mode: EmailMode,

    /// Sender address used in both modes.
    pub from: String,

    /// Upper bound on one outbound delivery attempt. The gateway call
    /// must never hang the operation that triggered it.
    #[serde(with = "humantime_serde")]
    pub send_timeout: Duration,

    pub api: ApiSettings,
    pub smtp: SmtpSettings,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            mode: EmailMode::default(),
            from: String::new(),
            send_timeout: Duration::from_secs(10),
            api: ApiSettings::default(),
            smtp: SmtpSettings::default(),
        }
    }
}

impl EmailConfig {
    /// Checks that the selected mode has everything it needs.
    pub fn validate(&self) -> Result<(), NotificationError> {
        if self.from.trim().is_empty() {
            return Err(NotificationError::InvalidConfig(
                "email.from must be set".to_string(),
            ));
        }
        if self.send_timeout.is_zero() {
            return Err(NotificationError::InvalidConfig(
                "email.send_timeout must be > 0".to_string(),
            ));
        }
        match self.mode {
            EmailMode::Api => {
                if self.api.token.as_deref().is_none_or(|t| t.trim().is_empty()) {
                    return Err(NotificationError::InvalidConfig(
                        "email.api.token is required in api mode".to_string(),
                    ));
                }
            }
            EmailMode::Smtp => {
                if self.smtp.host.as_deref().is_none_or(|h| h.trim().is_empty()) {
                    return Err(NotificationError::InvalidConfig(
                        "email.smtp.host is required in smtp mode".to_string(),
                    ));
                }
                if self.smtp.username.is_none() || self.smtp.password.is_none() {
                    return Err(NotificationError::InvalidConfig(
                        "email.smtp.username and email.smtp.password are required in smtp mode"
                            .to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}
