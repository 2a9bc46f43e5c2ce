//! Direct SMTP delivery.

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use super::Mailer;
use crate::config::{EmailConfig, SmtpTls};
use crate::error::NotificationError;
use crate::types::EmailMessage;

/// Sends mail over an authenticated SMTP session, TLS-wrapped or
/// STARTTLS depending on configuration.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &EmailConfig) -> Result<Self, NotificationError> {
        let host = config.smtp.host.as_deref().ok_or_else(|| {
            NotificationError::InvalidConfig("email.smtp.host is required in smtp mode".into())
        })?;
        let (username, password) = match (&config.smtp.username, &config.smtp.password) {
            (Some(u), Some(p)) => (u.clone(), p.clone()),
            _ => {
                return Err(NotificationError::InvalidConfig(
                    "email.smtp.username and email.smtp.password are required in smtp mode".into(),
                ));
            }
        };

        let builder = match config.smtp.tls {
            SmtpTls::Implicit => AsyncSmtpTransport::<Tokio1Executor>::relay(host),
            SmtpTls::Starttls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host),
        }
        .map_err(|e| NotificationError::InvalidConfig(e.to_string()))?
        .port(config.smtp.port)
        .credentials(Credentials::new(username, password))
        .timeout(Some(config.send_timeout));

        let from = config
            .from
            .parse()
            .map_err(|e| NotificationError::InvalidConfig(format!("Invalid from address: {e}")))?;

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotificationError> {
        let to = message
            .to
            .parse()
            .map_err(|e| NotificationError::RecipientRejected(format!("{}: {e}", message.to)))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map(|_| ())
            .map_err(|e| NotificationError::SendFailed(e.to_string()))
    }

    fn transport_name(&self) -> &'static str {
        "smtp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SmtpSettings;

    fn smtp_config() -> EmailConfig {
        EmailConfig {
            from: "noreply@medward.example".to_string(),
            smtp: SmtpSettings {
                host: Some("smtp.medward.example".to_string()),
                username: Some("mailer".to_string()),
                password: Some("secret".to_string()),
                ..SmtpSettings::default()
            },
            ..EmailConfig::default()
        }
    }

    #[test]
    fn test_new_with_full_settings() {
        let mailer = SmtpMailer::new(&smtp_config()).unwrap();
        assert_eq!(mailer.transport_name(), "smtp");
    }

    #[test]
    fn test_new_without_credentials_fails() {
        let mut config = smtp_config();
        config.smtp.username = None;
        assert!(matches!(
            SmtpMailer::new(&config),
            Err(NotificationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_new_with_unparseable_from_fails() {
        let mut config = smtp_config();
        config.from = "not an address".to_string();
        assert!(matches!(
            SmtpMailer::new(&config),
            Err(NotificationError::InvalidConfig(_))
        ));
    }
}
