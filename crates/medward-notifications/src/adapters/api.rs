//! Transactional-mail API delivery.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use super::Mailer;
use crate::config::EmailConfig;
use crate::error::NotificationError;
use crate::types::EmailMessage;

/// Sends mail through a token-authenticated HTTPS JSON endpoint
/// (Mailtrap-style send API).
pub struct ApiMailer {
    http_client: Client,
    endpoint: String,
    token: String,
    from: String,
}

impl ApiMailer {
    pub fn new(config: &EmailConfig) -> Result<Self, NotificationError> {
        let token = config
            .api
            .token
            .clone()
            .ok_or_else(|| {
                NotificationError::InvalidConfig("email.api.token is required in api mode".into())
            })?;

        let http_client = Client::builder()
            .timeout(config.send_timeout)
            .build()
            .map_err(|e| NotificationError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: config.api.endpoint.clone(),
            token,
            from: config.from.clone(),
        })
    }
}

#[async_trait]
impl Mailer for ApiMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotificationError> {
        let body = json!({
            "from": {"email": self.from},
            "to": [{"email": message.to}],
            "subject": message.subject,
            "text": message.body,
        });

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NotificationError::Timeout(e.to_string())
                } else {
                    NotificationError::SendFailed(e.to_string())
                }
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            Err(NotificationError::SendFailed(format!("{status}: {detail}")))
        }
    }

    fn transport_name(&self) -> &'static str {
        "api"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiSettings, EmailMode};

    #[test]
    fn test_new_requires_token() {
        let config = EmailConfig {
            mode: EmailMode::Api,
            from: "noreply@medward.example".to_string(),
            ..EmailConfig::default()
        };
        assert!(matches!(
            ApiMailer::new(&config),
            Err(NotificationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_new_with_token() {
        let config = EmailConfig {
            mode: EmailMode::Api,
            from: "noreply@medward.example".to_string(),
            api: ApiSettings {
                token: Some("tok".to_string()),
                ..ApiSettings::default()
            },
            ..EmailConfig::default()
        };
        let mailer = ApiMailer::new(&config).unwrap();
        assert_eq!(mailer.transport_name(), "api");
    }
}
