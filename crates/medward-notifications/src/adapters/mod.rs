pub mod api;
pub mod smtp;

use async_trait::async_trait;

use crate::config::{EmailConfig, EmailMode};
use crate::error::NotificationError;
use crate::types::EmailMessage;

/// A delivery backend for outbound email.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Attempts one delivery. Bounded by the configured send timeout.
    async fn send(&self, message: &EmailMessage) -> Result<(), NotificationError>;

    /// Backend name for logging.
    fn transport_name(&self) -> &'static str;
}

/// Builds the delivery backend the configuration selects.
///
/// Called once at startup; the mode is not re-read per send. Missing
/// settings for the selected mode fail here.
pub fn build_mailer(config: &EmailConfig) -> Result<Box<dyn Mailer>, NotificationError> {
    config.validate()?;
    match config.mode {
        EmailMode::Api => Ok(Box::new(api::ApiMailer::new(config)?)),
        EmailMode::Smtp => Ok(Box::new(smtp::SmtpMailer::new(config)?)),
    }
}

pub use api::ApiMailer;
pub use smtp::SmtpMailer;
