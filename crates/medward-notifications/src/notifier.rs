//! Best-effort notification dispatch.

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapters::Mailer;
use crate::templates;
use crate::types::EmailMessage;

/// Wraps a [`Mailer`] and downgrades delivery failures to log lines.
///
/// Every method returns whether delivery succeeded; a `false` means
/// "notification not guaranteed delivered" and must never abort the
/// operation that triggered the send. Do not call these inside a
/// database transaction.
#[derive(Clone)]
pub struct Notifier {
    mailer: Arc<dyn Mailer>,
}

impl Notifier {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }

    /// Sends one message, swallowing any failure.
    pub async fn send(&self, message: EmailMessage) -> bool {
        match self.mailer.send(&message).await {
            Ok(()) => {
                info!(
                    to = %message.to,
                    transport = self.mailer.transport_name(),
                    "email sent"
                );
                true
            }
            Err(err) => {
                warn!(
                    to = %message.to,
                    transport = self.mailer.transport_name(),
                    error = %err,
                    "email delivery failed"
                );
                false
            }
        }
    }

    /// Welcome email after registration.
    pub async fn notify_registration(&self, to: &str, name: &str) -> bool {
        self.send(templates::registration(to, name)).await
    }

    /// Procedure completion/reopen status update.
    pub async fn notify_procedure_status(
        &self,
        to: &str,
        name: &str,
        treatment: Option<&str>,
        completed: bool,
    ) -> bool {
        self.send(templates::procedure_status(to, name, treatment, completed))
            .await
    }

    /// Rotation notice: completed course archived, new one opened.
    pub async fn notify_episode_rotated(
        &self,
        to: &str,
        name: &str,
        department: Option<&str>,
    ) -> bool {
        self.send(templates::episode_rotated(to, name, department))
            .await
    }
}
