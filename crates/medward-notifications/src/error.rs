use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Send timed out: {0}")]
    Timeout(String),

    #[error("Recipient rejected: {0}")]
    RecipientRejected(String),
}
