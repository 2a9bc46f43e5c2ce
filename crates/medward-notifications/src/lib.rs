//! # medward-notifications
//!
//! Best-effort email notification gateway for the MedWard hospital
//! backend.
//!
//! Two delivery backends exist behind the [`Mailer`] trait (an HTTPS
//! transactional-mail API and direct SMTP), selected once at startup by
//! [`build_mailer`]. The [`Notifier`] wrapper logs and swallows delivery
//! failures: registration and episode operations must never fail because
//! an email could not be sent.

pub mod adapters;
pub mod config;
pub mod error;
pub mod notifier;
pub mod templates;
pub mod types;

pub use adapters::{ApiMailer, Mailer, SmtpMailer, build_mailer};
pub use config::{ApiSettings, EmailConfig, EmailMode, SmtpSettings, SmtpTls};
pub use error::NotificationError;
pub use notifier::Notifier;
pub use types::EmailMessage;
