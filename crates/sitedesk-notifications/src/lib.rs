//! Outbound notifications for contact-form submissions.
//!
//! Delivery is best-effort by contract: the server spawns sends off the
//! request path and only logs the outcome, so nothing here may affect an
//! HTTP response.

pub mod contact;
pub mod error;
pub mod mailer;

pub use contact::{notification_body, notification_subject};
pub use error::NotificationError;
pub use mailer::{Mailer, NoopMailer, SmtpConfig, SmtpMailer};
