//! Mail delivery.
//!
//! The [`Mailer`] trait is the seam the server spawns notification tasks
//! against. [`SmtpMailer`] delivers over SMTP; [`NoopMailer`] stands in when
//! no relay is configured so the rest of the system behaves identically.

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType, transport::smtp::authentication::Credentials,
};

use crate::error::NotificationError;

/// SMTP relay settings.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// Relay hostname.
    pub host: String,

    /// Relay port (587 for STARTTLS submission).
    pub port: u16,

    /// Relay username.
    pub username: String,

    /// Relay password.
    pub password: String,

    /// Sender address.
    pub from: String,

    /// Recipient for admin notifications.
    pub notify_to: String,
}

/// Outbound mail sender.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends an HTML email to the configured notification recipient.
    async fn send(&self, subject: &str, html_body: &str) -> Result<(), NotificationError>;

    /// Whether this mailer can actually deliver anything.
    fn is_configured(&self) -> bool {
        true
    }
}

/// SMTP-backed mailer.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
    notify_to: String,
}

impl SmtpMailer {
    /// Builds a mailer from relay settings.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::InvalidConfig` if the relay host or the
    /// configured addresses are invalid.
    pub fn new(config: &SmtpConfig) -> Result<Self, NotificationError> {
        // Validate addresses up front so failures surface at startup, not on
        // the first submission.
        config
            .from
            .parse::<lettre::message::Mailbox>()
            .map_err(|e| NotificationError::invalid_config(format!("invalid from address: {e}")))?;
        config
            .notify_to
            .parse::<lettre::message::Mailbox>()
            .map_err(|e| {
                NotificationError::invalid_config(format!("invalid notify address: {e}"))
            })?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| NotificationError::invalid_config(e.to_string()))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: config.from.clone(),
            notify_to: config.notify_to.clone(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, subject: &str, html_body: &str) -> Result<(), NotificationError> {
        let email = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| NotificationError::invalid_config(format!("invalid from: {e}")))?,
            )
            .to(self.notify_to.parse().map_err(|e| {
                NotificationError::invalid_config(format!("invalid recipient: {e}"))
            })?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| NotificationError::send_failed(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| NotificationError::send_failed(e.to_string()))?;

        Ok(())
    }
}

/// Mailer that silently discards everything.
///
/// Used when no SMTP relay is configured; submissions are still stored, only
/// the notification is skipped.
#[derive(Default)]
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send(&self, _subject: &str, _html_body: &str) -> Result<(), NotificationError> {
        tracing::debug!("No mailer configured, dropping notification");
        Ok(())
    }

    fn is_configured(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: "mailer".to_string(),
            password: "secret".to_string(),
            from: "noreply@example.com".to_string(),
            notify_to: "admin@example.com".to_string(),
        }
    }

    #[test]
    fn test_smtp_mailer_builds_from_valid_config() {
        let mailer = SmtpMailer::new(&config()).unwrap();
        assert!(mailer.is_configured());
    }

    #[test]
    fn test_invalid_addresses_rejected_at_construction() {
        let mut bad_from = config();
        bad_from.from = "not an address".to_string();
        assert!(matches!(
            SmtpMailer::new(&bad_from),
            Err(NotificationError::InvalidConfig { .. })
        ));

        let mut bad_to = config();
        bad_to.notify_to = String::new();
        assert!(SmtpMailer::new(&bad_to).is_err());
    }

    #[tokio::test]
    async fn test_noop_mailer_accepts_everything() {
        let mailer = NoopMailer;
        assert!(!mailer.is_configured());
        assert!(mailer.send("subject", "<p>body</p>").await.is_ok());
    }
}
