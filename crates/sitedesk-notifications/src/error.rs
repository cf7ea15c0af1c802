//! Notification error types.

use thiserror::Error;

/// Errors from notification delivery.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The mailer configuration is incomplete or invalid.
    #[error("Invalid mailer configuration: {message}")]
    InvalidConfig { message: String },

    /// Message construction or delivery failed.
    #[error("Failed to send notification: {message}")]
    SendFailed { message: String },
}

impl NotificationError {
    /// Creates a configuration error.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Creates a delivery error.
    #[must_use]
    pub fn send_failed(message: impl Into<String>) -> Self {
        Self::SendFailed {
            message: message.into(),
        }
    }
}
