//! Server configuration.
//!
//! Everything comes from environment variables (optionally via a `.env` file
//! loaded in `main`). Configuration is read once at startup; invalid
//! configuration aborts the process rather than limping along.

use std::env;
use std::net::SocketAddr;

use sitedesk_auth::AuthConfig;
use sitedesk_auth::error::AuthError;
use sitedesk_notifications::SmtpConfig;

/// Default bind host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default SMTP submission port.
const DEFAULT_SMTP_PORT: u16 = 587;

/// Top-level application configuration.
#[derive(Clone)]
pub struct AppConfig {
    /// Bind host.
    pub host: String,

    /// Bind port.
    pub port: u16,

    /// Authentication configuration.
    pub auth: AuthConfig,

    /// SMTP relay settings; `None` disables notifications.
    pub smtp: Option<SmtpConfig>,

    /// Origins allowed by CORS. Empty means allow any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Loads configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Configuration` when a required variable is missing
    /// or a value fails to parse.
    pub fn from_env() -> Result<Self, AuthError> {
        let auth = AuthConfig::from_env()?;
        auth.validate()?;

        let host = env_or("HOST", DEFAULT_HOST);
        let port = match env::var("PORT") {
            Ok(raw) if !raw.is_empty() => raw
                .parse::<u16>()
                .map_err(|_| AuthError::configuration(format!("invalid PORT value: {raw}")))?,
            _ => DEFAULT_PORT,
        };

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect();

        Ok(Self {
            host,
            port,
            auth,
            smtp: smtp_from_env()?,
            cors_allowed_origins,
        })
    }

    /// The socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Configuration` when host and port do not form a
    /// valid socket address.
    pub fn addr(&self) -> Result<SocketAddr, AuthError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AuthError::configuration(format!("invalid bind address: {e}")))
    }
}

/// Reads SMTP settings, treating the relay host as the on/off switch.
///
/// With `SMTP_HOST` unset the mailer is disabled; with it set, the remaining
/// variables become required so a half-configured relay fails loudly at
/// startup instead of silently dropping mail.
fn smtp_from_env() -> Result<Option<SmtpConfig>, AuthError> {
    let Ok(host) = env::var("SMTP_HOST") else {
        return Ok(None);
    };
    if host.is_empty() {
        return Ok(None);
    }

    let port = match env::var("SMTP_PORT") {
        Ok(raw) if !raw.is_empty() => raw
            .parse::<u16>()
            .map_err(|_| AuthError::configuration(format!("invalid SMTP_PORT value: {raw}")))?,
        _ => DEFAULT_SMTP_PORT,
    };

    Ok(Some(SmtpConfig {
        host,
        port,
        username: require("SMTP_USERNAME")?,
        password: require("SMTP_PASSWORD")?,
        from: require("SMTP_FROM")?,
        notify_to: require("NOTIFY_EMAIL")?,
    }))
}

fn require(name: &str) -> Result<String, AuthError> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(AuthError::configuration(format!(
            "{name} must be set when SMTP_HOST is configured"
        ))),
    }
}

fn env_or(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}
