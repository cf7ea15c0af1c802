//! Authentication configuration.
//!
//! All values are sourced from the environment. The session signing secret is
//! required in release builds; debug builds fall back to a well-known
//! development key so local setups work without configuration.

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Development-only signing key used when `SESSION_SECRET` is unset in a
/// debug build. Never valid in release builds.
pub const DEV_SESSION_SECRET: &str = "sitedesk-dev-secret";

/// Default post-logout return URL for local development.
const DEFAULT_SITE_URL: &str = "http://localhost:3000";

/// Authentication and authorization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Identity provider domain (e.g. `tenant.eu.auth0.com`).
    pub idp_domain: String,

    /// OAuth client ID registered with the identity provider.
    pub client_id: String,

    /// OAuth client secret.
    pub client_secret: String,

    /// HMAC secret for signing session tokens.
    pub session_secret: String,

    /// Site identifier for single-site deployments. Identities without the
    /// `admin` role must list this site to be authorized.
    #[serde(default)]
    pub site_id: Option<String>,

    /// URL the identity provider redirects to after logout.
    pub site_url: String,
}

impl AuthConfig {
    /// Loads the configuration from the environment.
    ///
    /// Reads `IDP_DOMAIN`, `IDP_CLIENT_ID`, `IDP_CLIENT_SECRET`,
    /// `SESSION_SECRET`, `SITE_ID` and `SITE_URL`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Configuration` if a required variable is missing.
    /// In release builds a missing `SESSION_SECRET` is a hard failure; debug
    /// builds use [`DEV_SESSION_SECRET`] and log a warning.
    pub fn from_env() -> Result<Self, AuthError> {
        let idp_domain = require_env("IDP_DOMAIN")?;
        let client_id = require_env("IDP_CLIENT_ID")?;
        let client_secret = require_env("IDP_CLIENT_SECRET")?;

        let session_secret = match env_opt("SESSION_SECRET") {
            Some(secret) => secret,
            None => {
                if cfg!(debug_assertions) {
                    tracing::warn!(
                        "SESSION_SECRET is not set, using the development fallback key; \
                         session tokens are NOT secure"
                    );
                    DEV_SESSION_SECRET.to_string()
                } else {
                    return Err(AuthError::configuration(
                        "SESSION_SECRET must be set in release builds",
                    ));
                }
            }
        };

        Ok(Self {
            idp_domain,
            client_id,
            client_secret,
            session_secret,
            site_id: env_opt("SITE_ID"),
            site_url: env_opt("SITE_URL").unwrap_or_else(|| DEFAULT_SITE_URL.to_string()),
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Configuration` describing the first invalid field.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.idp_domain.is_empty() {
            return Err(AuthError::configuration("idp_domain must not be empty"));
        }
        if self.idp_domain.contains("://") {
            return Err(AuthError::configuration(
                "idp_domain must be a bare domain, not a URL",
            ));
        }
        if self.client_id.is_empty() {
            return Err(AuthError::configuration("client_id must not be empty"));
        }
        if self.client_secret.is_empty() {
            return Err(AuthError::configuration("client_secret must not be empty"));
        }
        if self.session_secret.is_empty() {
            return Err(AuthError::configuration("session_secret must not be empty"));
        }
        Ok(())
    }

    /// Returns the configured site identifier, treating the empty string
    /// as unset.
    #[must_use]
    pub fn site_id(&self) -> Option<&str> {
        self.site_id.as_deref().filter(|s| !s.is_empty())
    }
}

fn require_env(name: &str) -> Result<String, AuthError> {
    env_opt(name).ok_or_else(|| AuthError::configuration(format!("{name} must be set")))
}

/// Reads an environment variable, treating the empty string as unset.
fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            idp_domain: "tenant.example.auth0.com".to_string(),
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            session_secret: "secret".to_string(),
            site_id: None,
            site_url: DEFAULT_SITE_URL.to_string(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_fields() {
        let mut cfg = test_config();
        cfg.idp_domain = String::new();
        assert!(cfg.validate().is_err());

        let mut cfg = test_config();
        cfg.session_secret = String::new();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_url_as_domain() {
        let mut cfg = test_config();
        cfg.idp_domain = "https://tenant.example.auth0.com".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_site_id_empty_string_is_unset() {
        let mut cfg = test_config();
        cfg.site_id = Some(String::new());
        assert_eq!(cfg.site_id(), None);

        cfg.site_id = Some("site-a".to_string());
        assert_eq!(cfg.site_id(), Some("site-a"));
    }
}
