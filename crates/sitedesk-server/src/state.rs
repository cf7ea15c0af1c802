//! Shared application state.

use std::sync::Arc;

use axum::extract::FromRef;
use sitedesk_auth::http::{LoginState, LogoutState};
use sitedesk_auth::{AuthError, AuthState, IdentityClient, SessionTokenService};
use sitedesk_notifications::{Mailer, NoopMailer, SmtpMailer};
use sitedesk_storage::{ContactRequestStorage, InMemoryContactRequestStorage};

use crate::config::AppConfig;

/// Application-wide state shared by every handler.
///
/// Handler-specific states (`AuthState`, `LoginState`, `LogoutState`) are
/// projected out via `FromRef` so each handler sees only what it needs.
#[derive(Clone)]
pub struct AppState {
    /// Contact request storage backend.
    pub storage: Arc<dyn ContactRequestStorage>,

    /// Outbound mailer for submission notifications.
    pub mailer: Arc<dyn Mailer>,

    /// Identity provider client.
    pub identity: Arc<IdentityClient>,

    /// Session token service.
    pub tokens: Arc<SessionTokenService>,

    /// Identity provider domain.
    pub idp_domain: String,

    /// OAuth client identifier.
    pub client_id: String,

    /// Public site URL, used as the post-logout return target.
    pub site_url: String,

    /// Site identifier this deployment serves, if any.
    pub site_id: Option<String>,
}

impl AppState {
    /// Builds the full application state from configuration.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Configuration` when the identity provider domain
    /// or SMTP settings are invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, AuthError> {
        let identity = Arc::new(IdentityClient::from_config(&config.auth)?);
        let tokens = Arc::new(SessionTokenService::new(&config.auth.session_secret));

        let mailer: Arc<dyn Mailer> = match &config.smtp {
            Some(smtp) => Arc::new(
                SmtpMailer::new(smtp)
                    .map_err(|e| AuthError::configuration(e.to_string()))?,
            ),
            None => {
                tracing::warn!("SMTP not configured, submission notifications disabled");
                Arc::new(NoopMailer)
            }
        };

        Ok(Self {
            storage: Arc::new(InMemoryContactRequestStorage::new()),
            mailer,
            identity,
            tokens,
            idp_domain: config.auth.idp_domain.clone(),
            client_id: config.auth.client_id.clone(),
            site_url: config.auth.site_url.clone(),
            site_id: config.auth.site_id().map(ToString::to_string),
        })
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        AuthState::new(state.tokens.clone(), state.site_id.clone())
    }
}

impl FromRef<AppState> for LoginState {
    fn from_ref(state: &AppState) -> Self {
        LoginState {
            identity: state.identity.clone(),
            tokens: state.tokens.clone(),
            site_id: state.site_id.clone(),
        }
    }
}

impl FromRef<AppState> for LogoutState {
    fn from_ref(state: &AppState) -> Self {
        LogoutState {
            idp_domain: state.idp_domain.clone(),
            client_id: state.client_id.clone(),
            site_url: state.site_url.clone(),
        }
    }
}
