//! Login endpoint.
//!
//! `POST /api/auth/login` drives the full login pipeline: validate the
//! request, prove credential ownership against the identity provider, fetch
//! the authoritative profile, evaluate the access policy, and mint a session
//! token. Authorization is checked here at login time and again on every
//! protected request; both paths share [`crate::policy::is_authorized`].

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::idp::{IdentityClient, IdentityProfile};
use crate::policy::is_authorized;
use crate::token::SessionTokenService;

// =============================================================================
// State
// =============================================================================

/// State required by the login handler.
#[derive(Clone)]
pub struct LoginState {
    /// Identity provider client.
    pub identity: Arc<IdentityClient>,

    /// Session token service for issuance.
    pub tokens: Arc<SessionTokenService>,

    /// Site identifier this deployment serves, if any.
    pub site_id: Option<String>,
}

// =============================================================================
// Request / Response types
// =============================================================================

/// Login request body.
///
/// Fields default to empty so missing keys reach validation (and a 400)
/// instead of a body-decoding rejection.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    fn validate(&self) -> Result<(), AuthError> {
        if self.email.is_empty() || !self.email.contains('@') {
            return Err(AuthError::invalid_request(
                "a valid email address is required",
            ));
        }
        if self.password.is_empty() {
            return Err(AuthError::invalid_request("password is required"));
        }
        Ok(())
    }
}

/// The client-facing view of an authenticated identity.
///
/// Derived from the provider profile; raw provider payloads are never
/// forwarded to the browser.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: String,
    pub email: String,
    pub role: String,
    pub sites: Vec<String>,
}

impl From<&IdentityProfile> for PublicUser {
    fn from(profile: &IdentityProfile) -> Self {
        Self {
            id: profile.user_id.clone(),
            email: profile.email.clone(),
            role: profile.app_metadata.role.clone().unwrap_or_default(),
            sites: profile.app_metadata.sites.clone(),
        }
    }
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: PublicUser,
}

// =============================================================================
// Handler
// =============================================================================

/// `POST /api/auth/login`
///
/// # Errors
///
/// - 400 for a malformed request body
/// - 401 when the provider rejects the credentials
/// - 403 when the identity is authenticated but not authorized
/// - 500 when the provider is unreachable or has no profile for the email
pub async fn login(
    State(state): State<LoginState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AuthError> {
    request.validate()?;

    // Step 1: prove the caller owns the credentials. The returned grant is
    // discarded; it only matters that the provider accepted it.
    state
        .identity
        .authenticate(&request.email, &request.password)
        .await?;

    // Step 2: fetch the authoritative profile through the management API.
    let profile = state.identity.fetch_profile(&request.email).await?;

    // Step 3: evaluate the access policy before minting anything.
    if !is_authorized(
        profile.app_metadata.role.as_deref(),
        &profile.app_metadata.sites,
        state.site_id.as_deref(),
    ) {
        tracing::info!(email = %request.email, "Login denied by access policy");
        return Err(AuthError::forbidden(
            "you are not authorized to access this site",
        ));
    }

    // Step 4: mint the session token.
    let token = state.tokens.issue(&profile)?;

    tracing::info!(email = %request.email, subject = %profile.user_id, "Login succeeded");

    Ok(Json(LoginResponse {
        token,
        user: PublicUser::from(&profile),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_validation() {
        let valid = LoginRequest {
            email: "admin@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(valid.validate().is_ok());

        let cases = [
            ("", "hunter2"),
            ("not-an-email", "hunter2"),
            ("admin@example.com", ""),
            ("", ""),
        ];
        for (email, password) in cases {
            let request = LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            };
            assert!(
                matches!(request.validate(), Err(AuthError::InvalidRequest { .. })),
                "email={email:?} password={password:?}"
            );
        }
    }

    #[test]
    fn test_public_user_defaults_missing_role_to_empty() {
        let profile: IdentityProfile = serde_json::from_value(serde_json::json!({
            "user_id": "auth0|abc",
            "email": "viewer@example.com",
            "app_metadata": {"sites": ["site-a"]}
        }))
        .unwrap();

        let user = PublicUser::from(&profile);
        assert_eq!(user.role, "");
        assert_eq!(user.sites, vec!["site-a".to_string()]);
    }
}
