//! External identity provider client.
//!
//! Implements the two outbound flows of the login pipeline:
//!
//! 1. **Password grant** — proves the caller owns the credentials.
//! 2. **Management lookup** — obtains a client-credentials grant scoped to the
//!    provider's management API and fetches the identity's profile by email.
//!
//! The password grant's token is intentionally never used for the lookup:
//! identity attributes always flow through the separately-scoped management
//! credential, decoupling "proves who you are" from "tells us your
//! attributes".
//!
//! All calls are bounded by a fixed 10 second timeout and fail fast with no
//! retry; login is an interactive, latency-sensitive path.

use std::time::Duration;

use serde::Serialize;
use url::Url;

use crate::config::AuthConfig;
use crate::error::AuthError;

use super::types::{IdentityProfile, ProviderErrorBody, TokenGrant};

/// Per-call timeout for requests to the identity provider.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// OAuth scope requested with the password grant.
const PASSWORD_GRANT_SCOPE: &str = "openid profile email";

/// Realm identifier for the provider's username/password connection.
const PASSWORD_GRANT_REALM: &str = "Username-Password-Authentication";

/// Client for the external identity provider.
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: Url,
    client_id: String,
    client_secret: String,
}

#[derive(Serialize)]
struct PasswordGrantRequest<'a> {
    grant_type: &'static str,
    username: &'a str,
    password: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    scope: &'static str,
    realm: &'static str,
}

#[derive(Serialize)]
struct ClientCredentialsRequest<'a> {
    grant_type: &'static str,
    client_id: &'a str,
    client_secret: &'a str,
    audience: String,
}

impl IdentityClient {
    /// Creates a client from explicit parts.
    ///
    /// `base_url` is the provider origin (e.g. `https://tenant.auth0.com`).
    #[must_use]
    pub fn new(base_url: Url, client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base_url,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Creates a client from the auth configuration.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Configuration` if the configured domain does not
    /// form a valid URL.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let base_url = Url::parse(&format!("https://{}", config.idp_domain)).map_err(|e| {
            AuthError::configuration(format!("invalid identity provider domain: {e}"))
        })?;
        Ok(Self::new(base_url, &config.client_id, &config.client_secret))
    }

    /// Authenticates an end user with the resource owner password grant.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when the provider rejects the
    /// grant, surfacing the provider's error description, and
    /// `AuthError::ProviderUnavailable` on transport failures.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<TokenGrant, AuthError> {
        let body = PasswordGrantRequest {
            grant_type: "password",
            username: email,
            password,
            client_id: &self.client_id,
            client_secret: &self.client_secret,
            scope: PASSWORD_GRANT_SCOPE,
            realm: PASSWORD_GRANT_REALM,
        };

        tracing::debug!(email = %email, "Requesting password grant from identity provider");

        let response = self
            .http
            .post(self.endpoint("oauth/token")?)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            let description = provider_error_description(response).await;
            tracing::debug!(email = %email, error = %description, "Password grant rejected");
            return Err(AuthError::invalid_credentials(description));
        }

        response
            .json::<TokenGrant>()
            .await
            .map_err(|e| AuthError::provider_unavailable(format!("malformed token response: {e}")))
    }

    /// Fetches the identity profile for an email via the management API.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ProfileNotFound` when the provider has no identity
    /// for the email and `AuthError::ProviderUnavailable` on transport or
    /// non-2xx failures at either step.
    pub async fn fetch_profile(&self, email: &str) -> Result<IdentityProfile, AuthError> {
        let management_token = self.management_token().await?;

        let mut url = self.endpoint("api/v2/users-by-email")?;
        url.query_pairs_mut().append_pair("email", email);

        let response = self
            .http
            .get(url)
            .bearer_auth(&management_token)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::provider_unavailable(format!(
                "profile lookup failed: HTTP {status} - {body}"
            )));
        }

        let mut profiles: Vec<IdentityProfile> = response.json().await.map_err(|e| {
            AuthError::provider_unavailable(format!("malformed profile response: {e}"))
        })?;

        if profiles.is_empty() {
            return Err(AuthError::profile_not_found(email));
        }

        let profile = profiles.remove(0);
        tracing::debug!(
            subject = %profile.user_id,
            role = ?profile.app_metadata.role,
            sites = ?profile.app_metadata.sites,
            "Fetched identity profile"
        );

        Ok(profile)
    }

    /// Obtains a client-credentials grant for the provider's management API.
    async fn management_token(&self) -> Result<String, AuthError> {
        let audience = self
            .endpoint("api/v2/")
            .map(|u| u.to_string())
            .unwrap_or_default();

        let body = ClientCredentialsRequest {
            grant_type: "client_credentials",
            client_id: &self.client_id,
            client_secret: &self.client_secret,
            audience,
        };

        let response = self
            .http
            .post(self.endpoint("oauth/token")?)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::provider_unavailable(format!(
                "management token request failed: HTTP {status} - {body}"
            )));
        }

        let grant: TokenGrant = response.json().await.map_err(|e| {
            AuthError::provider_unavailable(format!("malformed token response: {e}"))
        })?;

        Ok(grant.access_token)
    }

    fn endpoint(&self, path: &str) -> Result<Url, AuthError> {
        self.base_url
            .join(path)
            .map_err(|e| AuthError::configuration(format!("invalid provider endpoint: {e}")))
    }
}

/// Maps a reqwest transport failure (connect, timeout, body read) to
/// `ProviderUnavailable`.
fn transport_error(err: reqwest::Error) -> AuthError {
    if err.is_timeout() {
        AuthError::provider_unavailable("identity provider timed out")
    } else {
        AuthError::provider_unavailable(err.to_string())
    }
}

/// Extracts the provider's error description from a failed token response.
async fn provider_error_description(response: reqwest::Response) -> String {
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ProviderErrorBody>(&body) {
        Ok(err) => err
            .error_description
            .unwrap_or_else(|| "authentication rejected by identity provider".to_string()),
        Err(_) => "authentication rejected by identity provider".to_string(),
    }
}
