//! Logout endpoint.
//!
//! Sessions are stateless, so there is nothing to revoke server-side. Logout
//! redirects the browser to the identity provider's logout endpoint, which
//! clears the provider-side session and returns the user to the site.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
};
use url::Url;

use crate::error::AuthError;

/// State required by the logout handler.
#[derive(Clone)]
pub struct LogoutState {
    /// Identity provider domain (e.g. `tenant.auth0.com`).
    pub idp_domain: String,

    /// OAuth client identifier registered with the provider.
    pub client_id: String,

    /// Where the provider should send the browser afterwards.
    pub site_url: String,
}

/// `GET /api/auth/logout`
///
/// Responds with a 307 redirect to the provider's logout endpoint. The
/// client remains responsible for discarding its stored session token; the
/// token itself stays valid until expiry.
pub async fn logout(State(state): State<LogoutState>) -> Result<impl IntoResponse, AuthError> {
    let mut url = Url::parse(&format!("https://{}/v2/logout", state.idp_domain))
        .map_err(|e| AuthError::configuration(format!("invalid identity provider domain: {e}")))?;
    url.query_pairs_mut()
        .append_pair("client_id", &state.client_id)
        .append_pair("returnTo", &state.site_url);

    Ok(Redirect::temporary(url.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{StatusCode, header};

    #[tokio::test]
    async fn test_logout_redirects_to_provider() {
        let state = LogoutState {
            idp_domain: "tenant.auth0.com".to_string(),
            client_id: "client-123".to_string(),
            site_url: "https://example.com".to_string(),
        };

        let response = logout(State(state)).await.unwrap().into_response();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

        let location = response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(location.starts_with("https://tenant.auth0.com/v2/logout?"));
        assert!(location.contains("client_id=client-123"));
        assert!(location.contains("returnTo=https%3A%2F%2Fexample.com"));
    }
}
