//! Session profile endpoint.

use axum::{Json, response::IntoResponse};
use serde::Serialize;

use crate::middleware::BearerAuth;

use super::login::PublicUser;

/// Profile response envelope.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: PublicUser,
}

/// `GET /api/profile`
///
/// Reflects the authenticated session back to the client, entirely from the
/// session token's claims. No identity provider call is made, so the view
/// may lag the provider by up to the session lifetime.
pub async fn profile(BearerAuth(auth): BearerAuth) -> impl IntoResponse {
    Json(ProfileResponse {
        user: PublicUser {
            id: auth.subject().to_string(),
            email: auth.email().to_string(),
            role: auth.role().unwrap_or_default().to_string(),
            sites: auth.sites().to_vec(),
        },
    })
}
