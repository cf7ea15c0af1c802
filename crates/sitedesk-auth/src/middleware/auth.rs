//! Bearer token authentication extractors.
//!
//! Two extractors are provided:
//!
//! - [`BearerAuth`] rejects the request with an `AuthError` response unless a
//!   valid, authorized session token is presented.
//! - [`OptionalBearerAuth`] never rejects: it yields `Some(AuthContext)` for a
//!   valid token and `None` otherwise, including for malformed headers.
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, routing::get};
//! use sitedesk_auth::middleware::{AuthState, BearerAuth};
//!
//! async fn protected_handler(BearerAuth(auth): BearerAuth) -> String {
//!     format!("Hello, {}!", auth.email())
//! }
//!
//! let app = Router::new()
//!     .route("/protected", get(protected_handler))
//!     .with_state(auth_state);
//! ```

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::AuthError;
use crate::policy::is_authorized;
use crate::token::SessionTokenService;

use super::types::AuthContext;

// =============================================================================
// Auth State
// =============================================================================

/// State required for bearer token authentication.
///
/// Include this in your application state and make it available to the
/// extractors via `FromRef`.
#[derive(Clone)]
pub struct AuthState {
    /// Session token service for verification.
    pub token_service: Arc<SessionTokenService>,

    /// Site identifier this deployment serves, if any.
    pub site_id: Option<String>,
}

impl AuthState {
    /// Creates a new auth state.
    #[must_use]
    pub fn new(token_service: Arc<SessionTokenService>, site_id: Option<String>) -> Self {
        Self {
            token_service,
            site_id,
        }
    }
}

// =============================================================================
// Bearer Auth Extractor
// =============================================================================

/// Axum extractor that validates session tokens and enforces the access
/// policy.
///
/// This extractor:
/// 1. Extracts the `Authorization: Bearer <token>` header
/// 2. Verifies the session token's signature and expiry
/// 3. Re-evaluates the access policy against the embedded claims
///
/// # Errors
///
/// Returns `AuthError` (which implements `IntoResponse`) if the header is
/// missing or malformed, the token is invalid or expired, or the policy
/// denies access.
#[derive(Debug)]
pub struct BearerAuth(pub AuthContext);

impl<S> FromRequestParts<S> for BearerAuth
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        let token = bearer_token(parts)?;
        authenticate(&auth_state, token)
    }
}

// =============================================================================
// Optional Bearer Auth Extractor
// =============================================================================

/// Non-enforcing variant of [`BearerAuth`].
///
/// Any failure along the way (missing header, malformed value, bad token,
/// policy denial) yields `None` rather than an error response. Handlers
/// using it must treat `None` as anonymous, not as a soft error.
pub struct OptionalBearerAuth(pub Option<AuthContext>);

impl<S> FromRequestParts<S> for OptionalBearerAuth
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        let context = bearer_token(parts)
            .and_then(|token| authenticate(&auth_state, token))
            .map(|BearerAuth(ctx)| ctx)
            .ok();
        Ok(Self(context))
    }
}

// =============================================================================
// Shared steps
// =============================================================================

/// Extracts the bearer token from the `Authorization` header.
///
/// The header must be exactly two space-separated parts with a `Bearer`
/// scheme. Anything else is rejected rather than leniently reparsed.
fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AuthError::unauthenticated("missing Authorization header"))?
        .to_str()
        .map_err(|_| AuthError::unauthenticated("malformed Authorization header"))?;

    match header.split_once(' ') {
        Some(("Bearer", token)) if !token.is_empty() && !token.contains(' ') => Ok(token),
        _ => Err(AuthError::unauthenticated(
            "Authorization header must be 'Bearer <token>'",
        )),
    }
}

fn authenticate(state: &AuthState, token: &str) -> Result<BearerAuth, AuthError> {
    let claims = state.token_service.verify(token)?;

    if !is_authorized(claims.role(), claims.sites(), state.site_id.as_deref()) {
        tracing::debug!(subject = %claims.sub, "Session token valid but access denied by policy");
        return Err(AuthError::forbidden(
            "you are not authorized to access this resource",
        ));
    }

    Ok(BearerAuth(AuthContext::new(claims)))
}
