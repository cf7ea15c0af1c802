//! Error response handling.
//!
//! Implements `IntoResponse` for `AuthError` so extractors and handlers can
//! return it directly. Every error becomes `{"error": "<message>"}` with the
//! mapped status code; 401 responses additionally carry a `WWW-Authenticate`
//! header.

use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AuthError;

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = error_details(&self);

        if status.is_server_error() {
            tracing::error!(error = %self, "Authentication failure");
        }

        let mut headers = HeaderMap::new();
        if status == StatusCode::UNAUTHORIZED {
            let www_auth = build_www_authenticate_header(&message);
            if let Ok(value) = HeaderValue::from_str(&www_auth) {
                headers.insert(header::WWW_AUTHENTICATE, value);
            }
        }

        (status, headers, Json(json!({ "error": message }))).into_response()
    }
}

/// Maps an `AuthError` to an HTTP status and a client-safe message.
///
/// Server-side failures never leak internals to the caller.
fn error_details(error: &AuthError) -> (StatusCode, String) {
    match error {
        AuthError::InvalidRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
        AuthError::InvalidCredentials { message } => (StatusCode::UNAUTHORIZED, message.clone()),
        AuthError::Unauthenticated { message } => (StatusCode::UNAUTHORIZED, message.clone()),
        AuthError::Forbidden { message } => (StatusCode::FORBIDDEN, message.clone()),
        AuthError::ProfileNotFound { .. }
        | AuthError::ProviderUnavailable { .. }
        | AuthError::Configuration { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal server error".to_string(),
        ),
    }
}

/// Builds the WWW-Authenticate header value for 401 responses.
fn build_www_authenticate_header(description: &str) -> String {
    let escaped = description.replace('"', "\\\"");
    format!("Bearer realm=\"sitedesk\", error_description=\"{escaped}\"")
}
