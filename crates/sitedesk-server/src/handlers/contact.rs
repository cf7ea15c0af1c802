//! Contact request endpoints.
//!
//! Submission is the one public write in the API; listing and reads sit
//! behind bearer authentication. Notification email is spawned off the
//! request path after the record is stored, so delivery failures can never
//! affect the submitter's response.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::USER_AGENT},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use sitedesk_auth::BearerAuth;
use sitedesk_notifications::{Mailer, notification_body, notification_subject};
use sitedesk_storage::{ContactRequest, NewContactRequest};

use super::error::ApiError;
use crate::state::AppState;

/// Contact form submission body.
///
/// Fields default to empty so missing keys reach validation (and a 400)
/// instead of a body-decoding rejection.
#[derive(Debug, Deserialize)]
pub struct CreateContactRequest {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub message: String,
}

impl CreateContactRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::validation("name is required"));
        }
        if self.email.is_empty() || !self.email.contains('@') {
            return Err(ApiError::validation("a valid email address is required"));
        }
        if self.message.trim().is_empty() {
            return Err(ApiError::validation("message is required"));
        }
        Ok(())
    }
}

/// `POST /api/contact-requests`
///
/// Public endpoint. Stores the submission, then fires the notification email
/// in a detached task.
pub async fn create_contact_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateContactRequest>,
) -> Result<impl IntoResponse, ApiError> {
    body.validate()?;

    let submission = NewContactRequest {
        name: body.name,
        email: body.email,
        phone: body.phone.filter(|p| !p.is_empty()),
        message: body.message,
        ip_address: client_ip(&headers),
        user_agent: headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string),
    };

    let record = state.storage.create(submission).await?;
    tracing::info!(id = %record.id, "Contact request stored");

    spawn_notification(state.mailer.clone(), record.clone());

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Contact request received successfully",
            "id": record.id,
        })),
    ))
}

/// `GET /api/contact-requests`
///
/// Requires an authorized session.
pub async fn list_contact_requests(
    BearerAuth(_auth): BearerAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let requests = state.storage.list().await?;
    Ok(Json(json!({ "requests": requests })))
}

/// `GET /api/contact-requests/{id}`
///
/// Requires an authorized session.
pub async fn get_contact_request(
    BearerAuth(_auth): BearerAuth,
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, ApiError> {
    match state.storage.get(id).await? {
        Some(record) => Ok(Json(json!({ "request": record }))),
        None => Err(ApiError::not_found("contact request not found")),
    }
}

/// Spawns the notification send as a detached task.
///
/// The task holds its own references; the handler returns without awaiting
/// it and the outcome is only ever logged.
fn spawn_notification(mailer: Arc<dyn Mailer>, record: ContactRequest) {
    if !mailer.is_configured() {
        return;
    }

    tokio::spawn(async move {
        let subject = notification_subject(&record);
        let body = notification_body(&record);
        match mailer.send(&subject, &body).await {
            Ok(()) => tracing::info!(id = %record.id, "Notification email sent"),
            Err(e) => {
                tracing::warn!(id = %record.id, error = %e, "Failed to send notification email");
            }
        }
    });
}

/// Extracts the client IP from forwarding headers.
///
/// `X-Forwarded-For` may carry a proxy chain; the first entry is the
/// original client. Falls back to `X-Real-Ip`.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        let first = forwarded.split(',').next().map(str::trim).unwrap_or("");
        if !first.is_empty() {
            return Some(first.to_string());
        }
    }

    headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}
