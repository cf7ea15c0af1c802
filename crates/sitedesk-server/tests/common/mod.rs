//! Shared test harness.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use sitedesk_auth::{IdentityClient, SessionTokenService};
use sitedesk_notifications::NoopMailer;
use sitedesk_server::{AppState, build_app};
use sitedesk_storage::InMemoryContactRequestStorage;
use url::Url;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Builds the full application with the identity provider pointed at a mock
/// server and a deployment site of `site-a`.
pub fn test_app(idp_uri: &str) -> Router {
    let identity = Arc::new(IdentityClient::new(
        Url::parse(idp_uri).unwrap(),
        "test-client",
        "test-client-secret",
    ));

    let state = AppState {
        storage: Arc::new(InMemoryContactRequestStorage::new()),
        mailer: Arc::new(NoopMailer),
        identity,
        tokens: Arc::new(SessionTokenService::new(TEST_SECRET)),
        idp_domain: "tenant.auth0.com".to_string(),
        client_id: "test-client".to_string(),
        site_url: "http://localhost:3000".to_string(),
        site_id: Some("site-a".to_string()),
    };

    build_app(state, &[])
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
