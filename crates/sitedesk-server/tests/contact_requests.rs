//! Contact request intake and admin retrieval.

mod common;

use axum::http::StatusCode;
use common::{TEST_SECRET, body_json, get_request, json_request, test_app};
use sitedesk_auth::{IdentityProfile, SessionTokenService};
use tower::ServiceExt;
use wiremock::MockServer;

fn admin_token() -> String {
    let profile: IdentityProfile = serde_json::from_value(serde_json::json!({
        "user_id": "auth0|admin",
        "email": "admin@example.com",
        "app_metadata": {"role": "admin", "sites": []}
    }))
    .unwrap();
    SessionTokenService::new(TEST_SECRET).issue(&profile).unwrap()
}

#[tokio::test]
async fn test_submission_is_stored_and_retrievable() {
    let idp = MockServer::start().await;
    let app = test_app(&idp.uri());

    let mut request = json_request(
        "POST",
        "/api/contact-requests",
        serde_json::json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "phone": "+1 555 0100",
            "message": "I would like a website."
        }),
    );
    request
        .headers_mut()
        .insert("x-forwarded-for", "203.0.113.9".parse().unwrap());

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Contact request received successfully");
    let id = body["id"].as_u64().unwrap();
    assert!(id >= 1);

    // Round-trip through the authenticated read endpoint, which wraps its
    // body under a "request" key.
    let token = admin_token();
    let response = app
        .oneshot(get_request(
            &format!("/api/contact-requests/{id}"),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["request"].is_object());
    let record = &body["request"];
    assert_eq!(record["name"], "Ada Lovelace");
    assert_eq!(record["email"], "ada@example.com");
    assert_eq!(record["phone"], "+1 555 0100");
    assert_eq!(record["message"], "I would like a website.");
    assert_eq!(record["ip_address"], "203.0.113.9");
}

#[tokio::test]
async fn test_list_is_protected_and_newest_first() {
    let idp = MockServer::start().await;
    let app = test_app(&idp.uri());

    for name in ["First", "Second"] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/contact-requests",
                serde_json::json!({
                    "name": name,
                    "email": "someone@example.com",
                    "message": "Hello"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Anonymous list is rejected.
    let response = app
        .clone()
        .oneshot(get_request("/api/contact-requests", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(get_request("/api/contact-requests", Some(&admin_token())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let requests = body["requests"].as_array().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0]["name"], "Second");
    assert_eq!(requests[1]["name"], "First");
}

#[tokio::test]
async fn test_unknown_id_is_404() {
    let idp = MockServer::start().await;
    let app = test_app(&idp.uri());

    let response = app
        .oneshot(get_request("/api/contact-requests/999", Some(&admin_token())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "contact request not found");
}

#[tokio::test]
async fn test_invalid_submission_is_400() {
    let idp = MockServer::start().await;
    let app = test_app(&idp.uri());

    let cases = [
        serde_json::json!({"email": "ada@example.com", "message": "Hello"}),
        serde_json::json!({"name": "Ada", "email": "not-an-email", "message": "Hello"}),
        serde_json::json!({"name": "Ada", "email": "ada@example.com"}),
        serde_json::json!({}),
    ];

    for body in cases {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/contact-requests", body.clone()))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "body: {body}"
        );
    }
}

#[tokio::test]
async fn test_health_is_public() {
    let idp = MockServer::start().await;
    let app = test_app(&idp.uri());

    let response = app.oneshot(get_request("/api/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}
