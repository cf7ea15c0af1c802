use std::net::SocketAddr;

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use sitedesk_auth::http as auth_http;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{handlers, state::AppState};

pub struct SitedeskServer {
    addr: SocketAddr,
    app: Router,
}

pub fn build_app(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/auth/login", post(auth_http::login))
        .route("/api/auth/logout", get(auth_http::logout))
        .route("/api/profile", get(auth_http::profile))
        .route(
            "/api/contact-requests",
            post(handlers::create_contact_request).get(handlers::list_contact_requests),
        )
        .route("/api/contact-requests/{id}", get(handlers::get_contact_request))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy: explicit origins when configured, permissive otherwise.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

pub struct ServerBuilder {
    addr: SocketAddr,
    state: AppState,
    allowed_origins: Vec<String>,
}

impl ServerBuilder {
    pub fn new(addr: SocketAddr, state: AppState) -> Self {
        Self {
            addr,
            state,
            allowed_origins: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins;
        self
    }

    pub fn build(self) -> SitedeskServer {
        let app = build_app(self.state, &self.allowed_origins);

        SitedeskServer {
            addr: self.addr,
            app,
        }
    }
}

impl SitedeskServer {
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    // Wait for Ctrl+C
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
