//! HTTP server for the admin site API.
//!
//! Wires the auth, storage, and notification crates into an Axum router:
//! public contact-form intake plus an admin surface behind bearer
//! authentication.

pub mod config;
pub mod handlers;
pub mod observability;
pub mod server;
pub mod state;

pub use config::AppConfig;
pub use server::{ServerBuilder, SitedeskServer, build_app};
pub use state::AppState;
