//! Request authentication middleware.
//!
//! Extractor-based bearer authentication for Axum routes, plus the
//! `IntoResponse` mapping that turns `AuthError` into HTTP responses.

mod auth;
mod error;
mod types;

pub use auth::{AuthState, BearerAuth, OptionalBearerAuth};
pub use types::AuthContext;
