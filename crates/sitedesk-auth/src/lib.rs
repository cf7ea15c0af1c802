//! Authentication and authorization for the admin API.
//!
//! This crate implements the login pipeline against an external identity
//! provider, local session tokens, the site access policy, and the Axum
//! extractors that enforce it:
//!
//! - [`idp`] — identity provider client (password grant + management lookup)
//! - [`policy`] — the single access rule, shared by login and middleware
//! - [`token`] — HS256 session token issuance and verification
//! - [`middleware`] — `BearerAuth` / `OptionalBearerAuth` extractors
//! - [`http`] — login, profile, and logout handlers
//!
//! Sessions are stateless: once issued, a token is valid until expiry and
//! carries everything the policy needs, so protected requests never call the
//! provider.

pub mod config;
pub mod error;
pub mod http;
pub mod idp;
pub mod middleware;
pub mod policy;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use idp::{AppMetadata, IdentityClient, IdentityProfile, TokenGrant};
pub use middleware::{AuthContext, AuthState, BearerAuth, OptionalBearerAuth};
pub use token::{SessionClaims, SessionTokenService};

/// Convenience result alias for this crate.
pub type AuthResult<T> = Result<T, AuthError>;
