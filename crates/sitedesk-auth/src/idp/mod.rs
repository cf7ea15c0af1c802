//! External identity provider integration.

mod client;
mod types;

pub use client::{IdentityClient, REQUEST_TIMEOUT};
pub use types::{AppMetadata, IdentityProfile, TokenGrant};
