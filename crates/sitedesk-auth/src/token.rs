//! Session token issuance and validation.
//!
//! The session credential is this system's own HS256-signed JWT, independent
//! of the identity provider's tokens. It is fully stateless: the server keeps
//! no copy, so validity is determined by signature and expiry alone and
//! revocation before natural expiry is impossible by design.

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, decode_header, encode,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::AuthError;
use crate::idp::{AppMetadata, IdentityProfile};

/// Session lifetime: 24 hours from issuance.
pub const SESSION_TTL_SECS: i64 = 24 * 60 * 60;

/// HMAC algorithms accepted when validating a session token. Any other
/// algorithm header is rejected outright to prevent algorithm-confusion
/// attacks.
const ACCEPTED_ALGORITHMS: [Algorithm; 3] =
    [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Claims embedded in a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the provider-unique identity identifier.
    pub sub: String,

    /// The identity's email address.
    pub email: String,

    /// Policy-relevant metadata captured at login time.
    #[serde(default)]
    pub app_metadata: AppMetadata,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

impl SessionClaims {
    /// Returns the role claim, if any.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.app_metadata.role.as_deref()
    }

    /// Returns the site identifiers the identity is assigned to.
    #[must_use]
    pub fn sites(&self) -> &[String] {
        &self.app_metadata.sites
    }
}

/// Service for issuing and validating session tokens.
///
/// Thread-safe (`Send + Sync`); share it across tasks behind an `Arc`.
pub struct SessionTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SessionTokenService {
    /// Creates a new service from the configured signing secret.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issues a session token for a freshly authenticated identity.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Configuration` if signing fails.
    pub fn issue(&self, profile: &IdentityProfile) -> Result<String, AuthError> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = SessionClaims {
            sub: profile.user_id.clone(),
            email: profile.email.clone(),
            app_metadata: profile.app_metadata.clone(),
            iat: now,
            exp: now + SESSION_TTL_SECS,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::configuration(format!("failed to sign session token: {e}")))
    }

    /// Verifies a session token's signature and expiry and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthenticated` for any malformed, mis-signed,
    /// non-HMAC or expired token.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let header = decode_header(token)
            .map_err(|_| AuthError::unauthenticated("malformed session token"))?;
        if !ACCEPTED_ALGORITHMS.contains(&header.alg) {
            return Err(AuthError::unauthenticated(format!(
                "unexpected signing algorithm: {:?}",
                header.alg
            )));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.validate_exp = true;

        let data = decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AuthError::unauthenticated("session expired")
                }
                _ => AuthError::unauthenticated("invalid session token"),
            },
        )?;

        Ok(data.claims)
    }
}
