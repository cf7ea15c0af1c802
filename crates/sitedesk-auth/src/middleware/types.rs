//! Authenticated request context types.

use std::sync::Arc;

use crate::token::SessionClaims;

/// Authenticated request context.
///
/// Extracted from requests by the `BearerAuth` extractor after the session
/// token has been verified and the access policy re-evaluated. Claims are
/// wrapped in `Arc` for cheap cloning across async boundaries.
#[derive(Debug, Clone)]
pub struct AuthContext {
    claims: Arc<SessionClaims>,
}

impl AuthContext {
    /// Creates a context from verified session claims.
    #[must_use]
    pub fn new(claims: SessionClaims) -> Self {
        Self {
            claims: Arc::new(claims),
        }
    }

    /// The provider-unique subject identifier.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.claims.sub
    }

    /// The authenticated identity's email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.claims.email
    }

    /// The identity's role claim, if any.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.claims.role()
    }

    /// The site identifiers the identity is assigned to.
    #[must_use]
    pub fn sites(&self) -> &[String] {
        self.claims.sites()
    }

    /// The full verified claims.
    #[must_use]
    pub fn claims(&self) -> &SessionClaims {
        &self.claims
    }
}
