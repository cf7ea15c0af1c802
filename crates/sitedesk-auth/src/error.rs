//! Authentication and authorization error types.
//!
//! This module defines all error types that can occur during authentication
//! and authorization operations.

use std::fmt;

/// Errors that can occur during authentication and authorization operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The request body is malformed or missing required fields.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Description of why the request is invalid.
        message: String,
    },

    /// The identity provider rejected the supplied credentials.
    #[error("Authentication failed: {message}")]
    InvalidCredentials {
        /// Description from the identity provider.
        message: String,
    },

    /// The identity provider could not be reached or returned an
    /// unexpected failure.
    #[error("Identity provider unavailable: {message}")]
    ProviderUnavailable {
        /// Description of the transport or provider failure.
        message: String,
    },

    /// The identity provider has no profile for the given email.
    #[error("No identity profile found for {email}")]
    ProfileNotFound {
        /// The email that was looked up.
        email: String,
    },

    /// The request lacks a valid session credential.
    #[error("Unauthenticated: {message}")]
    Unauthenticated {
        /// Description of why the request is unauthenticated.
        message: String,
    },

    /// The authenticated identity does not satisfy the access policy.
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Description of why access is forbidden.
        message: String,
    },

    /// The auth configuration is missing or invalid.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },
}

impl AuthError {
    /// Creates a new `InvalidRequest` error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidCredentials` error.
    #[must_use]
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::InvalidCredentials {
            message: message.into(),
        }
    }

    /// Creates a new `ProviderUnavailable` error.
    #[must_use]
    pub fn provider_unavailable(message: impl Into<String>) -> Self {
        Self::ProviderUnavailable {
            message: message.into(),
        }
    }

    /// Creates a new `ProfileNotFound` error.
    #[must_use]
    pub fn profile_not_found(email: impl Into<String>) -> Self {
        Self::ProfileNotFound {
            email: email.into(),
        }
    }

    /// Creates a new `Unauthenticated` error.
    #[must_use]
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    /// Creates a new `Forbidden` error.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Creates a new `Configuration` error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a client error (4xx category).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest { .. }
                | Self::InvalidCredentials { .. }
                | Self::Unauthenticated { .. }
                | Self::Forbidden { .. }
        )
    }

    /// Returns `true` if this is a server error (5xx category).
    ///
    /// `ProfileNotFound` is deliberately in this bucket: it is operationally
    /// distinct from bad credentials but maps to the same 500 the provider
    /// failures do.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::ProviderUnavailable { .. }
                | Self::ProfileNotFound { .. }
                | Self::Configuration { .. }
        )
    }

    /// Returns the error category for logging purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidRequest { .. } => ErrorCategory::Validation,
            Self::InvalidCredentials { .. } => ErrorCategory::Authentication,
            Self::ProviderUnavailable { .. } => ErrorCategory::Federation,
            Self::ProfileNotFound { .. } => ErrorCategory::Federation,
            Self::Unauthenticated { .. } => ErrorCategory::Authentication,
            Self::Forbidden { .. } => ErrorCategory::Authorization,
            Self::Configuration { .. } => ErrorCategory::Configuration,
        }
    }
}

/// Categories of authentication/authorization errors for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Authentication-related errors (identity verification).
    Authentication,
    /// Authorization-related errors (permission checks).
    Authorization,
    /// Request validation errors.
    Validation,
    /// Identity provider federation errors.
    Federation,
    /// Configuration errors.
    Configuration,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authentication => write!(f, "authentication"),
            Self::Authorization => write!(f, "authorization"),
            Self::Validation => write!(f, "validation"),
            Self::Federation => write!(f, "federation"),
            Self::Configuration => write!(f, "configuration"),
        }
    }
}
