//! Wire types for the external identity provider.

use serde::{Deserialize, Serialize};

/// Token response from the provider's token endpoint.
///
/// Ephemeral, in-memory only. Produced once per login attempt and discarded
/// after use; never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    /// The opaque access token.
    pub access_token: String,

    /// The token type (usually "Bearer").
    pub token_type: String,

    /// Token lifetime in seconds.
    pub expires_in: Option<u64>,
}

/// A federated identity as known to the external provider.
///
/// Fetched fresh on every login; never cached or persisted locally.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityProfile {
    /// Provider-unique subject identifier.
    pub user_id: String,

    /// The identity's email address.
    pub email: String,

    /// Application metadata attached to the identity at the provider.
    #[serde(default)]
    pub app_metadata: AppMetadata,
}

/// The policy-relevant subset of the provider's open `app_metadata` mapping.
///
/// Decoded leniently: unknown keys are ignored, missing keys default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
    /// The identity's role (e.g. "admin").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Site identifiers the identity is assigned to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sites: Vec<String>,
}

/// Error body returned by the provider on a failed token request.
#[derive(Debug, Deserialize)]
pub(crate) struct ProviderErrorBody {
    #[allow(dead_code)]
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_decodes_with_unknown_metadata_keys() {
        let json = r#"{
            "user_id": "auth0|abc123",
            "email": "admin@example.com",
            "app_metadata": {
                "role": "admin",
                "sites": ["site-a"],
                "favorite_color": "teal",
                "nested": {"anything": true}
            }
        }"#;

        let profile: IdentityProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.user_id, "auth0|abc123");
        assert_eq!(profile.app_metadata.role.as_deref(), Some("admin"));
        assert_eq!(profile.app_metadata.sites, vec!["site-a".to_string()]);
    }

    #[test]
    fn test_profile_decodes_without_metadata() {
        let json = r#"{"user_id": "auth0|x", "email": "x@example.com"}"#;
        let profile: IdentityProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.app_metadata, AppMetadata::default());
    }

    #[test]
    fn test_token_grant_decodes() {
        let json = r#"{"access_token": "abc", "token_type": "Bearer", "expires_in": 86400}"#;
        let grant: TokenGrant = serde_json::from_str(json).unwrap();
        assert_eq!(grant.access_token, "abc");
        assert_eq!(grant.token_type, "Bearer");
        assert_eq!(grant.expires_in, Some(86400));
    }
}
