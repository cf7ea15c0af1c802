//! Stored record types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A persisted contact-form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    /// Monotonically increasing identifier, assigned by storage.
    pub id: u64,

    /// Submitter's name.
    pub name: String,

    /// Submitter's email address.
    pub email: String,

    /// Optional phone number, exactly as submitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Free-text message body.
    pub message: String,

    /// Client IP captured from forwarding headers, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,

    /// Client User-Agent header, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Submission time (UTC).
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A contact-form submission before storage has assigned it an identity.
#[derive(Debug, Clone)]
pub struct NewContactRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_contact_request_serializes_rfc3339_and_omits_empty_options() {
        let record = ContactRequest {
            id: 7,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            message: "Hello".to_string(),
            ip_address: None,
            user_agent: None,
            created_at: datetime!(2026-08-24 12:00:00 UTC),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["created_at"], "2026-08-24T12:00:00Z");
        assert!(json.get("phone").is_none());
        assert!(json.get("ip_address").is_none());
    }
}
