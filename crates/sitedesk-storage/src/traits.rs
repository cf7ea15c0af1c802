//! Storage trait definitions.

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::types::{ContactRequest, NewContactRequest};

/// Storage backend for contact-form submissions.
///
/// Implementations must be safe to share across tasks (`Send + Sync`).
/// Lookup misses are `Ok(None)`, not errors; `Err` is reserved for backend
/// failures.
#[async_trait]
pub trait ContactRequestStorage: Send + Sync {
    /// Persists a new submission, assigning it the next identifier and a
    /// creation timestamp. Returns the stored record.
    async fn create(&self, request: NewContactRequest) -> StorageResult<ContactRequest>;

    /// Lists all submissions, newest first.
    async fn list(&self) -> StorageResult<Vec<ContactRequest>>;

    /// Fetches a single submission by identifier.
    async fn get(&self, id: u64) -> StorageResult<Option<ContactRequest>>;
}
