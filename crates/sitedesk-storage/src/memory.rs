//! In-memory storage backend.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::error::StorageResult;
use crate::traits::ContactRequestStorage;
use crate::types::{ContactRequest, NewContactRequest};

/// In-memory contact request storage.
///
/// Records live in insertion order behind an async `RwLock`; identifiers
/// start at 1 and never repeat within a process. Contents are lost on
/// restart.
#[derive(Default)]
pub struct InMemoryContactRequestStorage {
    records: RwLock<Vec<ContactRequest>>,
    next_id: AtomicU64,
}

impl InMemoryContactRequestStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl ContactRequestStorage for InMemoryContactRequestStorage {
    async fn create(&self, request: NewContactRequest) -> StorageResult<ContactRequest> {
        let record = ContactRequest {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: request.name,
            email: request.email,
            phone: request.phone,
            message: request.message,
            ip_address: request.ip_address,
            user_agent: request.user_agent,
            created_at: OffsetDateTime::now_utc(),
        };

        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn list(&self) -> StorageResult<Vec<ContactRequest>> {
        let records = self.records.read().await;
        Ok(records.iter().rev().cloned().collect())
    }

    async fn get(&self, id: u64) -> StorageResult<Option<ContactRequest>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(name: &str) -> NewContactRequest {
        NewContactRequest {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: None,
            message: "Hello".to_string(),
            ip_address: Some("203.0.113.9".to_string()),
            user_agent: Some("test-agent".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids_from_one() {
        let store = InMemoryContactRequestStorage::new();

        let first = store.create(submission("Ada")).await.unwrap();
        let second = store.create(submission("Grace")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_list_returns_newest_first() {
        let store = InMemoryContactRequestStorage::new();
        store.create(submission("Ada")).await.unwrap();
        store.create(submission("Grace")).await.unwrap();
        store.create(submission("Edsger")).await.unwrap();

        let records = store.list().await.unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Edsger", "Grace", "Ada"]);
    }

    #[tokio::test]
    async fn test_get_miss_is_none() {
        let store = InMemoryContactRequestStorage::new();
        let created = store.create(submission("Ada")).await.unwrap();

        assert_eq!(store.get(created.id).await.unwrap(), Some(created));
        assert_eq!(store.get(999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_concurrent_creates_never_reuse_ids() {
        use std::collections::HashSet;
        use std::sync::Arc;

        let store = Arc::new(InMemoryContactRequestStorage::new());
        let mut handles = Vec::new();
        for i in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.create(submission(&format!("User{i}"))).await.unwrap().id
            }));
        }

        let mut seen = HashSet::new();
        for handle in handles {
            assert!(seen.insert(handle.await.unwrap()));
        }
        assert_eq!(seen.len(), 32);
    }
}
