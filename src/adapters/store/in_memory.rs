//! In-Memory Result Store
//!
//! Stores results in a process-local map. Useful for testing and
//! development; reads honor the expiry the way the real store's garbage
//! collection would.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{MessageId, Timestamp};
use crate::ports::{ResultStore, StoreError, StoredResult};

/// In-memory result store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResultStore {
    records: Arc<RwLock<HashMap<MessageId, StoredResult>>>,
}

impl InMemoryResultStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored data (useful for tests).
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }

    /// Get the number of stored results, expired rows included.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ResultStore for InMemoryResultStore {
    async fn put(&self, record: StoredResult) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        records.insert(record.message_id.clone(), record);
        Ok(())
    }

    async fn get(&self, message_id: &MessageId) -> Result<Option<StoredResult>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .get(message_id)
            .filter(|r| r.expires_at.is_after(&Timestamp::now()))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live_record(id: &str, result: &str) -> StoredResult {
        StoredResult::new(
            MessageId::new(id).unwrap(),
            result,
            Timestamp::now().plus_secs(60),
        )
    }

    #[tokio::test]
    async fn put_then_get_returns_record() {
        let store = InMemoryResultStore::new();
        store.put(live_record("msg-1", "Hi there!")).await.unwrap();

        let record = store
            .get(&MessageId::new("msg-1").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.result, "Hi there!");
    }

    #[tokio::test]
    async fn get_unknown_id_returns_none() {
        let store = InMemoryResultStore::new();
        let record = store.get(&MessageId::new("absent").unwrap()).await.unwrap();
        assert!(record.is_none());
    }

    #[tokio::test]
    async fn second_put_replaces_the_first() {
        let store = InMemoryResultStore::new();
        store.put(live_record("msg-1", "first")).await.unwrap();
        store.put(live_record("msg-1", "second")).await.unwrap();

        let record = store
            .get(&MessageId::new("msg-1").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.result, "second");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn expired_record_is_invisible() {
        let store = InMemoryResultStore::new();
        let expired = StoredResult::new(
            MessageId::new("msg-1").unwrap(),
            "stale",
            Timestamp::from_unix_secs(1),
        );
        store.put(expired).await.unwrap();

        let record = store.get(&MessageId::new("msg-1").unwrap()).await.unwrap();
        assert!(record.is_none());
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let store = InMemoryResultStore::new();
        store.put(live_record("msg-1", "x")).await.unwrap();
        store.clear().await;
        assert!(store.is_empty().await);
    }
}
