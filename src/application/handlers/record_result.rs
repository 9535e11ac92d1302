//! RecordResultHandler - persists a resolved reply with an expiry.

use std::sync::Arc;

use crate::domain::foundation::{MessageId, Timestamp};
use crate::ports::{ResultStore, StoreError, StoredResult};

/// Default time-to-live for stored results: 24 hours.
pub const DEFAULT_RESULT_TTL_SECS: u64 = 86_400;

/// Handler that records a resolved reply keyed by message id.
///
/// Invoked only on the resolved path. Computes the absolute expiry at write
/// time and upserts through the store port; a second write for the same
/// message id silently replaces the first. The handler itself reports
/// failures; its sole caller decides to discard them.
pub struct RecordResultHandler {
    store: Arc<dyn ResultStore>,
    ttl_secs: u64,
}

impl RecordResultHandler {
    /// Creates a recorder with the default 24-hour TTL.
    pub fn new(store: Arc<dyn ResultStore>) -> Self {
        Self {
            store,
            ttl_secs: DEFAULT_RESULT_TTL_SECS,
        }
    }

    /// Overrides the time-to-live.
    pub fn with_ttl_secs(mut self, ttl_secs: u64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    /// Writes the resolved message under the given message id.
    ///
    /// expires_at is write-time now + TTL; the store owns the actual
    /// garbage collection once that moment passes.
    ///
    /// # Errors
    /// Returns `StoreError` if the write fails. Never retried.
    pub async fn record(&self, message_id: &MessageId, message: &str) -> Result<(), StoreError> {
        let expires_at = Timestamp::now().plus_secs(self.ttl_secs);
        let record = StoredResult::new(message_id.clone(), message, expires_at);

        tracing::debug!(
            message_id = %record.message_id,
            expires_at = record.expires_at.as_unix_secs(),
            "recording resolved reply"
        );

        self.store.put(record).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════

    struct RecordingStore {
        records: Mutex<Vec<StoredResult>>,
    }

    impl RecordingStore {
        fn new() -> Self {
            Self {
                records: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ResultStore for RecordingStore {
        async fn put(&self, record: StoredResult) -> Result<(), StoreError> {
            self.records.lock().unwrap().push(record);
            Ok(())
        }

        async fn get(&self, message_id: &MessageId) -> Result<Option<StoredResult>, StoreError> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|r| &r.message_id == message_id)
                .cloned())
        }
    }

    struct FailingStore;

    #[async_trait]
    impl ResultStore for FailingStore {
        async fn put(&self, _record: StoredResult) -> Result<(), StoreError> {
            Err(StoreError::unavailable("simulated outage"))
        }

        async fn get(&self, _message_id: &MessageId) -> Result<Option<StoredResult>, StoreError> {
            Err(StoreError::unavailable("simulated outage"))
        }
    }

    fn test_message_id() -> MessageId {
        MessageId::new("msg-1").unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn record_writes_message_under_message_id() {
        let store = Arc::new(RecordingStore::new());
        let handler = RecordResultHandler::new(store.clone());

        handler.record(&test_message_id(), "Hi there!").await.unwrap();

        let records = store.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message_id.as_str(), "msg-1");
        assert_eq!(records[0].result, "Hi there!");
    }

    #[tokio::test]
    async fn record_sets_expiry_one_day_out() {
        let store = Arc::new(RecordingStore::new());
        let handler = RecordResultHandler::new(store.clone());

        let before = Timestamp::now().as_unix_secs();
        handler.record(&test_message_id(), "Hi there!").await.unwrap();
        let after = Timestamp::now().as_unix_secs();

        let records = store.records.lock().unwrap();
        let expires_at = records[0].expires_at.as_unix_secs();
        assert!(expires_at >= before + DEFAULT_RESULT_TTL_SECS);
        assert!(expires_at <= after + DEFAULT_RESULT_TTL_SECS);
    }

    #[tokio::test]
    async fn record_honors_custom_ttl() {
        let store = Arc::new(RecordingStore::new());
        let handler = RecordResultHandler::new(store.clone()).with_ttl_secs(60);

        let before = Timestamp::now().as_unix_secs();
        handler.record(&test_message_id(), "Hi there!").await.unwrap();

        let records = store.records.lock().unwrap();
        let expires_at = records[0].expires_at.as_unix_secs();
        assert!(expires_at >= before + 60);
        assert!(expires_at < before + DEFAULT_RESULT_TTL_SECS);
    }

    #[tokio::test]
    async fn record_surfaces_store_failure_to_its_caller() {
        let handler = RecordResultHandler::new(Arc::new(FailingStore));

        let result = handler.record(&test_message_id(), "Hi there!").await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }

    #[tokio::test]
    async fn record_twice_keeps_both_writes_in_order() {
        let store = Arc::new(RecordingStore::new());
        let handler = RecordResultHandler::new(store.clone());

        handler.record(&test_message_id(), "first").await.unwrap();
        handler.record(&test_message_id(), "second").await.unwrap();

        // The store's upsert semantics decide visibility; the recorder
        // itself neither deduplicates nor rejects repeats.
        let latest = store.get(&test_message_id()).await.unwrap().unwrap();
        assert_eq!(latest.result, "second");
    }
}
