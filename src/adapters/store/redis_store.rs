//! Redis-backed result store for production deployments.
//!
//! One JSON value per message id, SET then EXPIREAT so Redis garbage
//! collects the row once the expiry passes. SET gives the upsert
//! (last-write-wins) semantics the pipeline expects.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::foundation::MessageId;
use crate::ports::{ResultStore, StoreError, StoredResult};

/// Key prefix for stored results.
const KEY_PREFIX: &str = "result:";

/// Redis-backed result store.
#[derive(Clone)]
pub struct RedisResultStore {
    conn: MultiplexedConnection,
}

impl RedisResultStore {
    /// Creates a store over an established connection.
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }

    fn key(message_id: &MessageId) -> String {
        format!("{}{}", KEY_PREFIX, message_id)
    }
}

#[async_trait]
impl ResultStore for RedisResultStore {
    async fn put(&self, record: StoredResult) -> Result<(), StoreError> {
        let key = Self::key(&record.message_id);
        let expires_at = record.expires_at.as_unix_secs() as i64;
        let json = serde_json::to_string(&record)
            .map_err(|e| StoreError::serialization(e.to_string()))?;

        let mut conn = self.conn.clone();

        conn.set::<_, _, ()>(&key, json)
            .await
            .map_err(|e: redis::RedisError| StoreError::unavailable(e.to_string()))?;

        conn.expire_at::<_, ()>(&key, expires_at)
            .await
            .map_err(|e: redis::RedisError| StoreError::unavailable(e.to_string()))?;

        Ok(())
    }

    async fn get(&self, message_id: &MessageId) -> Result<Option<StoredResult>, StoreError> {
        let key = Self::key(message_id);
        let mut conn = self.conn.clone();

        let json: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e: redis::RedisError| StoreError::unavailable(e.to_string()))?;

        json.map(|j| {
            serde_json::from_str(&j).map_err(|e| StoreError::serialization(e.to_string()))
        })
        .transpose()
    }
}

impl std::fmt::Debug for RedisResultStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisResultStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_prefixed_with_message_id() {
        let id = MessageId::new("msg-1").unwrap();
        assert_eq!(RedisResultStore::key(&id), "result:msg-1");
    }

    // Redis integration tests require a running Redis instance and are
    // typically run separately from unit tests.
    //
    // #[tokio::test]
    // #[ignore] // Run with: cargo test -- --ignored
    // async fn put_then_get_roundtrips() {
    //     let client = redis::Client::open("redis://127.0.0.1/").unwrap();
    //     let conn = client.get_multiplexed_tokio_connection().await.unwrap();
    //     let store = RedisResultStore::new(conn);
    //     // ... test code
    // }
}
