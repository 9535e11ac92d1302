//! Result Store Port - key-value persistence for resolved replies.
//!
//! A single-row upsert keyed by message id, with an absolute expiry the
//! store enforces itself (time-to-live semantics belong to the store, not
//! to this core). Writes are best-effort from the pipeline's point of view.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MessageId, Timestamp};

/// A resolved reply persisted for later retrieval.
///
/// Created once per successfully resolved request and never updated in
/// place; a later write for the same message id replaces the row wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredResult {
    /// Primary key, assigned by the caller of the original request.
    pub message_id: MessageId,
    /// The resolved message, duplicated from the outcome for durability.
    pub result: String,
    /// Absolute expiry; the store discards the row after this moment.
    pub expires_at: Timestamp,
}

impl StoredResult {
    /// Creates a stored result.
    pub fn new(message_id: MessageId, result: impl Into<String>, expires_at: Timestamp) -> Self {
        Self {
            message_id,
            result: result.into(),
            expires_at,
        }
    }
}

/// Port for the key-value result store.
///
/// `put` has upsert semantics: writing the same message id twice leaves the
/// most recent row (last-write-wins, no conditional write).
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Writes (or replaces) the row for the record's message id.
    async fn put(&self, record: StoredResult) -> Result<(), StoreError>;

    /// Reads the row for a message id, if present and not expired.
    async fn get(&self, message_id: &MessageId) -> Result<Option<StoredResult>, StoreError>;
}

/// Result store errors.
///
/// All of them are absorbed by the pipeline; none reaches the caller.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached or rejected the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The record could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Creates a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }
}
