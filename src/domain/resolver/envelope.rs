//! Response envelope - the caller-visible result of one invocation.

use serde::{Deserialize, Serialize};

/// Status code for a resolution that produced a message.
pub const STATUS_RESOLVED: u16 = 200;

/// Status code for a resolution that produced no actionable message.
///
/// A process-specific sentinel, not a literal request timeout; existing
/// callers branch on this exact value.
pub const STATUS_UNRESOLVED: u16 = 408;

/// Status code for a failed resolution call.
pub const STATUS_FAILED: u16 = 500;

/// The caller-visible result of one invocation.
///
/// Exactly one of three shapes per request; callers distinguish them by
/// `status_code` alone, never by payload shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// One of 200 (resolved), 408 (unresolved), 500 (failed).
    pub status_code: u16,
    /// The resolved message, or a serialized runtime payload / error.
    pub payload: String,
}

impl ResponseEnvelope {
    /// Creates an envelope with an explicit status code.
    pub fn new(status_code: u16, payload: impl Into<String>) -> Self {
        Self {
            status_code,
            payload: payload.into(),
        }
    }

    /// Returns true if this envelope carries a resolved message.
    pub fn is_resolved(&self) -> bool {
        self.status_code == STATUS_RESOLVED
    }
}
