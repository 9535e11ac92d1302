//! Resolution outcome - the tagged result of one NLU call.

use serde_json::Value;

use super::envelope::{
    ResponseEnvelope, STATUS_FAILED, STATUS_RESOLVED, STATUS_UNRESOLVED,
};

/// The result of one call to the NLU runtime.
///
/// Exactly three shapes: the call produced a message, the call succeeded
/// but produced nothing actionable, or the call itself failed. `Unresolved`
/// is a normal terminal state, not an error. The runtime and error payloads
/// are opaque by design; their shapes are not under this core's control.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionOutcome {
    /// The runtime returned at least one message; `message` is the first
    /// message's content.
    Resolved { message: String },
    /// The call succeeded but carried no message.
    Unresolved { raw: Value },
    /// The call itself raised an error.
    Failed { cause: String },
}

impl ResolutionOutcome {
    /// Creates a resolved outcome.
    pub fn resolved(message: impl Into<String>) -> Self {
        Self::Resolved {
            message: message.into(),
        }
    }

    /// Creates an unresolved outcome carrying the raw runtime payload.
    pub fn unresolved(raw: Value) -> Self {
        Self::Unresolved { raw }
    }

    /// Creates a failed outcome from a rendered error.
    pub fn failed(cause: impl Into<String>) -> Self {
        Self::Failed {
            cause: cause.into(),
        }
    }

    /// Returns true if this outcome carries a resolved message.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }

    /// Maps the outcome to its caller-visible envelope.
    ///
    /// The mapping is 1:1 and total: Resolved -> 200 with the message,
    /// Unresolved -> 408 with the serialized raw payload, Failed -> 500
    /// with the rendered cause.
    pub fn into_envelope(self) -> ResponseEnvelope {
        match self {
            Self::Resolved { message } => ResponseEnvelope::new(STATUS_RESOLVED, message),
            Self::Unresolved { raw } => {
                ResponseEnvelope::new(STATUS_UNRESOLVED, raw.to_string())
            }
            Self::Failed { cause } => ResponseEnvelope::new(STATUS_FAILED, cause),
        }
    }
}
