//! NLU Runtime Port - interface to the hosted conversational runtime.
//!
//! The runtime is an opaque collaborator: it takes the five utterance
//! parameters and returns a list of messages (possibly empty), or raises a
//! transport or service error. Its intent grammar, slot filling, and session
//! memory are entirely out of scope here.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::resolver::UtteranceRequest;

/// Port for the remote "recognize text" operation.
///
/// Implementations connect to a hosted NLU runtime and translate between
/// the provider-specific wire format and [`RecognizedReply`]. Exactly one
/// attempt is made per invocation; retry policy is deliberately absent.
#[async_trait]
pub trait NluRuntime: Send + Sync {
    /// Forwards one utterance to the runtime and returns its reply.
    ///
    /// # Errors
    /// Returns `NluError` for any transport or service fault. An empty
    /// reply is NOT an error; it comes back as a reply with no messages.
    async fn recognize_text(&self, request: &UtteranceRequest)
        -> Result<RecognizedReply, NluError>;
}

/// One conversational message in a runtime reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyMessage {
    /// The message content shown to the user.
    pub content: String,
}

impl ReplyMessage {
    /// Creates a reply message.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// The reply of one recognize-text call.
///
/// Carries the typed message list alongside the raw runtime payload, which
/// is preserved opaquely for the unresolved path and for logging.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedReply {
    /// Messages returned by the runtime, in runtime order.
    pub messages: Vec<ReplyMessage>,
    /// The runtime's payload as received, untyped.
    pub raw: Value,
}

impl RecognizedReply {
    /// Creates a reply from messages and the raw payload.
    pub fn new(messages: Vec<ReplyMessage>, raw: Value) -> Self {
        Self { messages, raw }
    }

    /// Creates a reply with no messages.
    pub fn empty(raw: Value) -> Self {
        Self {
            messages: Vec::new(),
            raw,
        }
    }

    /// Returns the first message's content, if any.
    pub fn first_message(&self) -> Option<&str> {
        self.messages.first().map(|m| m.content.as_str())
    }
}

/// NLU runtime errors.
///
/// Every variant maps to the `Failed` outcome; none is retried.
#[derive(Debug, thiserror::Error)]
pub enum NluError {
    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// The request exceeded the client's deadline.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },

    /// The runtime throttled the request.
    #[error("throttled by runtime: {message}")]
    Throttled {
        /// Error details from the runtime.
        message: String,
    },

    /// Credentials were rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The runtime answered with a non-success status.
    #[error("runtime error (status {status}): {body}")]
    Service {
        /// HTTP status returned by the runtime.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The runtime's reply could not be interpreted.
    #[error("parse error: {0}")]
    Parse(String),
}

impl NluError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a throttled error.
    pub fn throttled(message: impl Into<String>) -> Self {
        Self::Throttled {
            message: message.into(),
        }
    }

    /// Creates a service error.
    pub fn service(status: u16, body: impl Into<String>) -> Self {
        Self::Service {
            status,
            body: body.into(),
        }
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_message_returns_first_content() {
        let reply = RecognizedReply::new(
            vec![ReplyMessage::new("Hi there!"), ReplyMessage::new("second")],
            json!({}),
        );
        assert_eq!(reply.first_message(), Some("Hi there!"));
    }

    #[test]
    fn empty_reply_has_no_first_message() {
        let reply = RecognizedReply::empty(json!({ "messages": [] }));
        assert_eq!(reply.first_message(), None);
        assert!(reply.messages.is_empty());
    }

    #[test]
    fn errors_display_correctly() {
        assert_eq!(
            NluError::network("connection refused").to_string(),
            "network error: connection refused"
        );
        assert_eq!(
            NluError::Timeout { timeout_secs: 30 }.to_string(),
            "request timed out after 30s"
        );
        assert_eq!(
            NluError::throttled("slow down").to_string(),
            "throttled by runtime: slow down"
        );
        assert_eq!(
            NluError::service(502, "bad gateway").to_string(),
            "runtime error (status 502): bad gateway"
        );
    }
}
