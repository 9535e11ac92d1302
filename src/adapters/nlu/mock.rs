//! Mock NLU Runtime for tests and local development.
//!
//! Configurable to return canned replies, empty replies, or injected
//! errors, and tracks calls for verification.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::resolver::UtteranceRequest;
use crate::ports::{NluError, NluRuntime, RecognizedReply, ReplyMessage};

/// A configured mock reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return a reply with the given message contents.
    Messages(Vec<String>),
    /// Return a successful reply with no messages.
    Empty,
    /// Return an error.
    Error(MockNluError),
}

/// Mock error kinds, convertible into the port's error type.
#[derive(Debug, Clone)]
pub enum MockNluError {
    Network { message: String },
    Timeout { timeout_secs: u32 },
    Throttled { message: String },
    AuthenticationFailed,
    Service { status: u16, body: String },
}

impl From<MockNluError> for NluError {
    fn from(err: MockNluError) -> Self {
        match err {
            MockNluError::Network { message } => NluError::network(message),
            MockNluError::Timeout { timeout_secs } => NluError::Timeout { timeout_secs },
            MockNluError::Throttled { message } => NluError::throttled(message),
            MockNluError::AuthenticationFailed => NluError::AuthenticationFailed,
            MockNluError::Service { status, body } => NluError::service(status, body),
        }
    }
}

/// Mock NLU runtime.
///
/// Replies are consumed in order; when the queue is empty the runtime
/// falls back to an empty reply.
#[derive(Debug, Clone, Default)]
pub struct MockRuntime {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    calls: Arc<Mutex<Vec<UtteranceRequest>>>,
}

impl MockRuntime {
    /// Creates a mock with no configured replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply carrying the given message contents.
    pub fn with_messages<I, S>(self, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let messages = messages.into_iter().map(Into::into).collect();
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Messages(messages));
        self
    }

    /// Queues a successful reply with no messages.
    pub fn with_empty_reply(self) -> Self {
        self.replies.lock().unwrap().push_back(MockReply::Empty);
        self
    }

    /// Queues an error reply.
    pub fn with_error(self, error: MockNluError) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Error(error));
        self
    }

    /// Returns the requests seen so far.
    pub fn calls(&self) -> Vec<UtteranceRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn raw_for(messages: &[String]) -> Value {
        json!({
            "messages": messages
                .iter()
                .map(|m| json!({ "content": m }))
                .collect::<Vec<_>>()
        })
    }
}

#[async_trait]
impl NluRuntime for MockRuntime {
    async fn recognize_text(
        &self,
        request: &UtteranceRequest,
    ) -> Result<RecognizedReply, NluError> {
        self.calls.lock().unwrap().push(request.clone());

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(MockReply::Empty);

        match reply {
            MockReply::Messages(messages) => {
                let raw = Self::raw_for(&messages);
                let typed = messages.into_iter().map(ReplyMessage::new).collect();
                Ok(RecognizedReply::new(typed, raw))
            }
            MockReply::Empty => Ok(RecognizedReply::empty(json!([]))),
            MockReply::Error(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::MessageId;

    fn test_request() -> UtteranceRequest {
        UtteranceRequest::new("hello", MessageId::new("msg-1").unwrap())
    }

    #[tokio::test]
    async fn replies_are_consumed_in_order() {
        let runtime = MockRuntime::new()
            .with_messages(["first"])
            .with_messages(["second"]);

        let a = runtime.recognize_text(&test_request()).await.unwrap();
        let b = runtime.recognize_text(&test_request()).await.unwrap();

        assert_eq!(a.first_message(), Some("first"));
        assert_eq!(b.first_message(), Some("second"));
    }

    #[tokio::test]
    async fn exhausted_queue_falls_back_to_empty() {
        let runtime = MockRuntime::new();
        let reply = runtime.recognize_text(&test_request()).await.unwrap();
        assert!(reply.messages.is_empty());
    }

    #[tokio::test]
    async fn errors_convert_into_port_errors() {
        let runtime = MockRuntime::new().with_error(MockNluError::Throttled {
            message: "rate exceeded".to_string(),
        });

        let err = runtime.recognize_text(&test_request()).await.unwrap_err();
        assert!(matches!(err, NluError::Throttled { .. }));
    }

    #[tokio::test]
    async fn calls_are_tracked() {
        let runtime = MockRuntime::new().with_messages(["hi"]);
        runtime.recognize_text(&test_request()).await.unwrap();

        let calls = runtime.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].text, "hello");
    }
}
