//! Utterance request - the call parameters for one intent resolution.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MessageId, SessionId};

/// One utterance to resolve against the NLU runtime.
///
/// `text` and `message_id` arrive with the invocation; the bot identity
/// fields (`bot_id`, `bot_alias_id`, `locale_id`, `session_id`) are
/// process-level configuration today, but every field may vary per request.
/// All five runtime parameters are forwarded verbatim, with no
/// transformation, escaping, or truncation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtteranceRequest {
    /// The user's message. Forwarded as-is, even when empty; the runtime's
    /// own rejection behavior governs that case.
    pub text: String,
    /// Caller-assigned correlation id, also the stored result's primary key.
    pub message_id: MessageId,
    /// Conversation session passed through to the runtime.
    pub session_id: SessionId,
    /// Locale the bot resolves intents in.
    pub locale_id: String,
    /// Bot identifier at the NLU runtime.
    pub bot_id: String,
    /// Bot alias (deployment stage) identifier.
    pub bot_alias_id: String,
}

impl UtteranceRequest {
    /// Creates a request with the caller-supplied fields; bot identity
    /// defaults to empty and is filled via the builder methods.
    pub fn new(text: impl Into<String>, message_id: MessageId) -> Self {
        Self {
            text: text.into(),
            message_id,
            session_id: SessionId::generate(),
            locale_id: String::new(),
            bot_id: String::new(),
            bot_alias_id: String::new(),
        }
    }

    /// Sets the conversation session.
    pub fn with_session_id(mut self, session_id: SessionId) -> Self {
        self.session_id = session_id;
        self
    }

    /// Sets the locale.
    pub fn with_locale_id(mut self, locale_id: impl Into<String>) -> Self {
        self.locale_id = locale_id.into();
        self
    }

    /// Sets the bot identifier.
    pub fn with_bot_id(mut self, bot_id: impl Into<String>) -> Self {
        self.bot_id = bot_id.into();
        self
    }

    /// Sets the bot alias identifier.
    pub fn with_bot_alias_id(mut self, bot_alias_id: impl Into<String>) -> Self {
        self.bot_alias_id = bot_alias_id.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_message_id() -> MessageId {
        MessageId::new("msg-123").unwrap()
    }

    #[test]
    fn builder_fills_all_fields() {
        let request = UtteranceRequest::new("hello", test_message_id())
            .with_session_id(SessionId::new("session-1").unwrap())
            .with_locale_id("en_US")
            .with_bot_id("BOT123")
            .with_bot_alias_id("ALIAS456");

        assert_eq!(request.text, "hello");
        assert_eq!(request.message_id.as_str(), "msg-123");
        assert_eq!(request.session_id.as_str(), "session-1");
        assert_eq!(request.locale_id, "en_US");
        assert_eq!(request.bot_id, "BOT123");
        assert_eq!(request.bot_alias_id, "ALIAS456");
    }

    #[test]
    fn new_generates_a_session_id() {
        let request = UtteranceRequest::new("hello", test_message_id());
        assert!(!request.session_id.as_str().is_empty());
    }

    #[test]
    fn empty_text_is_preserved_verbatim() {
        let request = UtteranceRequest::new("", test_message_id());
        assert_eq!(request.text, "");
    }
}
