//! Lex HTTP Runtime - recognize-text client for a Lex-V2-shaped endpoint.
//!
//! POSTs the utterance to
//! `/bots/{botId}/botAliases/{botAliasId}/botLocales/{localeId}/sessions/{sessionId}/text`
//! and reads the reply's `messages` list. Credentials travel in an
//! `x-api-key` header (the gateway in front of the runtime terminates
//! provider-native auth).

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::domain::resolver::UtteranceRequest;
use crate::ports::{NluError, NluRuntime, RecognizedReply, ReplyMessage};

/// Configuration for the Lex HTTP runtime client.
#[derive(Debug, Clone)]
pub struct LexRuntimeConfig {
    /// API key for the gateway in front of the runtime.
    api_key: Secret<String>,
    /// Base URL of the recognize-text endpoint.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl LexRuntimeConfig {
    /// Creates a configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://runtime-v2-lex.us-east-1.amazonaws.com".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Recognize-text client for a Lex-V2-shaped runtime.
pub struct LexHttpRuntime {
    config: LexRuntimeConfig,
    client: Client,
}

impl LexHttpRuntime {
    /// Creates a runtime client with the given configuration.
    pub fn new(config: LexRuntimeConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the recognize-text URL for one request.
    fn text_url(&self, request: &UtteranceRequest) -> String {
        format!(
            "{}/bots/{}/botAliases/{}/botLocales/{}/sessions/{}/text",
            self.config.base_url.trim_end_matches('/'),
            request.bot_id,
            request.bot_alias_id,
            request.locale_id,
            request.session_id,
        )
    }

    /// Maps a transport error from reqwest into the port's taxonomy.
    fn map_transport_error(&self, err: reqwest::Error) -> NluError {
        if err.is_timeout() {
            NluError::Timeout {
                timeout_secs: self.config.timeout.as_secs() as u32,
            }
        } else if err.is_connect() {
            NluError::network(format!("Connection failed: {}", err))
        } else {
            NluError::network(err.to_string())
        }
    }
}

#[async_trait]
impl NluRuntime for LexHttpRuntime {
    async fn recognize_text(
        &self,
        request: &UtteranceRequest,
    ) -> Result<RecognizedReply, NluError> {
        let body = LexTextRequest {
            text: request.text.clone(),
        };

        let response = self
            .client
            .post(self.text_url(request))
            .header("x-api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => NluError::AuthenticationFailed,
                429 => NluError::throttled(error_body),
                code => NluError::service(code, error_body),
            });
        }

        let raw: Value = response
            .json()
            .await
            .map_err(|e| NluError::parse(e.to_string()))?;

        let reply: LexTextResponse = serde_json::from_value(raw.clone())
            .map_err(|e| NluError::parse(e.to_string()))?;

        let messages = reply
            .messages
            .into_iter()
            .map(|m| ReplyMessage::new(m.content))
            .collect();

        Ok(RecognizedReply::new(messages, raw))
    }
}

/// Wire request: the path carries the other four parameters.
#[derive(Debug, Serialize)]
struct LexTextRequest {
    text: String,
}

/// Wire response; `messages` may be absent entirely.
#[derive(Debug, Deserialize)]
struct LexTextResponse {
    #[serde(default)]
    messages: Vec<LexMessage>,
}

#[derive(Debug, Deserialize)]
struct LexMessage {
    #[serde(default)]
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{MessageId, SessionId};

    fn test_request() -> UtteranceRequest {
        UtteranceRequest::new("hello", MessageId::new("msg-1").unwrap())
            .with_session_id(SessionId::new("session-1").unwrap())
            .with_locale_id("en_US")
            .with_bot_id("BOT123")
            .with_bot_alias_id("ALIAS456")
    }

    #[test]
    fn text_url_interpolates_all_path_parameters() {
        let runtime = LexHttpRuntime::new(
            LexRuntimeConfig::new("key").with_base_url("https://nlu.example.com/"),
        );

        assert_eq!(
            runtime.text_url(&test_request()),
            "https://nlu.example.com/bots/BOT123/botAliases/ALIAS456/botLocales/en_US/sessions/session-1/text"
        );
    }

    #[test]
    fn response_with_messages_deserializes() {
        let json = r#"{ "messages": [ { "content": "Hi there!" }, { "content": "More." } ] }"#;
        let reply: LexTextResponse = serde_json::from_str(json).unwrap();
        assert_eq!(reply.messages.len(), 2);
        assert_eq!(reply.messages[0].content, "Hi there!");
    }

    #[test]
    fn response_without_messages_deserializes_empty() {
        let reply: LexTextResponse =
            serde_json::from_str(r#"{ "sessionState": {} }"#).unwrap();
        assert!(reply.messages.is_empty());
    }

    #[test]
    fn config_defaults_are_sensible() {
        let config = LexRuntimeConfig::new("key");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.base_url.starts_with("https://"));
    }

    // Live endpoint tests require a hosted runtime and run separately.
    //
    // #[tokio::test]
    // #[ignore] // Run with: cargo test -- --ignored
    // async fn recognizes_text_against_live_runtime() { ... }
}
