//! LLM Endpoint Runtime - recognize-text over a hosted text-generation
//! endpoint.
//!
//! Alternative to the Lex-shaped runtime: the utterance is sent as a raw
//! prompt to an LLM inference endpoint that answers
//! `{ "result": [ "<completion>" ] }`. The completion's final
//! `### Assistant:` turn is extracted and wrapped as a one-message
//! recognition, so the rest of the pipeline is indifferent to which
//! runtime flavor answered.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::domain::resolver::UtteranceRequest;
use crate::ports::{NluError, NluRuntime, RecognizedReply, ReplyMessage};

/// Marker preceding the assistant's turn in the endpoint's completion.
const ASSISTANT_MARKER: &str = "### Assistant:\n";

/// Sampling parameters forwarded with every generation request.
#[derive(Debug, Clone, Serialize)]
pub struct SamplingParams {
    pub request_output_len: u32,
    pub repetition_penalty: f64,
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            request_output_len: 512,
            repetition_penalty: 1.1,
            temperature: 0.9,
            top_k: 50,
            top_p: 0.9,
        }
    }
}

/// Configuration for the LLM endpoint runtime.
#[derive(Debug, Clone)]
pub struct LlmEndpointConfig {
    /// API key for the endpoint.
    api_key: Secret<String>,
    /// Full URL of the generation endpoint.
    pub endpoint_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Sampling parameters sent with each request.
    pub sampling: SamplingParams,
}

impl LlmEndpointConfig {
    /// Creates a configuration with the given API key and endpoint URL.
    pub fn new(api_key: impl Into<String>, endpoint_url: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            endpoint_url: endpoint_url.into(),
            timeout: Duration::from_secs(60),
            sampling: SamplingParams::default(),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the sampling parameters.
    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Recognize-text client over a hosted LLM inference endpoint.
pub struct LlmEndpointRuntime {
    config: LlmEndpointConfig,
    client: Client,
}

impl LlmEndpointRuntime {
    /// Creates a runtime client with the given configuration.
    pub fn new(config: LlmEndpointConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Extracts the assistant's final turn from a raw completion.
    ///
    /// The endpoint echoes the whole exchange; only the text after the last
    /// `### Assistant:` marker is the reply. A completion without the
    /// marker is returned whole.
    fn extract_answer(completion: &str) -> &str {
        match completion.rfind(ASSISTANT_MARKER) {
            Some(pos) => &completion[pos + ASSISTANT_MARKER.len()..],
            None => completion,
        }
    }

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
impl NluRuntime for LlmEndpointRuntime {
    async fn recognize_text(
        &self,
        request: &UtteranceRequest,
    ) -> Result<RecognizedReply, NluError> {
        let body = GenerationRequest {
            text: request.text.clone(),
            sampling: self.config.sampling.clone(),
        };

        let response = self
            .client
            .post(&self.config.endpoint_url)
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

        let reply: GenerationResponse = serde_json::from_value(raw.clone())
            .map_err(|e| NluError::parse(e.to_string()))?;

        let messages = reply
            .result
            .first()
            .map(|completion| vec![ReplyMessage::new(Self::extract_answer(completion))])
            .unwrap_or_default();

        Ok(RecognizedReply::new(messages, raw))
    }
}

/// Wire request: prompt plus flattened sampling parameters.
#[derive(Debug, Serialize)]
struct GenerationRequest {
    text: String,
    #[serde(flatten)]
    sampling: SamplingParams,
}

/// Wire response; an empty `result` list means no completion.
#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    result: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_answer_takes_text_after_last_marker() {
        let completion =
            "### Human:\nhello\n### Assistant:\nfirst\n### Human:\nmore\n### Assistant:\nHi there!";
        assert_eq!(LlmEndpointRuntime::extract_answer(completion), "Hi there!");
    }

    #[test]
    fn extract_answer_without_marker_returns_whole_completion() {
        assert_eq!(
            LlmEndpointRuntime::extract_answer("plain answer"),
            "plain answer"
        );
    }

    #[test]
    fn sampling_defaults_match_endpoint_expectations() {
        let sampling = SamplingParams::default();
        assert_eq!(sampling.request_output_len, 512);
        assert_eq!(sampling.top_k, 50);
    }

    #[test]
    fn generation_request_flattens_sampling() {
        let body = GenerationRequest {
            text: "hello".to_string(),
            sampling: SamplingParams::default(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["text"], "hello");
        assert_eq!(json["request_output_len"], 512);
        assert_eq!(json["top_p"], 0.9);
    }

    #[test]
    fn empty_result_list_deserializes() {
        let reply: GenerationResponse = serde_json::from_str("{}").unwrap();
        assert!(reply.result.is_empty());
    }
}
