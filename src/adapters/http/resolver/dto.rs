//! HTTP DTOs for the resolver endpoint.
//!
//! These types define the JSON wire shapes at the HTTP boundary. Field
//! names are camelCase for compatibility with existing callers.

use serde::{Deserialize, Serialize};

/// Inbound invocation: the caller-supplied fields of an utterance.
///
/// Bot identity and session come from process configuration; no other
/// inbound shape is accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    /// The user's message.
    pub text: String,
    /// Caller-assigned correlation id.
    pub message_id: String,
}

/// Error body for requests rejected before the pipeline runs.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

impl ErrorResponse {
    /// Creates an error response.
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

/// Liveness probe body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    /// Creates the healthy response.
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}
